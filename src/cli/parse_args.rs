use tempel::config::Config;

use crate::config::CliConfig;

const HELP: &str = "\
tempel_cli FACT-FILE FORMULA-FILE [--option(=value)]*

Approximates the best model of the given facts under the given weighted formulas.

Options:
  --help              Print this text.
  --version           Print the version.
  --iterations=N      Iteration budget of the search (default 1000).
  --prob=P            Probability of a random move (default 0.25).
  --seed=N            Seed of the search's generator (default 0).
  --max=N             Raise the upper bound of the universe to N.
  --min=N             Lower the lower bound of the universe to N.
  --evalModel         Score the default model and stop.
  --unitProp          Fold hard literal formulas into the observations first.
  --output=FILE       Write the best model to FILE.
  --datafile=FILE     Write a CSV of iteration,current_score,best_score to FILE.
";

/// Parse CLI arguments to a [Config] and [CliConfig], returning the two positional
/// file paths.
///
/// If an unrecognised argument or invalid option is found a message is sent and the
/// process is terminated.
pub fn parse_args(args: &[String], cli_options: &mut CliConfig) -> (Config, String, String) {
    let mut cfg = Config::default();
    let mut positional = Vec::new();

    'arg_examination: for arg in args.iter().skip(1) {
        if !arg.starts_with("--") {
            positional.push(arg.clone());
            continue 'arg_examination;
        }

        let mut split = arg.split('=');
        match split.next() {
            Some("--help") => {
                print!("{HELP}");
                std::process::exit(0);
            }

            Some("--version") => {
                println!("tempel {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }

            Some("--evalModel") => {
                cli_options.eval_model = true;
            }

            Some("--unitProp") => {
                cfg.unit_propagation = true;
            }

            // The remaining cases follow a common template: if a value is present, may
            // be parsed appropriately, and is valid, the config is updated.
            // Otherwise, a message is sent.
            Some("--datafile") => {
                if let Some(path) = split.next() {
                    if !path.is_empty() {
                        cli_options.datafile = Some(path.to_owned());
                        continue 'arg_examination;
                    }
                }
                println!("datafile requires a path");
                std::process::exit(1);
            }

            Some("--iterations") => {
                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u64>() {
                        cfg.iterations = value;
                        continue 'arg_examination;
                    }
                }
                println!("iterations requires a non-negative count");
                std::process::exit(1);
            }

            Some("--max") => {
                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u32>() {
                        cli_options.max = Some(value);
                        continue 'arg_examination;
                    }
                }
                println!("max requires a time point");
                std::process::exit(1);
            }

            Some("--min") => {
                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u32>() {
                        cli_options.min = Some(value);
                        continue 'arg_examination;
                    }
                }
                println!("min requires a time point");
                std::process::exit(1);
            }

            Some("--output") => {
                if let Some(path) = split.next() {
                    if !path.is_empty() {
                        cli_options.output = Some(path.to_owned());
                        continue 'arg_examination;
                    }
                }
                println!("output requires a path");
                std::process::exit(1);
            }

            Some("--prob") => {
                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<f64>() {
                        if (0.0..=1.0).contains(&value) {
                            cfg.random_move_probability = value;
                            continue 'arg_examination;
                        }
                    }
                }
                println!("prob requires a value between 0 and 1");
                std::process::exit(1);
            }

            Some("--seed") => {
                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<u64>() {
                        cfg.seed = value;
                        continue 'arg_examination;
                    }
                }
                println!("seed requires a non-negative integer");
                std::process::exit(1);
            }

            Some(_) | None => {
                println!("Unable to parse argument: {arg:?}");
                std::process::exit(1);
            }
        }
    }

    let [fact_path, formula_path] = positional.as_slice() else {
        println!("Expected FACT-FILE and FORMULA-FILE; see --help");
        std::process::exit(1);
    };

    (cfg, fact_path.clone(), formula_path.clone())
}
