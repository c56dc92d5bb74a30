/*!
A simple CLI interface to the library.

# Use

```sh
tempel_cli facts.pel formulas.pel [--option(=value)]*
```

The fact file and the formula file are read, the search runs for the configured budget,
and the best model found is printed in the `atom @ {…}` format, one atom per line.
Of note:

- `--evalModel` scores the default model (the observations alone) and stops.
- `--unitProp` folds hard literal formulas into the observations before searching.
- `--datafile=FILE` records a `iteration,current_score,best_score` row per accepted
  move, for plotting a run.

Exit code 0 on success; 1 on any invalid input or runtime error.
*/

use tempel::{
    procedures::walk_sat::Search,
    reports::{self, Report},
};

mod config;
use config::CliConfig;

mod parse_args;
use parse_args::parse_args;

/// Entrypoint to the CLI.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut cli_options = CliConfig::default();
    let (cfg, fact_path, formula_path) = parse_args(&args, &mut cli_options);

    let facts_text = match std::fs::read_to_string(&fact_path) {
        Ok(text) => text,
        Err(e) => {
            println!("Unable to read {fact_path}: {e}");
            std::process::exit(1);
        }
    };
    let formulas_text = match std::fs::read_to_string(&formula_path) {
        Ok(text) => text,
        Err(e) => {
            println!("Unable to read {formula_path}: {e}");
            std::process::exit(1);
        }
    };

    let mut domain =
        match tempel::builder::load_domain(&facts_text, &formulas_text, cfg.assume_closed_world) {
            Ok(domain) => domain,
            Err(e) => {
                println!("{e}");
                std::process::exit(1);
            }
        };

    // The universe may be widened (or narrowed, when nothing is quantified outside it).
    if cli_options.min.is_some() || cli_options.max.is_some() {
        let current = domain.max_interval();
        let requested = tempel::structures::interval::Interval::new(
            cli_options.min.unwrap_or(current.start),
            cli_options.max.unwrap_or(current.finish),
        );
        if let Err(e) = domain.set_max_interval_checked(requested) {
            println!("{e}");
            std::process::exit(1);
        }
    }

    if cfg.unit_propagation {
        domain = domain.propagate_units();
    }

    let model = domain.default_model();

    if cli_options.eval_model {
        for formula in domain.formulas() {
            println!("{}\t{formula}", domain.score_of(formula, &model));
        }
        println!("score: {}", domain.score(&model));
        print!("{model}");
        std::process::exit(0);
    }

    let mut search = Search::from_config(&domain, cfg);
    let result = search.run(model);

    println!("s {}", Report::from(&result));
    println!("score: {}", domain.score(&result.best_model));
    print!("{}", result.best_model);

    if let Some(path) = &cli_options.output {
        if let Err(e) = reports::write_model(path, &result.best_model) {
            println!("Unable to write {path}: {e}");
            std::process::exit(1);
        }
    }

    if let Some(path) = &cli_options.datafile {
        if let Err(e) = reports::write_trace(path, &result.trace) {
            println!("Unable to write {path}: {e}");
            std::process::exit(1);
        }
    }
}
