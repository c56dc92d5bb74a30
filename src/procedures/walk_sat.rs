/*!
Approximates the best model of a domain by stochastic local search.

# Overview

The search is a MaxWalkSat variant.
Each iteration:

1. Collects the formulas not fully satisfied under the current model.
   When there are none the search ends early --- nothing can improve.
2. Picks one of them uniformly.
3. Enumerates the [candidate moves](crate::procedures::moves) for that formula.
   When there are none (every mentioned atom is protected) the iteration is spent and
   the next picks again.
4. With the configured probability takes a move uniformly at random; otherwise scores
   every candidate against the domain and takes the best, breaking ties uniformly.
5. Applies the move, and records the model whenever it is the best seen.

Scoring runs against [with_hard_weights](crate::domain::Domain::with_hard_weights), so
hard constraints participate as ordinary, dominant weights and the search optimises a
single sum.

Every stochastic decision draws from the one generator the searcher owns, so a seed
fixes the whole trajectory, and the best score reported never decreases across
iterations.

# Example

```rust
# use tempel::config::Config;
# use tempel::domain::{Domain, Fact};
# use tempel::procedures::walk_sat::Search;
# use tempel::structures::atom::Atom;
# use tempel::structures::formula::WeightedFormula;
# use tempel::structures::sentence::Sentence;
# use tempel::structures::span_interval::SpanInterval;
let facts = [Fact::positive(Atom::ground("p", &["a"]), SpanInterval::liquid(0, 3))];
let formulas = vec![WeightedFormula::soft(Sentence::Atom(Atom::ground("q", &["a"])), 1.0)];
let domain = Domain::build(&facts, formulas, true).unwrap();

let mut search = Search::from_config(&domain, Config::default());
let result = search.run(domain.default_model());

assert!(result.best_score > 0.0);
```
*/

use rand::Rng;

use crate::{
    config::Config,
    domain::Domain,
    generic::random::MinimalPCG32,
    misc::log::targets,
    procedures::moves::{self, Move},
    structures::model::Model,
};

use rand::SeedableRng;

/// Counts for various things which count, roughly.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counters {
    /// Iterations consumed.
    pub iterations: u64,

    /// Moves applied.
    pub moves_applied: u64,

    /// Moves taken at random.
    pub random_moves: u64,

    /// Moves taken greedily.
    pub greedy_moves: u64,

    /// Iterations on which the chosen formula offered no move.
    pub stalled: u64,

    /// Times the best model was displaced.
    pub best_updates: u64,
}

/// One row of the search trace: an applied move's iteration and the scores after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub iteration: u64,
    pub current_score: f64,
    pub best_score: f64,
}

/// What a finished search hands back.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best model seen.
    pub best_model: Model,

    /// Its score, under the hard-weighted domain.
    pub best_score: f64,

    /// Whether the search ended with every formula fully satisfied.
    pub fully_satisfied: bool,

    /// Counters over the whole run.
    pub counters: Counters,

    /// A row per applied move, for the data file.
    pub trace: Vec<TraceRow>,
}

/// A search over the models of a domain, parameterised to a source of randomness.
pub struct Search<'d, R: Rng + std::default::Default> {
    domain: &'d Domain,

    /// The scoring domain: hard formulas carry their pseudo-weight here.
    weighted: Domain,

    config: Config,

    /// The source of rng.
    pub rng: R,

    /// Counters for the current run.
    pub counters: Counters,
}

impl<'d> Search<'d, MinimalPCG32> {
    /// A search with the default generator, seeded from the configuration.
    pub fn from_config(domain: &'d Domain, config: Config) -> Self {
        let rng = MinimalPCG32::from_seed(config.seed.to_le_bytes());
        Search::with_rng(domain, config, rng)
    }
}

impl<'d, R: Rng + std::default::Default> Search<'d, R> {
    /// A search drawing stochastic decisions from the given generator.
    pub fn with_rng(domain: &'d Domain, config: Config, rng: R) -> Self {
        let mut scoring = domain.clone();
        scoring.set_hard_factor(config.hard_factor.or(Some(domain.hard_factor())));
        let weighted = scoring.with_hard_weights();

        Search {
            domain,
            weighted,
            config,
            rng,
            counters: Counters::default(),
        }
    }

    /// Runs the search from an initial model and returns the best model seen.
    pub fn run(&mut self, initial: Model) -> SearchResult {
        let mut current = initial;
        let mut best = current.clone();
        let mut best_score = self.weighted.score(&current);
        let mut trace = Vec::new();

        log::info!(
            target: targets::SEARCH,
            "searching for {} iterations from score {best_score}",
            self.config.iterations
        );

        let mut fully_satisfied = false;

        'search_loop: for iteration in 1..=self.config.iterations {
            self.counters.iterations = iteration;

            let unsatisfied: Vec<usize> = (0..self.weighted.formulas().len())
                .filter(|index| {
                    !self
                        .weighted
                        .formula_satisfied(&self.weighted.formulas()[*index], &current)
                })
                .collect();

            if unsatisfied.is_empty() {
                log::info!(target: targets::SEARCH, "fully satisfied at iteration {iteration}");
                fully_satisfied = true;
                break 'search_loop;
            }

            let pick = unsatisfied[self.rng.random_range(0..unsatisfied.len())];
            let formula = &self.weighted.formulas()[pick];

            let candidates = moves::find_moves(&self.weighted, formula, &current);
            if candidates.is_empty() {
                self.counters.stalled += 1;
                continue 'search_loop;
            }

            let chosen = match self.rng.random_bool(self.config.random_move_probability) {
                true => {
                    self.counters.random_moves += 1;
                    candidates[self.rng.random_range(0..candidates.len())].clone()
                }
                false => {
                    self.counters.greedy_moves += 1;
                    self.greedy_choice(&candidates, &current)
                }
            };

            log::trace!(target: targets::SEARCH, "iteration {iteration}: {chosen}");
            chosen.apply(&mut current);
            self.counters.moves_applied += 1;

            let score = self.weighted.score(&current);
            if score > best_score {
                best = current.clone();
                best_score = score;
                self.counters.best_updates += 1;
            }

            trace.push(TraceRow {
                iteration,
                current_score: score,
                best_score,
            });
        }

        fully_satisfied = fully_satisfied || self.domain.is_fully_satisfied(&best);

        SearchResult {
            best_model: best,
            best_score,
            fully_satisfied,
            counters: self.counters,
            trace,
        }
    }

    /// The highest-scoring candidate, ties broken uniformly.
    fn greedy_choice(&mut self, candidates: &[Move], current: &Model) -> Move {
        let mut best_score = f64::NEG_INFINITY;
        let mut best_indices: Vec<usize> = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let mut trial = current.clone();
            candidate.apply(&mut trial);
            let score = self.weighted.score(&trial);

            if score > best_score {
                best_score = score;
                best_indices.clear();
                best_indices.push(index);
            } else if score == best_score {
                best_indices.push(index);
            }
        }

        let winner = best_indices[self.rng.random_range(0..best_indices.len())];
        candidates[winner].clone()
    }
}
