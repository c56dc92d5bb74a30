/*!
A library for approximate MAP inference over an interval temporal logic.

tempel answers a probabilistic inference question over a logic of time intervals: given
a finite set of observed timed facts and a finite set of weighted formulas, find an
assignment of truth-values-over-time to the unobserved atoms --- a *model* --- which
maximises the total weight of satisfied formulas.
The answer is approximate: a stochastic local search (a MaxWalkSat variant) runs for a
fixed iteration budget, and the best model seen is returned.

# Orientation

The library is designed around three tightly coupled subsystems:

- The **span-interval algebra**: sets of time intervals represented compactly as
  rectangles of (start, finish) pairs, with complementation, union, intersection,
  disjointness normalisation, and satisfaction over Allen's interval relations.
  See [structures::siset].
- The **sentence AST and its satisfaction evaluator**: given a formula and a model,
  compute the set of intervals over which the formula holds.
  The logic extends propositional evaluation with a liquid (pointwise) operator, a
  diamond operator parameterised by interval relations, and relation-parameterised
  conjunction.
  See [structures::sentence] and [procedures::satisfaction].
- The **search**: a scoring-and-flipping loop proposing and accepting local moves on
  the model.
  See [procedures::walk_sat].

Useful starting points, then, may be:

- The [domain](domain), which owns the formulas and observations and scores models.
- The [builder], which reads the fact and formula files.
- The [configuration](config) to see what is adjustable.

# Example

Infer that an effect must follow from an observed cause:

```rust
use tempel::builder;
use tempel::config::Config;
use tempel::procedures::walk_sat::Search;
use tempel::structures::atom::Atom;

let facts = "p(a) @ [0:9]\n";
let formulas = "p(a) -> q(a) @ [0:9]\n";

let domain = builder::load_domain(facts, formulas, true).unwrap();

let mut search = Search::from_config(&domain, Config::default());
let result = search.run(domain.default_model());

assert!(result.fully_satisfied);
let q = result.best_model.atom_at(&Atom::ground("q", &["a"])).unwrap();
assert_eq!(q.liq_size(), 10);
```

# Determinism

Given a fixed seed the entire search trajectory is deterministic: every stochastic
decision consults a single explicitly-managed generator, models and atom tables iterate
in atom order, and span-interval sets keep a canonical lexicographic order.

# Logs

To help diagnose issues (somewhat) detailed calls to [log!](log) are made, and a
variety of targets are defined in order to help narrow output to relevant parts of the
library; the targets are listed in [misc::log].
No log implementation is bundled, and release builds compile the calls out.
*/

pub mod builder;
pub mod procedures;

pub mod config;
pub mod domain;
pub mod structures;
pub mod types;

pub mod generic;

pub mod reports;

pub mod misc;
