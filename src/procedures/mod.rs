/*!
The algorithms of the library, factored into a collection of procedures.

- [satisfaction]: where a sentence holds in a model.
- [moves]: the candidate toggles for an unsatisfied formula.
- [walk_sat]: the MaxWalkSat search over models.
- [preprocessing]: unit propagation over the formula set.
*/

pub mod moves;
pub mod preprocessing;
pub mod satisfaction;
pub mod walk_sat;
