/*!
Candidate moves for the search.

A move toggles one ground atom over one stretch of time: it either asserts the atom
(adds the stretch to its truth times) or retracts it (removes the stretch).

Moves for a formula are drawn from its *dissatisfaction witnesses* --- the part of the
quantification the satisfaction set does not cover.
For every witness and every mentioned atom the searcher may touch, both the asserting
and the retracting move are offered; which of the two helps is the scorer's problem.

Moves are generated in a fixed order (witnesses in canonical set order, atoms in atom
order, assert before retract), which keeps a seeded search deterministic.
*/

use crate::{
    domain::Domain,
    misc::log::targets,
    structures::{
        atom::Atom, formula::WeightedFormula, model::Model, siset::SISet,
    },
};

/// A single candidate move: toggle `atom` over `within`.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    /// The atom to toggle.
    pub atom: Atom,

    /// Assert (true) or retract (false).
    pub assert: bool,

    /// The times to toggle over.
    pub within: SISet,
}

impl Move {
    /// Applies the move to a model.
    pub fn apply(&self, model: &mut Model) {
        match self.assert {
            true => model.assert_atom(self.atom.clone(), &self.within),
            false => model.unset_atom(&self.atom, &self.within),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.assert {
            true => write!(f, "assert {} over {}", self.atom, self.within),
            false => write!(f, "retract {} over {}", self.atom, self.within),
        }
    }
}

/// The candidate moves for one unsatisfied formula under a model.
///
/// Atoms the domain protects contribute no moves, and a move whose stretch is empty is
/// dropped, so the result may be empty even for an unsatisfied formula.
pub fn find_moves(domain: &Domain, formula: &WeightedFormula, model: &Model) -> Vec<Move> {
    let satisfied = domain.satisfied_at(&formula.sentence, model);

    let mut witnesses = domain.quantification_of(formula);
    witnesses.subtract_set(&satisfied);
    witnesses.make_disjoint();

    let atoms: Vec<Atom> = formula
        .sentence
        .atoms()
        .into_iter()
        .filter(Atom::is_ground)
        .collect();

    let mut moves = Vec::new();
    for witness in witnesses.members() {
        // Moves act pointwise, over the run the witness covers.
        let stretch = SISet::from_span_interval(
            witness.to_liquid_inc(),
            true,
            domain.max_interval(),
        );

        for atom in &atoms {
            let modifiable = domain.modifiable_si_set(atom);
            let within = crate::structures::siset::intersection(&stretch, &modifiable);
            if within.is_empty() {
                continue;
            }

            for assert in [true, false] {
                let candidate = Move {
                    atom: atom.clone(),
                    assert,
                    within: within.clone(),
                };
                if !moves.contains(&candidate) {
                    moves.push(candidate);
                }
            }
        }
    }

    log::trace!(
        target: targets::MOVES,
        "{} candidate moves for {formula}",
        moves.len()
    );
    moves
}

#[cfg(test)]
mod move_tests {
    use super::*;
    use crate::{
        domain::Fact,
        structures::{
            interval::Interval, sentence::Sentence, span_interval::SpanInterval,
        },
    };

    fn p() -> Atom {
        Atom::ground("p", &["a"])
    }

    fn q() -> Atom {
        Atom::ground("q", &["a"])
    }

    #[test]
    fn unsatisfied_formulas_offer_toggles() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 9))];
        let formulas = vec![WeightedFormula::hard(Sentence::Atom(q())).at(
            SISet::from_span_interval(SpanInterval::liquid(0, 9), false, Interval::new(0, 9)),
        )];
        let domain = Domain::build(&facts, formulas, true).unwrap();
        let model = domain.default_model();

        let moves = find_moves(&domain, &domain.formulas()[0], &model);
        assert_eq!(moves.len(), 2);
        assert!(moves[0].assert);
        assert_eq!(moves[0].atom, q());
        assert_eq!(moves[0].within.liq_size(), 10);
    }

    #[test]
    fn protected_atoms_offer_nothing() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 9))];
        let formulas = vec![WeightedFormula::hard(Sentence::Negation(Box::new(
            Sentence::Atom(p()),
        )))];
        let domain = Domain::build(&facts, formulas, true).unwrap();
        let model = domain.default_model();

        let formula = &domain.formulas()[0];
        assert!(!domain.formula_satisfied(formula, &model));
        assert!(find_moves(&domain, formula, &model).is_empty());
    }

    #[test]
    fn applying_an_assert_move_extends_the_atom() {
        let mut model = Model::new();
        let stretch = SISet::from_span_interval(
            SpanInterval::liquid(2, 5),
            true,
            Interval::new(0, 9),
        );

        Move {
            atom: q(),
            assert: true,
            within: stretch.clone(),
        }
        .apply(&mut model);
        assert_eq!(model.atom_at(&q()).unwrap().liq_size(), 4);

        Move {
            atom: q(),
            assert: false,
            within: stretch,
        }
        .apply(&mut model);
        assert_eq!(model.atom_at(&q()).unwrap().liq_size(), 0);
    }
}
