/*!
Unit propagation over the formula set, ahead of a search.

A hard formula whose sentence is a simple literal --- an atom, a negated atom, or either
under a liquid block --- admits exactly one behavior in any model satisfying the hard
constraints: the atom holds (or fails) over the whole quantification.
Such formulas are folded into the observation table: the atom becomes observed over the
quantification, the default model asserts it when the literal is positive, and the
formula is dropped.

The fold preserves the set of optimal models: every model violating a folded literal is
dominated, and every remaining model scores as before.

Propagation is optional (the `--unitProp` flag of the front end) and conservative ---
formulas of any other shape are left alone.
*/

use crate::{
    domain::{Domain, Fact},
    misc::log::targets,
    structures::{formula::WeightedFormula, sentence::Sentence},
};

/// The atom and polarity of a simple literal, seen through any liquid block.
fn as_unit(sentence: &Sentence) -> Option<(&crate::structures::atom::Atom, bool)> {
    match sentence {
        Sentence::Atom(atom) => Some((atom, true)),
        Sentence::Negation(inner) => match inner.as_ref() {
            Sentence::Atom(atom) => Some((atom, false)),
            _ => None,
        },
        Sentence::LiquidOp(inner) => as_unit(inner),
        _ => None,
    }
}

impl Domain {
    /// A domain with every hard simple-literal formula folded into the observations.
    ///
    /// The returned domain has the same optimal models and scores them identically,
    /// with fewer formulas for the search to pick over.
    pub fn propagate_units(&self) -> Domain {
        let mut folded = self.clone();
        let mut kept: Vec<WeightedFormula> = Vec::with_capacity(self.formulas().len());
        let mut folds = 0_usize;

        for formula in self.formulas() {
            let unit = match formula.is_hard() {
                true => as_unit(&formula.sentence).map(|(atom, truth)| (atom.clone(), truth)),
                false => None,
            };

            match unit {
                Some((atom, truth)) if atom.is_ground() => {
                    let quantification = self.quantification_of(formula);
                    for member in quantification.members() {
                        let fact = Fact {
                            atom: atom.clone(),
                            truth,
                            at: *member,
                        };
                        folded.add_fact(&fact);
                    }
                    log::info!(
                        target: targets::PREPROCESSING,
                        "folded {formula} into the observations"
                    );
                    folds += 1;
                }
                _ => kept.push(formula.clone()),
            }
        }

        folded.set_formulas(kept);
        log::info!(target: targets::PREPROCESSING, "{folds} formulas folded");
        folded
    }
}

#[cfg(test)]
mod preprocessing_tests {
    use super::*;
    use crate::structures::{
        atom::Atom, interval::Interval, siset::SISet, span_interval::SpanInterval,
    };

    fn p() -> Atom {
        Atom::ground("p", &["a"])
    }

    fn q() -> Atom {
        Atom::ground("q", &["a"])
    }

    fn quantified(sentence: Sentence) -> WeightedFormula {
        WeightedFormula::hard(sentence).at(SISet::from_span_interval(
            SpanInterval::liquid(0, 4),
            false,
            Interval::new(0, 4),
        ))
    }

    #[test]
    fn hard_literals_become_observations() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 4))];
        let formulas = vec![quantified(Sentence::Atom(q()))];
        let domain = Domain::build(&facts, formulas, true).unwrap();

        let propagated = domain.propagate_units();

        assert!(propagated.formulas().is_empty());
        assert!(propagated.observed_atoms().contains(&q()));

        let model = propagated.default_model();
        assert_eq!(model.atom_at(&q()).unwrap().liq_size(), 5);
    }

    #[test]
    fn negative_literals_fix_without_asserting() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 4))];
        let formulas = vec![quantified(Sentence::Negation(Box::new(Sentence::Atom(q()))))];
        let domain = Domain::build(&facts, formulas, true).unwrap();

        let propagated = domain.propagate_units();

        assert!(propagated.formulas().is_empty());
        assert!(propagated.default_model().atom_at(&q()).is_none());
        assert!(propagated.modifiable_si_set(&q()).is_empty());
    }

    #[test]
    fn compound_and_soft_formulas_survive() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 4))];
        let formulas = vec![
            WeightedFormula::soft(Sentence::Atom(q()), 1.0),
            WeightedFormula::hard(Sentence::Disjunction(
                Box::new(Sentence::Atom(p())),
                Box::new(Sentence::Atom(q())),
            )),
        ];
        let domain = Domain::build(&facts, formulas, true).unwrap();

        let propagated = domain.propagate_units();
        assert_eq!(propagated.formulas().len(), 2);
    }
}
