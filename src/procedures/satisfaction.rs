/*!
The satisfaction evaluator: where a sentence holds in a model.

# Overview

[satisfied_at](crate::domain::Domain::satisfied_at) computes, by structural recursion, the set of intervals inside the domain's universe at which a sentence holds under a model.

Evaluation runs in one of two semantics:

- **Interval semantics** (the default). Truth is a property of intervals.
  An atom is read as an event: it holds over the maximal runs of its (liquid) model
  entry, taken through the [spanning form](crate::structures::siset::SISet::spanning).
  Negation is complement inside the universe, disjunction is union, the diamond reaches
  related intervals through the
  [relation primitive](crate::structures::span_interval::SpanInterval::satisfies_relation),
  and the annotated conjunction emits the [spans](crate::structures::siset::composed_of)
  of relation-constrained pairs.
- **Liquid semantics**, entered through a liquid block.
  Truth is a property of points: every set is liquid, negation is pointwise complement,
  conjunction and disjunction collapse to intersection and union, and the diamond is
  meaningless --- the parsers reject it, and reaching one here is a bug which aborts.

A liquid result flowing back into an interval operator is re-read at the interval level:
under negation or disjunction it keeps its pointwise denotation (an interval satisfies a
liquid block exactly when every point of the interval does), while the diamond and the
relation conjunction read it as events through the spanning form, the same reading atoms
receive.

# Example

With `p(a)` true over the run `[3, 7]` in a universe of `[0, 10]`, `<>{m} p(a)` holds
exactly at the instant `[2, 2]` --- the interval which meets the event.

```rust
# use tempel::domain::{Domain, Fact};
# use tempel::structures::atom::Atom;
# use tempel::structures::interval::IntervalRelation;
# use tempel::structures::sentence::Sentence;
# use tempel::structures::span_interval::SpanInterval;
# use tempel::structures::interval::Interval;
let facts = [Fact::positive(Atom::ground("p", &["a"]), SpanInterval::liquid(3, 7))];
let mut domain = Domain::build(&facts, vec![], true).unwrap();
domain.set_max_interval_checked(Interval::new(0, 10)).unwrap();

let diamond = Sentence::DiamondOp(
    Box::new(Sentence::Atom(Atom::ground("p", &["a"]))),
    [IntervalRelation::Meets].into_iter().collect(),
);

let satisfied = domain.satisfied_at(&diamond, &domain.default_model());
assert_eq!(satisfied.members(), &[SpanInterval::from_points(2, 2, 2, 2)]);
```
*/

use crate::{
    domain::Domain,
    misc::log::targets,
    structures::{
        model::Model,
        sentence::Sentence,
        siset::{self, SISet},
        span_interval::SpanInterval,
    },
};

impl Domain {
    /// The set of intervals inside the universe at which `sentence` holds under `model`.
    pub fn satisfied_at(&self, sentence: &Sentence, model: &Model) -> SISet {
        let satisfied = self.satisfied_interval(sentence, model);
        log::trace!(target: targets::SATISFACTION, "{sentence} holds at {satisfied}");
        satisfied
    }

    /// Interval-semantics evaluation.
    fn satisfied_interval(&self, sentence: &Sentence, model: &Model) -> SISet {
        match sentence {
            Sentence::Atom(atom) => {
                let mut times = match model.atom_at(atom) {
                    Some(times) => times.spanning(),
                    None => return SISet::new(false, self.max_interval()),
                };
                // The entry may have been recorded against an older universe.
                times.set_max_interval(self.max_interval());
                siset::intersection(&times, &self.max_si_set())
            }

            Sentence::BoolLit(true) => self.max_si_set(),

            Sentence::BoolLit(false) => SISet::new(false, self.max_interval()),

            Sentence::Negation(inner) => {
                let mut inner_satisfied =
                    self.interval_view(&self.satisfied_interval(inner, model));
                inner_satisfied.set_max_interval(self.max_interval());
                inner_satisfied.complement()
            }

            Sentence::Disjunction(left, right) => {
                let mut union = self.interval_view(&self.satisfied_interval(left, model));
                union.add_set(&self.satisfied_interval(right, model));
                union
            }

            Sentence::Conjunction(left, right, relations) => {
                let left_satisfied = self.satisfied_interval(left, model).spanning();
                let right_satisfied = self.satisfied_interval(right, model).spanning();

                let universe = self.max_interval();
                let mut composed = SISet::new(false, universe);
                for rel in relations {
                    for a in left_satisfied.members() {
                        for b in right_satisfied.members() {
                            for span in siset::composed_of(a, b, *rel, &universe) {
                                composed.add(span);
                            }
                        }
                    }
                }
                composed
            }

            Sentence::DiamondOp(inner, relations) => {
                let inner_satisfied = self.satisfied_interval(inner, model).spanning();

                let mut reachable = SISet::new(false, self.max_interval());
                for rel in relations {
                    reachable.add_set(&inner_satisfied.satisfies_relation(*rel));
                }
                reachable
            }

            Sentence::LiquidOp(inner) => self.satisfied_liquid(inner, model),
        }
    }

    /// Liquid-semantics evaluation: every set is a set of points.
    fn satisfied_liquid(&self, sentence: &Sentence, model: &Model) -> SISet {
        match sentence {
            Sentence::Atom(atom) => {
                let everywhere = self.liquid_universe();
                match model.atom_at(atom) {
                    Some(times) => {
                        let mut times = times.clone();
                        times.set_max_interval(self.max_interval());
                        siset::intersection(&times, &everywhere)
                    }
                    None => SISet::new(true, self.max_interval()),
                }
            }

            Sentence::BoolLit(true) => self.liquid_universe(),

            Sentence::BoolLit(false) => SISet::new(true, self.max_interval()),

            Sentence::Negation(inner) => {
                let mut inner_satisfied = self.satisfied_liquid(inner, model);
                inner_satisfied.set_max_interval(self.max_interval());
                inner_satisfied.complement()
            }

            Sentence::Disjunction(left, right) => {
                let mut union = self.satisfied_liquid(left, model);
                union.add_set(&self.satisfied_liquid(right, model));
                union
            }

            // Under liquid semantics the relation annotation is void: conjunction is
            // pointwise intersection.
            Sentence::Conjunction(left, right, _) => siset::intersection(
                &self.satisfied_liquid(left, model),
                &self.satisfied_liquid(right, model),
            ),

            Sentence::LiquidOp(inner) => self.satisfied_liquid(inner, model),

            Sentence::DiamondOp(_, _) => {
                panic!("! a diamond operator under liquid semantics")
            }
        }
    }

    /// The liquid set covering every point of the universe.
    fn liquid_universe(&self) -> SISet {
        let max_interval = self.max_interval();
        SISet::from_span_interval(
            SpanInterval::liquid(max_interval.start, max_interval.finish),
            true,
            max_interval,
        )
    }

    /// The same denoted intervals, as a plain (non-liquid) set.
    ///
    /// A liquid member denotes every sub-interval of its run, and keeps doing so here;
    /// only the pointwise behavior of the container is shed.
    fn interval_view(&self, set: &SISet) -> SISet {
        let mut view = SISet::new(false, self.max_interval());
        for member in set.members() {
            view.add(*member);
        }
        view
    }
}

#[cfg(test)]
mod satisfaction_tests {
    use super::*;
    use crate::{
        domain::Fact,
        structures::{atom::Atom, interval::Interval, interval::IntervalRelation},
    };

    fn p() -> Atom {
        Atom::ground("p", &["a"])
    }

    fn q() -> Atom {
        Atom::ground("q", &["a"])
    }

    fn domain_with_p(run: (u32, u32), universe: (u32, u32)) -> Domain {
        let facts = [Fact::positive(p(), SpanInterval::liquid(run.0, run.1))];
        let mut domain = Domain::build(&facts, vec![], true).unwrap();
        domain
            .set_max_interval_checked(Interval::new(universe.0, universe.1))
            .unwrap();
        domain
    }

    #[test]
    fn atoms_hold_over_their_runs() {
        let domain = domain_with_p((3, 7), (0, 10));
        let model = domain.default_model();

        let satisfied = domain.satisfied_at(&Sentence::Atom(p()), &model);
        assert_eq!(satisfied.members(), &[SpanInterval::from_points(3, 3, 7, 7)]);

        let absent = domain.satisfied_at(&Sentence::Atom(q()), &model);
        assert!(absent.is_empty());
    }

    #[test]
    fn negation_is_complement() {
        let domain = domain_with_p((3, 7), (0, 10));
        let model = domain.default_model();

        let sentence = Sentence::Atom(p());
        let negated = domain.satisfied_at(&Sentence::Negation(Box::new(sentence.clone())), &model);
        let complement = domain.satisfied_at(&sentence, &model).complement();

        assert!(negated.includes(&complement) && complement.includes(&negated));
    }

    #[test]
    fn diamond_meets_picks_the_instant_before_onset() {
        let domain = domain_with_p((3, 7), (0, 10));
        let model = domain.default_model();

        let diamond = Sentence::DiamondOp(
            Box::new(Sentence::Atom(p())),
            [IntervalRelation::Meets].into_iter().collect(),
        );

        let satisfied = domain.satisfied_at(&diamond, &model);
        assert_eq!(satisfied.members(), &[SpanInterval::from_points(2, 2, 2, 2)]);
    }

    #[test]
    fn conjunction_meets_spans_the_junction() {
        let facts = [
            Fact::positive(p(), SpanInterval::liquid(0, 4)),
            Fact::positive(q(), SpanInterval::liquid(5, 9)),
        ];
        let domain = Domain::build(&facts, vec![], true).unwrap();
        let model = domain.default_model();

        let conjunction = Sentence::Conjunction(
            Box::new(Sentence::Atom(p())),
            Box::new(Sentence::Atom(q())),
            [IntervalRelation::Meets].into_iter().collect(),
        );

        let satisfied = domain.satisfied_at(&conjunction, &model);
        assert_eq!(satisfied.members(), &[SpanInterval::from_points(0, 0, 9, 9)]);
    }

    #[test]
    fn liquid_conjunction_is_pointwise() {
        let facts = [
            Fact::positive(p(), SpanInterval::liquid(0, 6)),
            Fact::positive(q(), SpanInterval::liquid(4, 9)),
        ];
        let domain = Domain::build(&facts, vec![], true).unwrap();
        let model = domain.default_model();

        let block = Sentence::LiquidOp(Box::new(Sentence::Conjunction(
            Box::new(Sentence::Atom(p())),
            Box::new(Sentence::Atom(q())),
            Sentence::default_conjunction_relations(),
        )));

        let satisfied = domain.satisfied_at(&block, &model);
        assert!(satisfied.force_liquid());
        assert_eq!(satisfied.members(), &[SpanInterval::liquid(4, 6)]);
    }

    #[test]
    fn boolean_literals_bound_the_lattice() {
        let domain = domain_with_p((0, 4), (0, 4));
        let model = domain.default_model();

        let top = domain.satisfied_at(&Sentence::BoolLit(true), &model);
        assert_eq!(top.size(), domain.max_si_set().size());

        let bottom = domain.satisfied_at(&Sentence::BoolLit(false), &model);
        assert!(bottom.is_empty());

        let raised = domain.satisfied_at(
            &Sentence::Negation(Box::new(Sentence::BoolLit(false))),
            &model,
        );
        assert!(raised.includes(&top) && top.includes(&raised));
    }
}
