/*!
The domain --- to which facts and formulas are added and against which models are scored.

A domain owns:

- the weighted formulas, in input order,
- the observed atoms together with the times at which observation fixes them,
- the unobserved atoms, the variables of the search,
- the `max_interval` bounding every set the evaluator builds, and
- the closed-world and observation-protection switches.

The domain is immutable for the duration of a search; the searcher holds its own [Model] and consults the domain for [scoring](Domain::score) and for the [times it may modify](Domain::modifiable_si_set).

# Example

```rust
# use tempel::domain::{Domain, Fact};
# use tempel::structures::atom::Atom;
# use tempel::structures::formula::WeightedFormula;
# use tempel::structures::interval::Interval;
# use tempel::structures::sentence::Sentence;
# use tempel::structures::span_interval::SpanInterval;
let facts = [Fact::positive(Atom::ground("p", &["a"]), SpanInterval::liquid(0, 9))];
let formulas = vec![WeightedFormula::soft(
    Sentence::Atom(Atom::ground("p", &["a"])),
    1.0,
)];

let domain = Domain::build(&facts, formulas, true).unwrap();
assert_eq!(domain.max_interval(), Interval::new(0, 9));

let model = domain.default_model();
assert_eq!(domain.score(&model), 1.0);
```
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    misc::log::targets,
    structures::{
        atom::Atom,
        formula::WeightedFormula,
        interval::Interval,
        model::Model,
        siset::{self, SISet},
        span_interval::SpanInterval,
    },
    types::err::{self, DomainError},
};

/// A timed ground fact: an atom holding (or failing to hold) over a span interval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fact {
    /// The atom observed.
    pub atom: Atom,

    /// Whether the atom was observed to hold or to fail.
    pub truth: bool,

    /// Where the observation applies.
    pub at: SpanInterval,
}

impl Fact {
    pub fn positive(atom: Atom, at: SpanInterval) -> Self {
        Fact {
            atom,
            truth: true,
            at,
        }
    }

    pub fn negative(atom: Atom, at: SpanInterval) -> Self {
        Fact {
            atom,
            truth: false,
            at,
        }
    }
}

/// The problem a search runs against.
#[derive(Clone, Debug)]
pub struct Domain {
    assume_closed_world: bool,

    dont_modify_obs_preds: bool,

    /// Per observed predicate, the times at which observation fixes its value.
    obs_preds_fixed_at: BTreeMap<String, SISet>,

    obs_atoms: BTreeSet<Atom>,

    unobs_atoms: BTreeSet<Atom>,

    max_interval: Interval,

    formulas: Vec<WeightedFormula>,

    /// The model holding exactly the positive observations.
    observations: Model,

    /// An override for the hard-formula pseudo-weight.
    hard_factor: Option<f64>,
}

impl Domain {
    /// An empty domain over the given universe, for programmatic construction.
    pub fn new(max_interval: Interval) -> Self {
        Domain {
            assume_closed_world: true,
            dont_modify_obs_preds: true,
            obs_preds_fixed_at: BTreeMap::new(),
            obs_atoms: BTreeSet::new(),
            unobs_atoms: BTreeSet::new(),
            max_interval,
            formulas: Vec::new(),
            observations: Model::new(),
            hard_factor: None,
        }
    }

    /// A domain from parsed facts and formulas.
    ///
    /// The universe is the least interval covering every fact and every quantification;
    /// with no facts nothing bounds it, which is an error.
    pub fn build(
        facts: &[Fact],
        formulas: Vec<WeightedFormula>,
        assume_closed_world: bool,
    ) -> Result<Self, err::ErrorKind> {
        if facts.is_empty() {
            return Err(err::ErrorKind::from(DomainError::NoFacts));
        }

        let mut smallest = u32::MAX;
        let mut largest = u32::MIN;
        let mut note = |interval: &Interval| {
            smallest = smallest.min(interval.start);
            largest = largest.max(interval.finish);
        };

        for fact in facts {
            if let Some(at) = fact.at.normalized() {
                note(&Interval::new(at.start.start, at.finish.finish));
            }
        }
        for formula in &formulas {
            if let Some(quantification) = &formula.quantification {
                if let Some(span) = quantification.span_of() {
                    note(&span);
                }
            }
        }

        let mut domain = Domain::new(Interval::new(smallest, largest));
        domain.assume_closed_world = assume_closed_world;
        log::info!(target: targets::DOMAIN, "universe bounded to {}", domain.max_interval);

        for fact in facts {
            domain.add_fact(fact);
        }
        for formula in formulas {
            domain.push_formula(formula);
        }

        Ok(domain)
    }

    /// Records an observation: the atom's value is fixed over the fact's interval, and a
    /// positive fact extends the observation model.
    pub(crate) fn add_fact(&mut self, fact: &Fact) {
        let Some(at) = fact.at.normalized() else {
            return;
        };

        self.obs_preds_fixed_at
            .entry(fact.atom.predicate.clone())
            .or_insert_with(|| SISet::new(true, self.max_interval))
            .add(at);
        self.obs_atoms.insert(fact.atom.clone());
        self.unobs_atoms.remove(&fact.atom);

        if fact.truth {
            let times = SISet::from_span_interval(at, true, self.max_interval);
            self.observations.assert_atom(fact.atom.clone(), &times);
        }
    }

    /// Appends a formula, widening the universe to cover its quantification and noting
    /// any fresh unobserved atoms.
    pub fn push_formula(&mut self, formula: WeightedFormula) {
        if let Some(span) = formula
            .quantification
            .as_ref()
            .and_then(SISet::span_of)
        {
            if span.start < self.max_interval.start || span.finish > self.max_interval.finish {
                self.set_max_interval(self.max_interval.span(&span));
            }
        }

        for atom in formula.sentence.atoms() {
            if !self.obs_atoms.contains(&atom) {
                self.unobs_atoms.insert(atom);
            }
        }

        self.formulas.push(formula);
    }

    /// Replaces the formula list, rebuilding the unobserved-atom table from what remains.
    pub(crate) fn set_formulas(&mut self, formulas: Vec<WeightedFormula>) {
        self.formulas = formulas;
        self.unobs_atoms.clear();
        for formula in &self.formulas {
            for atom in formula.sentence.atoms() {
                if !self.obs_atoms.contains(&atom) {
                    self.unobs_atoms.insert(atom);
                }
            }
        }
    }

    /// The universe all evaluation is bounded by.
    pub fn max_interval(&self) -> Interval {
        self.max_interval
    }

    /// The universe as a single span interval.
    pub fn max_span_interval(&self) -> SpanInterval {
        SpanInterval::new(self.max_interval, self.max_interval)
    }

    /// The universe as a set: every interval inside `max_interval`.
    pub fn max_si_set(&self) -> SISet {
        SISet::from_span_interval(self.max_span_interval(), false, self.max_interval)
    }

    /// Rebounds the universe.
    ///
    /// Fails when a formula is quantified over intervals the new universe omits.
    pub fn set_max_interval_checked(&mut self, max_interval: Interval) -> Result<(), err::ErrorKind> {
        for formula in &self.formulas {
            if let Some(span) = formula.quantification.as_ref().and_then(SISet::span_of) {
                if !max_interval.contains(&span) {
                    return Err(err::ErrorKind::from(
                        DomainError::QuantificationOutsideUniverse {
                            formula: formula.to_string(),
                        },
                    ));
                }
            }
        }
        self.set_max_interval(max_interval);
        Ok(())
    }

    fn set_max_interval(&mut self, max_interval: Interval) {
        self.max_interval = max_interval;
        for fixed in self.obs_preds_fixed_at.values_mut() {
            fixed.set_max_interval(max_interval);
        }
        log::info!(target: targets::DOMAIN, "universe rebounded to {max_interval}");
    }

    /// The formulas, in input order.
    pub fn formulas(&self) -> &[WeightedFormula] {
        &self.formulas
    }

    /// The observed atoms, in atom order.
    pub fn observed_atoms(&self) -> &BTreeSet<Atom> {
        &self.obs_atoms
    }

    /// The unobserved atoms --- the variables of the search --- in atom order.
    pub fn unobserved_atoms(&self) -> &BTreeSet<Atom> {
        &self.unobs_atoms
    }

    /// The times at which observation fixes each observed predicate.
    pub fn observed_predicates(&self) -> &BTreeMap<String, SISet> {
        &self.obs_preds_fixed_at
    }

    pub fn assume_closed_world(&self) -> bool {
        self.assume_closed_world
    }

    pub fn dont_modify_obs_preds(&self) -> bool {
        self.dont_modify_obs_preds
    }

    pub fn set_dont_modify_obs_preds(&mut self, value: bool) {
        self.dont_modify_obs_preds = value;
    }

    /// The model holding exactly the observations.
    pub fn default_model(&self) -> Model {
        self.observations.clone()
    }

    /// The times at which the searcher may change the value of `atom`.
    ///
    /// For an unobserved atom, everywhere; for an observed one, everywhere observation
    /// does not fix it --- or nowhere, when observed predicates are protected.
    pub fn modifiable_si_set(&self, atom: &Atom) -> SISet {
        let everywhere = SISet::from_span_interval(
            SpanInterval::liquid(self.max_interval.start, self.max_interval.finish),
            true,
            self.max_interval,
        );

        match self.obs_preds_fixed_at.get(&atom.predicate) {
            None => everywhere,
            Some(_) if self.dont_modify_obs_preds => SISet::new(true, self.max_interval),
            Some(fixed) => {
                let mut modifiable = everywhere;
                modifiable.subtract_set(fixed);
                modifiable
            }
        }
    }

    /// The pseudo-weight standing in for hardness.
    ///
    /// Large enough that violating a hard formula anywhere outweighs every soft formula
    /// together; adjustable for problems where the default is too blunt.
    pub fn hard_factor(&self) -> f64 {
        match self.hard_factor {
            Some(factor) => factor,
            None => {
                let soft_total: f64 = self.formulas.iter().filter_map(|f| f.weight).sum();
                1.0 + soft_total * self.max_interval.length() as f64
            }
        }
    }

    pub fn set_hard_factor(&mut self, factor: Option<f64>) {
        self.hard_factor = factor;
    }

    /// A domain identical to `self` except every hard formula is given the
    /// [hard_factor](Domain::hard_factor) as an ordinary weight.
    ///
    /// The searcher scores against this domain, turning optimisation under hard
    /// constraints into pure max-sum.
    pub fn with_hard_weights(&self) -> Domain {
        let factor = self.hard_factor();
        let mut weighted = self.clone();
        for formula in &mut weighted.formulas {
            if formula.weight.is_none() {
                formula.weight = Some(factor);
            }
        }
        weighted
    }

    /// The quantification of a formula: its own, or everywhere.
    pub fn quantification_of(&self, formula: &WeightedFormula) -> SISet {
        match &formula.quantification {
            Some(quantification) => quantification.clone(),
            None => self.max_si_set(),
        }
    }

    /// The weighted contribution of one formula under a model.
    ///
    /// A soft formula earns its weight for every interval of its quantification on which
    /// it holds.
    /// A hard formula is all or nothing: the full pseudo-weighted quantification when
    /// fully satisfied, and zero otherwise.
    pub fn score_of(&self, formula: &WeightedFormula, model: &Model) -> f64 {
        let satisfied = self.satisfied_at(&formula.sentence, model);
        let quantification = self.quantification_of(formula);

        match formula.weight {
            Some(weight) => {
                let overlap = siset::intersection(&satisfied, &quantification);
                let measure = match quantification.force_liquid() {
                    true => overlap.liq_size(),
                    false => overlap.size(),
                };
                weight * measure as f64
            }
            None => match satisfied.includes(&quantification) {
                true => self.hard_factor() * quantification.size() as f64,
                false => 0.0,
            },
        }
    }

    /// The total score of a model: the sum of per-formula contributions.
    pub fn score(&self, model: &Model) -> f64 {
        self.formulas
            .iter()
            .map(|formula| self.score_of(formula, model))
            .sum()
    }

    /// Whether a formula holds over its whole quantification.
    pub fn formula_satisfied(&self, formula: &WeightedFormula, model: &Model) -> bool {
        let satisfied = self.satisfied_at(&formula.sentence, model);
        satisfied.includes(&self.quantification_of(formula))
    }

    /// Whether every formula holds over its whole quantification.
    pub fn is_fully_satisfied(&self, model: &Model) -> bool {
        self.formulas
            .iter()
            .all(|formula| self.formula_satisfied(formula, model))
    }
}

#[cfg(test)]
mod domain_tests {
    use super::*;
    use crate::structures::sentence::Sentence;

    fn p() -> Atom {
        Atom::ground("p", &["a"])
    }

    fn q() -> Atom {
        Atom::ground("q", &["a"])
    }

    #[test]
    fn no_facts_is_an_error() {
        let built = Domain::build(&[], vec![], true);
        assert_eq!(
            built.err(),
            Some(err::ErrorKind::from(DomainError::NoFacts))
        );
    }

    #[test]
    fn atoms_split_by_observation() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 4))];
        let formulas = vec![WeightedFormula::hard(Sentence::Disjunction(
            Box::new(Sentence::Negation(Box::new(Sentence::Atom(p())))),
            Box::new(Sentence::Atom(q())),
        ))];

        let domain = Domain::build(&facts, formulas, true).unwrap();

        assert!(domain.observed_atoms().contains(&p()));
        assert!(domain.unobserved_atoms().contains(&q()));
        assert_eq!(domain.max_interval(), Interval::new(0, 4));
    }

    #[test]
    fn observed_predicates_are_protected() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(2, 4))];
        let mut domain = Domain::build(&facts, vec![], true).unwrap();

        assert!(domain.modifiable_si_set(&p()).is_empty());
        assert_eq!(domain.modifiable_si_set(&q()).liq_size(), 3);

        domain.set_dont_modify_obs_preds(false);
        assert!(domain.modifiable_si_set(&p()).is_empty());
    }

    #[test]
    fn hard_factor_dominates_soft_weights() {
        let facts = [Fact::positive(p(), SpanInterval::liquid(0, 9))];
        let formulas = vec![
            WeightedFormula::soft(Sentence::Atom(p()), 3.0),
            WeightedFormula::hard(Sentence::Atom(q())),
        ];
        let domain = Domain::build(&facts, formulas, true).unwrap();

        assert_eq!(domain.hard_factor(), 1.0 + 3.0 * 10.0);

        let weighted = domain.with_hard_weights();
        assert_eq!(weighted.formulas()[1].weight, Some(31.0));
    }
}
