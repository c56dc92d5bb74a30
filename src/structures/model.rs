/*!
Models --- assignments of truth-times to atoms.

A model maps each ground atom to the [SISet](crate::structures::siset::SISet) of times at which it is true.
Atoms absent from the map are false everywhere.
Entries are liquid: an atom's truth is a property of time points, and the interval-level reading of an entry is taken by the evaluator through the spanning form.

The map is ordered by atom, so iteration --- and with it every downstream stochastic
choice --- is deterministic.

A model prints one line per atom, `atom @ {…}`, the format the model reader of
[builder](crate::builder) parses back.
*/

use std::collections::BTreeMap;

use crate::structures::{atom::Atom, siset::SISet};

/// A mapping from ground atoms to the times at which they hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    atoms: BTreeMap<Atom, SISet>,
}

impl Model {
    /// An empty model: every atom false everywhere.
    pub fn new() -> Self {
        Model {
            atoms: BTreeMap::new(),
        }
    }

    /// The times at which `atom` is true, if any are recorded.
    ///
    /// An absent atom is false everywhere, which the caller observes as `None`.
    pub fn atom_at(&self, atom: &Atom) -> Option<&SISet> {
        self.atoms.get(atom)
    }

    /// Replaces the times at which `atom` is true.
    pub fn set_atom(&mut self, atom: Atom, times: SISet) {
        self.atoms.insert(atom, times);
    }

    /// Extends the times at which `atom` is true by `times`.
    pub fn assert_atom(&mut self, atom: Atom, times: &SISet) {
        match self.atoms.get_mut(&atom) {
            Some(existing) => existing.add_set(times),
            None => {
                self.atoms.insert(atom, times.clone());
            }
        }
    }

    /// Removes `within` from the times at which `atom` is true.
    pub fn unset_atom(&mut self, atom: &Atom, within: &SISet) {
        if let Some(existing) = self.atoms.get_mut(atom) {
            existing.subtract_set(within);
        }
    }

    /// Whether any atom is recorded.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The number of time points over which some atom is true.
    pub fn size(&self) -> u64 {
        self.atoms.values().map(SISet::liq_size).sum()
    }

    /// The recorded atoms and their times, in atom order.
    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &SISet)> {
        self.atoms.iter()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (atom, times) in &self.atoms {
            writeln!(f, "{atom} @ {times}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;
    use crate::structures::{interval::Interval, span_interval::SpanInterval};

    fn liquid_set(start: u32, finish: u32) -> SISet {
        SISet::from_span_interval(
            SpanInterval::liquid(start, finish),
            true,
            Interval::new(0, 10),
        )
    }

    #[test]
    fn assertion_and_retraction() {
        let mut model = Model::new();
        let p = Atom::ground("p", &["a"]);

        model.assert_atom(p.clone(), &liquid_set(0, 4));
        model.assert_atom(p.clone(), &liquid_set(5, 9));
        assert_eq!(model.atom_at(&p).unwrap().liq_size(), 10);

        model.unset_atom(&p, &liquid_set(3, 6));
        assert_eq!(model.atom_at(&p).unwrap().liq_size(), 6);

        assert_eq!(model.size(), 6);
    }

    #[test]
    fn rendering_is_line_per_atom() {
        let mut model = Model::new();
        model.set_atom(Atom::ground("q", &["b"]), liquid_set(1, 2));
        model.set_atom(Atom::ground("p", &["a"]), liquid_set(0, 0));

        assert_eq!(model.to_string(), "p(a) @ {[0:0]}\nq(b) @ {[1:2]}\n");
    }
}
