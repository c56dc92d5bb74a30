/*!
Atoms --- predicate applications.

An atom pairs a predicate name with an ordered list of [terms](crate::structures::term::Term), and is *ground* when every term is a constant.
Ground atoms are the variables of the search: a model assigns each one the set of times over which it holds.

Atoms are totally ordered by their rendered form.
The order matters: the searcher and the evaluator iterate atom collections, and a stable order keeps a seeded run deterministic.
*/

use crate::structures::term::Term;

/// A predicate applied to an ordered list of terms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Atom {
    /// The predicate name.
    pub predicate: String,

    /// The arguments, in application order.
    pub terms: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: impl Into<String>, terms: Vec<Term>) -> Self {
        Atom {
            predicate: predicate.into(),
            terms,
        }
    }

    /// An atom over constants, the common case of the test suite and the fact files.
    pub fn ground(predicate: impl Into<String>, constants: &[&str]) -> Self {
        Atom {
            predicate: predicate.into(),
            terms: constants
                .iter()
                .map(|name| Term::Constant((*name).to_owned()))
                .collect(),
        }
    }

    /// The number of arguments.
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Whether every term is a constant.
    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(Term::is_constant)
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (index, term) in self.terms.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, ")")
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    /// Predicate name first, then arguments --- the order atoms print in.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.predicate
            .cmp(&other.predicate)
            .then_with(|| self.terms.cmp(&other.terms))
    }
}

#[cfg(test)]
mod atom_tests {
    use super::*;

    #[test]
    fn groundness() {
        let ground = Atom::ground("holds", &["a", "b"]);
        assert!(ground.is_ground());
        assert_eq!(ground.arity(), 2);

        let open = Atom::new(
            "holds",
            vec![Term::Constant("a".to_owned()), Term::Variable("x".to_owned(), 0)],
        );
        assert!(!open.is_ground());
    }

    #[test]
    fn rendering() {
        assert_eq!(Atom::ground("p", &["a"]).to_string(), "p(a)");
        assert_eq!(Atom::ground("q", &[]).to_string(), "q()");
    }
}
