/*!
Terms --- the leaves of the formula language.

A term is either a constant, naming an object of the domain, or a variable.
Variables carry an identifier so fresh copies of a variable can be told apart, though the input grammar is restricted to ground formulas and the parsers reject files containing variables.
*/

/// A term of the formula language.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// A named object of the domain.
    Constant(String),

    /// A named variable, with an identifier distinguishing fresh copies.
    Variable(String, u32),
}

impl Term {
    /// The name of the term.
    pub fn name(&self) -> &str {
        match self {
            Term::Constant(name) => name,
            Term::Variable(name, _) => name,
        }
    }

    /// Whether the term is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Constant(name) => write!(f, "{name}"),
            Term::Variable(name, _) => write!(f, "?{name}"),
        }
    }
}
