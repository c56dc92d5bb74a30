/*!
Sentences --- the formula AST.

A sentence is one of six kinds: an atom, a boolean literal, a negation, a disjunction, a relation-annotated conjunction, a relation-annotated diamond, or a liquid block.
Sentences are pure, immutable data; the [satisfaction evaluator](crate::procedures::satisfaction) walks them by structural recursion and nothing else inspects them.

Two classification predicates support preprocessing:

- [is_simple_literal]: an atom or a negated atom.
- [is_pel_cnf_literal]: the literal shapes of the clausal normal form the preprocessor targets.

Sub-sentences are held by box; trees are small (typically well under 32 nodes) and built once by the parser.
*/

use std::collections::BTreeSet;

use crate::structures::{atom::Atom, interval::IntervalRelation};

/// A formula of the interval logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sentence {
    /// A predicate application.
    Atom(Atom),

    /// A boolean constant.
    BoolLit(bool),

    /// The negation of a sentence.
    Negation(Box<Sentence>),

    /// A disjunction of two sentences.
    Disjunction(Box<Sentence>, Box<Sentence>),

    /// A conjunction of two sentences, holding over the spans of pairs of intervals
    /// standing in one of the annotated relations.
    Conjunction(Box<Sentence>, Box<Sentence>, BTreeSet<IntervalRelation>),

    /// There is an interval, standing in one of the annotated relations to this one,
    /// over which the sub-sentence holds.
    DiamondOp(Box<Sentence>, BTreeSet<IntervalRelation>),

    /// A block evaluated in liquid (pointwise) semantics.
    LiquidOp(Box<Sentence>),
}

impl Sentence {
    /// The default relation set of an unannotated conjunction: equality, so both
    /// conjuncts hold over the interval itself.
    pub fn default_conjunction_relations() -> BTreeSet<IntervalRelation> {
        [IntervalRelation::Equals].into_iter().collect()
    }

    /// The default relation set of an unannotated diamond: every relation.
    pub fn default_diamond_relations() -> BTreeSet<IntervalRelation> {
        crate::structures::interval::ALL_RELATIONS.into_iter().collect()
    }

    /// Collects every atom mentioned by the sentence, in atom order.
    pub fn atoms(&self) -> BTreeSet<Atom> {
        let mut collected = BTreeSet::new();
        self.collect_atoms(&mut collected);
        collected
    }

    fn collect_atoms(&self, into: &mut BTreeSet<Atom>) {
        match self {
            Sentence::Atom(atom) => {
                into.insert(atom.clone());
            }
            Sentence::BoolLit(_) => {}
            Sentence::Negation(inner) | Sentence::LiquidOp(inner) | Sentence::DiamondOp(inner, _) => {
                inner.collect_atoms(into)
            }
            Sentence::Disjunction(left, right) | Sentence::Conjunction(left, right, _) => {
                left.collect_atoms(into);
                right.collect_atoms(into);
            }
        }
    }

    /// Whether every mentioned atom is ground.
    pub fn is_ground(&self) -> bool {
        self.atoms().iter().all(Atom::is_ground)
    }

    /// Binding strength for rendering: higher binds tighter.
    fn precedence(&self) -> u8 {
        match self {
            Sentence::Atom(_) | Sentence::BoolLit(_) | Sentence::LiquidOp(_) => 4,
            Sentence::Negation(_) | Sentence::DiamondOp(_, _) => 3,
            Sentence::Conjunction(_, _, _) => 2,
            Sentence::Disjunction(_, _) => 1,
        }
    }

    fn fmt_child(&self, child: &Sentence, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match child.precedence() < self.precedence() {
            true => write!(f, "({child})"),
            false => write!(f, "{child}"),
        }
    }
}

fn fmt_relations(
    relations: &BTreeSet<IntervalRelation>,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    if relations.len() == crate::structures::interval::ALL_RELATIONS.len() {
        return write!(f, "{{*}}");
    }
    write!(f, "{{")?;
    for (index, rel) in relations.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{rel}")?;
    }
    write!(f, "}}")
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentence::Atom(atom) => write!(f, "{atom}"),
            Sentence::BoolLit(true) => write!(f, "true"),
            Sentence::BoolLit(false) => write!(f, "false"),
            Sentence::Negation(inner) => {
                write!(f, "!")?;
                self.fmt_child(inner, f)
            }
            Sentence::Disjunction(left, right) => {
                self.fmt_child(left, f)?;
                write!(f, " v ")?;
                self.fmt_child(right, f)
            }
            Sentence::Conjunction(left, right, relations) => {
                self.fmt_child(left, f)?;
                write!(f, " ^")?;
                fmt_relations(relations, f)?;
                write!(f, " ")?;
                self.fmt_child(right, f)
            }
            Sentence::DiamondOp(inner, relations) => {
                write!(f, "<>")?;
                fmt_relations(relations, f)?;
                write!(f, " ")?;
                self.fmt_child(inner, f)
            }
            Sentence::LiquidOp(inner) => write!(f, "[ {inner} ]"),
        }
    }
}

/// Whether the sentence is an atom or a negated atom.
pub fn is_simple_literal(sentence: &Sentence) -> bool {
    match sentence {
        Sentence::Atom(_) => true,
        Sentence::Negation(inner) => matches!(inner.as_ref(), Sentence::Atom(_)),
        _ => false,
    }
}

/// Whether the sentence is a literal of the clausal form the preprocessor targets.
///
/// The literal shapes are: an atom, a boolean constant, a liquid block, a negation of one
/// of those or of a diamond, a diamond over an atom, boolean constant, or liquid block,
/// and a conjunction of two atoms or boolean constants.
pub fn is_pel_cnf_literal(sentence: &Sentence) -> bool {
    fn atomic(sentence: &Sentence) -> bool {
        matches!(
            sentence,
            Sentence::Atom(_) | Sentence::BoolLit(_) | Sentence::LiquidOp(_)
        )
    }

    match sentence {
        _ if atomic(sentence) => true,

        Sentence::Negation(inner) => match inner.as_ref() {
            Sentence::Negation(doubly) => {
                atomic(doubly) || matches!(doubly.as_ref(), Sentence::DiamondOp(_, _))
            }
            inner => is_pel_cnf_literal(inner),
        },

        Sentence::DiamondOp(inner, _) => atomic(inner),

        Sentence::Conjunction(left, right, _) => {
            let conjunct = |s: &Sentence| matches!(s, Sentence::Atom(_) | Sentence::BoolLit(_));
            conjunct(left) && conjunct(right)
        }

        _ => false,
    }
}

#[cfg(test)]
mod sentence_tests {
    use super::*;

    fn p() -> Sentence {
        Sentence::Atom(Atom::ground("p", &["a"]))
    }

    fn q() -> Sentence {
        Sentence::Atom(Atom::ground("q", &["a"]))
    }

    #[test]
    fn literal_classification() {
        assert!(is_simple_literal(&p()));
        assert!(is_simple_literal(&Sentence::Negation(Box::new(p()))));
        assert!(!is_simple_literal(&Sentence::Disjunction(
            Box::new(p()),
            Box::new(q())
        )));

        let diamond = Sentence::DiamondOp(
            Box::new(p()),
            [IntervalRelation::Meets].into_iter().collect(),
        );
        assert!(is_pel_cnf_literal(&diamond));
        assert!(is_pel_cnf_literal(&Sentence::Negation(Box::new(diamond.clone()))));
        assert!(is_pel_cnf_literal(&Sentence::Negation(Box::new(
            Sentence::Negation(Box::new(diamond))
        ))));
        assert!(!is_pel_cnf_literal(&Sentence::Disjunction(
            Box::new(p()),
            Box::new(q())
        )));
    }

    #[test]
    fn rendering_respects_precedence() {
        let implication = Sentence::Disjunction(
            Box::new(Sentence::Negation(Box::new(p()))),
            Box::new(q()),
        );
        assert_eq!(implication.to_string(), "!p(a) v q(a)");

        let grouped = Sentence::Negation(Box::new(Sentence::Disjunction(
            Box::new(p()),
            Box::new(q()),
        )));
        assert_eq!(grouped.to_string(), "!(p(a) v q(a))");

        let meets = Sentence::Conjunction(
            Box::new(p()),
            Box::new(q()),
            [IntervalRelation::Meets].into_iter().collect(),
        );
        assert_eq!(meets.to_string(), "p(a) ^{m} q(a)");
    }

    #[test]
    fn atom_collection_is_ordered() {
        let sentence = Sentence::Disjunction(Box::new(q()), Box::new(p()));
        let names: Vec<String> = sentence.atoms().iter().map(Atom::to_string).collect();
        assert_eq!(names, vec!["p(a)", "q(a)"]);
    }
}
