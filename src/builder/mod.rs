/*!
Reads the input languages into a [Domain].

Three readers share the [lexer]:

- [facts]: the fact file --- preamble declarations and timed ground facts.
- [formulas]: the formula file --- the same preamble plus weighted formulas.
- [model]: the `atom @ {…}` model format, which round-trips with
  [Model](crate::structures::model::Model)'s `Display`.

[load_domain] ties them together: both files are parsed, their preambles merged, fact
arities checked against the declared signatures, and the result assembled into a
[Domain].

The grammar is restricted to ground formulas; a variable anywhere is a parse error.
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    domain::Domain,
    misc::log::targets,
    types::err::{self, DomainError},
};

pub mod facts;
pub mod formulas;
pub mod lexer;
pub mod model;

/// The sort and predicate declarations of a preamble.
///
/// `type: sort = { a, b }` declares a sort and its objects; `type: pred(sort, …)`
/// declares a predicate signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preamble {
    /// Object sorts, by name.
    pub sorts: BTreeMap<String, BTreeSet<String>>,

    /// Predicate signatures, by name.
    pub signatures: BTreeMap<String, Vec<String>>,
}

impl Preamble {
    /// Folds another preamble into this one, later declarations replacing earlier.
    pub fn merge(&mut self, other: Preamble) {
        for (name, objects) in other.sorts {
            if self.sorts.insert(name.clone(), objects).is_some() {
                log::warn!(target: targets::PARSER, "sort {name} declared twice, using the later declaration");
            }
        }
        for (name, signature) in other.signatures {
            if self.signatures.insert(name.clone(), signature).is_some() {
                log::warn!(target: targets::PARSER, "predicate {name} declared twice, using the later declaration");
            }
        }
    }
}

/// Parses a fact file and a formula file and assembles the domain.
pub fn load_domain(
    facts_text: &str,
    formulas_text: &str,
    assume_closed_world: bool,
) -> Result<Domain, err::ErrorKind> {
    let (mut preamble, facts) = facts::parse_fact_file(facts_text)?;
    let (formula_preamble, formulas) = formulas::parse_formula_file(formulas_text)?;
    preamble.merge(formula_preamble);

    for fact in &facts {
        if let Some(signature) = preamble.signatures.get(&fact.atom.predicate) {
            if signature.len() != fact.atom.arity() {
                return Err(err::ErrorKind::from(DomainError::ArityMismatch {
                    predicate: fact.atom.predicate.clone(),
                    declared: signature.len(),
                    used: fact.atom.arity(),
                }));
            }
        }
    }

    log::info!(
        target: targets::PARSER,
        "{} facts, {} formulas",
        facts.len(),
        formulas.len()
    );

    Domain::build(&facts, formulas, assume_closed_world)
}
