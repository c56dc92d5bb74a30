/*!
Reports for a search, and the writers for its artefacts.

A finished search is summarised by a [Report]; the best model prints in the
`atom @ {…}` format through [Model](crate::structures::model::Model)'s `Display`, and
[write_model] and [write_trace] put the model and the per-move score trace on disk.
*/

use std::io::Write;

use crate::{
    procedures::walk_sat::{SearchResult, TraceRow},
    structures::model::Model,
    types::err::{self},
};

/// High-level reports regarding a search.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Report {
    /// Every formula holds over its whole quantification in the best model.
    FullySatisfied,

    /// The iteration budget ran out with some formula still violated.
    BudgetExhausted,
}

impl From<&SearchResult> for Report {
    fn from(result: &SearchResult) -> Self {
        match result.fully_satisfied {
            true => Report::FullySatisfied,
            false => Report::BudgetExhausted,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::FullySatisfied => write!(f, "Fully satisfied"),
            Report::BudgetExhausted => write!(f, "Budget exhausted"),
        }
    }
}

/// Writes a model to `path` in the round-trippable `atom @ {…}` format.
pub fn write_model(path: &str, model: &Model) -> Result<(), err::ErrorKind> {
    let mut file = std::fs::File::create(path)?;
    write!(file, "{model}")?;
    Ok(())
}

/// Writes the score trace to `path` as CSV, one row per accepted move.
pub fn write_trace(path: &str, trace: &[TraceRow]) -> Result<(), err::ErrorKind> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "iteration,current_score,best_score")?;
    for row in trace {
        writeln!(
            file,
            "{},{},{}",
            row.iteration, row.current_score, row.best_score
        )?;
    }
    Ok(())
}
