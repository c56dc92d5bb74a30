/*!
Weighted formulas.

A weighted formula pairs a [sentence](crate::structures::sentence::Sentence) with an optional weight and an optional quantification.

- A formula without a weight is *hard*: it must hold everywhere its quantification demands, and is enforced through a large pseudo-weight during search.
- The quantification is the set of intervals over which the formula is scored; a formula without one is scored everywhere inside the domain's universe.
*/

use crate::structures::{sentence::Sentence, siset::SISet};

/// A sentence with an optional weight and an optional quantification.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedFormula {
    /// The sentence.
    pub sentence: Sentence,

    /// The weight, or nothing for a hard formula.
    pub weight: Option<f64>,

    /// The intervals over which the formula is scored, or nothing for everywhere.
    pub quantification: Option<SISet>,
}

impl WeightedFormula {
    /// A soft formula with the given weight.
    pub fn soft(sentence: Sentence, weight: f64) -> Self {
        WeightedFormula {
            sentence,
            weight: Some(weight),
            quantification: None,
        }
    }

    /// A hard formula.
    pub fn hard(sentence: Sentence) -> Self {
        WeightedFormula {
            sentence,
            weight: None,
            quantification: None,
        }
    }

    /// The same formula, quantified over the given intervals.
    pub fn at(mut self, quantification: SISet) -> Self {
        self.quantification = Some(quantification);
        self
    }

    /// Whether the formula is hard.
    pub fn is_hard(&self) -> bool {
        self.weight.is_none()
    }
}

impl std::fmt::Display for WeightedFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.weight {
            Some(weight) => write!(f, "{weight}: {}", self.sentence)?,
            None => write!(f, "inf: {}", self.sentence)?,
        }
        if let Some(quantification) = &self.quantification {
            write!(f, " @ {quantification}")?;
        }
        Ok(())
    }
}
