//! Options of the CLI itself, as opposed to the search configuration.

/// Front-end options with no counterpart in the library configuration.
#[derive(Debug, Default)]
pub struct CliConfig {
    /// Score the default model and stop, without searching.
    pub eval_model: bool,

    /// Where to write the best model, beside printing it.
    pub output: Option<String>,

    /// Where to write the per-move score trace as CSV.
    pub datafile: Option<String>,

    /// An override for the upper bound of the universe.
    pub max: Option<u32>,

    /// An override for the lower bound of the universe.
    pub min: Option<u32>,
}
