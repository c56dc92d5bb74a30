/*!
Configuration of a search.

All configuration for a search is contained within a [Config].
The front end builds one from its arguments; library callers fill the fields directly.
*/

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The iteration budget of a search.
    pub iterations: u64,

    /// The probability of taking a random move rather than the greedy one.
    pub random_move_probability: f64,

    /// The seed of the search's generator.
    ///
    /// A seed fixes the whole trajectory of a search.
    pub seed: u64,

    /// An override for the hard-formula pseudo-weight.
    ///
    /// By default the weight is derived from the soft weights and the universe, large
    /// enough that a hard violation outweighs every soft gain.
    pub hard_factor: Option<f64>,

    /// Read unmentioned times of observed atoms as false, rather than unknown.
    pub assume_closed_world: bool,

    /// Fold hard simple-literal formulas into the observations before searching.
    pub unit_propagation: bool,
}

impl Default for Config {
    /// Defaults matched to the front end: a thousand iterations, a quarter of moves
    /// random, and a fixed seed for reproducible runs.
    fn default() -> Self {
        Config {
            iterations: 1000,
            random_move_probability: 0.25,
            seed: 0,
            hard_factor: None,
            assume_closed_world: true,
            unit_propagation: false,
        }
    }
}
