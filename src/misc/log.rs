/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [satisfaction evaluator](crate::procedures::satisfaction).
    pub const SATISFACTION: &str = "satisfaction";

    /// Logs related to the [search loop](crate::procedures::walk_sat).
    pub const SEARCH: &str = "search";

    /// Logs related to [move generation](crate::procedures::moves).
    pub const MOVES: &str = "moves";

    /// Logs related to [domain](crate::domain) construction.
    pub const DOMAIN: &str = "domain";

    /// Logs related to the [parsers](crate::builder).
    pub const PARSER: &str = "parser";

    /// Logs related to [preprocessing](crate::procedures::preprocessing).
    pub const PREPROCESSING: &str = "preprocessing";
}
