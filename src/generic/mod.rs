//! Generic structures, not tied to the logic.

pub mod random;
