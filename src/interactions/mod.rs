//! Pairwise interaction resolution.
//!
//! `matcher` answers "do these two drugs interact?" against an indexed
//! table; `expander` runs the matcher over every unordered pair of a
//! regimen and orders the hits by severity. Both are pure and never touch
//! the network.

pub mod expander;
pub mod matcher;

pub use expander::*;
pub use matcher::*;
