//! Derivation of common name subsets from the combined table
//!
//! Both filters read the combined table written by [`crate::collect`]
//! independently, and write their results as tables with the same schema.

pub mod absolute;
pub mod relative;
