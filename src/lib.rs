//! Cascade
//!
//! Cascade is a configuration-driven discount engine: prioritised rules select discounts for a
//! purchase context and chain them into a single, explainable price.

pub mod calculator;
pub mod context;
pub mod discounts;
pub mod fixtures;
pub mod observer;
pub mod prelude;
pub mod receipt;
pub mod results;
pub mod rules;
pub mod utils;
