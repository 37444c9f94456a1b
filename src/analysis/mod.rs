//! Analysis orchestration.

pub mod aggregator;

pub use aggregator::*;
