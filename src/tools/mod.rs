//! Auxiliary dataset tools built on the core engine.

pub mod labels;
pub mod sample;
pub mod trends;
