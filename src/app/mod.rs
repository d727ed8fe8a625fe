// Application layer: wires a configuration source to the pipeline for the binaries.

pub mod runner;

pub use runner::{report_failure, run};
