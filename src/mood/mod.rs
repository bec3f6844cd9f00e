pub mod analyzer;
pub mod profile;

#[cfg(test)]
mod analyzer_tests;

pub use analyzer::*;
pub use profile::*;
