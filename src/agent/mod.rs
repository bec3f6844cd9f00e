pub mod commands;
pub mod format;
pub mod recommender;


pub use recommender::*;
