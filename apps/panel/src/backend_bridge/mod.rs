//! Bridge between the panel event thread and the dispatch worker.

pub mod commands;
pub mod runtime;
