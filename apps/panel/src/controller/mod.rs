//! Controller layer: panel events, input parsing, model reduction and command orchestration.

pub mod events;
pub mod input;
pub mod orchestration;
pub mod reducer;
