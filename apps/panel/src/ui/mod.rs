//! Terminal presentation: event loop and rendering.

pub mod app;

pub use app::PanelApp;
