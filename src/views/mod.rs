//! Display surfaces for presenter state

pub mod console;
pub mod json;

pub use console::ConsoleView;
pub use json::JsonView;
