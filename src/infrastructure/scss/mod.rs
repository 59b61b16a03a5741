//! SCSS transpilation

mod grass_engine;

pub use grass_engine::{parse_diagnostic, GrassEngine};
