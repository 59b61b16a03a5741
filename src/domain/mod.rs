//! Domain Layer
//!
//! The build pipeline's core types without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Compilation entries and the entry registry
//! - `value_objects/` - Outcomes, build report, content hash
//! - `services/` - Import resolution, lexical path normalization
//! - `ports/` - Traits for the external engines (SCSS, transform, lint, minify, log sink)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
