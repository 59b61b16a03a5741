//! Common test utilities for kaba-scss integration tests.
//!
//! This module provides:
//! - `TestProject`: Isolated project directory with helpers to build it
//! - Fixtures: Reusable SCSS sources

#![allow(dead_code)]

pub mod fixtures;
pub mod project;

pub use fixtures::*;
pub use project::*;
