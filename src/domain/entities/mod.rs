//! Domain Entities
//!
//! - `Entry` - One source → output compilation job
//! - `EntryRegistry` - Ordered list of entries for a build session

mod entry;
mod registry;

pub use entry::{output_file_name, Entry};
pub use registry::EntryRegistry;
