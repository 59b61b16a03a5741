//! CSS post-processing and minification

mod lightning;

pub use lightning::{browser_targets, map_to_json, LightningMinifier, LightningTransformer};
