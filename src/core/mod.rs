//! Core domain models
//!
//! Remote resource definitions, naming rules, the id remapping table and
//! the exporter configuration.

pub mod config;
pub mod naming;
pub mod remap;
pub mod resource;

pub use remap::IdRemapper;
pub use resource::*;
