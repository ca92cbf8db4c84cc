//! Shared Iqama and reminder offset configuration.

pub mod store;

pub use store::{OffsetSnapshot, OffsetStore, OffsetUpdate};
