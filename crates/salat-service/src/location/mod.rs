//! Turning form input into a (city, country) pair.

pub mod resolver;

pub use resolver::{LocationMode, LocationRequest, LocationResolver, ResolvedLocation};
