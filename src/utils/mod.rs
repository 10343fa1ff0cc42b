//! Host-side helpers.

pub mod bootstrap;

pub use bootstrap::init_tracing;
