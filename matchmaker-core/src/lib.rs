//! Core types, recommendation engine, and service wiring for Maintenance Matchmaker.

/// Recommendation derivation over a schedule.
pub mod engine;
/// Quote text and display formatting.
pub mod export;
/// Domain models shared by providers and clients.
pub mod model;
/// Traits and errors describing schedule sources.
pub mod ports;
/// User selection of recommended services.
pub mod selection;
/// High-level service facade used by clients.
pub mod service;
/// Parsing of raw vehicle form input.
pub mod validation;

pub use engine::*;
pub use export::*;
pub use model::*;
pub use ports::*;
pub use selection::*;
pub use service::*;
pub use validation::*;
