//! SWITCHBOARD Intent - Query Processing
//!
//! Converts a free-form operator utterance plus a context snapshot into a
//! structured [`switchboard_core::Intent`]. The whole pipeline is
//! deterministic: identical text and context always produce identical
//! entities, classification, and confidence.

pub mod classify;
pub mod entities;
pub mod normalize;
pub mod processor;

pub use processor::QueryProcessor;
