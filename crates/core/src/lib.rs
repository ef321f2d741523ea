//! `coffeetek-core`: shared building blocks for the POS backend.
//!
//! This crate contains **pure** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{CategoryId, ModifierGroupId, ModifierId, PriceId, ProductId};
