//! `fruitshop-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no persistence).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::{InvoiceId, SessionId};
pub use money::Money;
pub use value_object::ValueObject;
