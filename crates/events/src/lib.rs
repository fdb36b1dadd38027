//! Domain events emitted by point-of-sale operations.

pub mod event;

pub use event::Event;
