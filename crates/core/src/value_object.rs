//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values.
/// `Money { paise: 15000 }` is a value object; an inventory `Item` is an entity
/// (two items with the same name are the same item, whatever their stock).
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
