//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Saram`s
/// holding the same digits are the same SARAM. They are validated once, at
/// construction, and never mutated afterwards.
///
/// ```ignore
/// let a: Saram = "123456-0".parse()?;
/// let b: Saram = "1234560".parse()?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
