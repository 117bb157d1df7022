//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity: two badges with the same variant are the same
/// badge. They are immutable and cheap to clone.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Badge { New, Sale }
///
/// impl ValueObject for Badge {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
