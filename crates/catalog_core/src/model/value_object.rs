//! Value object marker.

use std::fmt::Debug;

/// Marker for immutable data compared by value rather than by identity.
///
/// Two value objects with equal fields are interchangeable. Implementors get
/// structural equality from `PartialEq`, usually derived.
pub trait ValueObject: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl ValueObject for String {}
