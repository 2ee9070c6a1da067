//! Marker traits for CQRS request kinds.

/// Read-only request. Queries never modify the catalog.
pub trait Query {}
