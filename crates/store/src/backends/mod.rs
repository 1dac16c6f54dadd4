//! Storage backend implementations.
//!
//! Only the in-memory backend ships with this crate; production deployments
//! implement [`crate::ContentStore`] over their own storage.

pub mod memory;
