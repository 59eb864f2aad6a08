//! # Repository Module
//!
//! SQL lives here and nowhere else.
//!
//! ## Available Repositories
//!
//! - [`local_storage::LocalStorageRepository`] - Key/value area holding the saved cart

pub mod local_storage;
