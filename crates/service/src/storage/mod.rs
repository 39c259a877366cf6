//! Storage backends that live outside the database.
//!
//! `memory` keeps both tables in process maps and is used by tests and by
//! the `memory` storage backend.

pub mod memory;
