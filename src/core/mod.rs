//! In-memory authoritative store and cursor helper.

/// Cursor position rules for navigation and deletion.
pub mod cursor;
/// Authoritative bounded record store.
pub mod store;
