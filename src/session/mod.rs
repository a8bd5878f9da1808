//! Session state — per-respondent progress held in process memory.
//!
//! Sessions are never persisted locally; durability belongs entirely to the
//! spreadsheet store. A session that outlives the idle timeout is evicted
//! and the respondent starts over.

pub mod model;
pub mod store;

pub use model::{Response, Session};
pub use store::{SessionStore, spawn_eviction_task};
