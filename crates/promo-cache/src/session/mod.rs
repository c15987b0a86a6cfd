//! Session storage module.
//!
//! Tracks the single live session per principal so a fresh sign-in
//! invalidates tokens issued earlier.

mod session_store;

pub use session_store::{SessionData, SessionStore};
