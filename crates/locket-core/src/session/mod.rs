//! Session domain module.
//!
//! Owns the authenticated identity and the status of auth operations.
//!
//! # Module Structure
//!
//! - `model`: session state types (`SessionStatus`, `SessionState`)
//! - `api`: backend capability trait (`AuthApi`)
//! - `repository`: token persistence trait (`TokenRepository`)
//! - `store`: the session state container (`SessionStore`)

mod api;
mod model;
mod repository;
mod store;


// Re-export public API
pub use api::AuthApi;
pub use model::{SessionState, SessionStatus};
pub use repository::TokenRepository;
pub use store::SessionStore;
