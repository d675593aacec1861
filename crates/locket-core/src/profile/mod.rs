//! Profile domain module.
//!
//! Maintains the editable, persisted projection of the user's profile,
//! reconciled against the session store's authenticated user.
//!
//! # Module Structure
//!
//! - `model`: profile projection types (`Profile`, `ProfileStatus`)
//! - `repository`: snapshot persistence trait (`ProfileRepository`)
//! - `store`: the profile state container (`ProfileStore`)

mod model;
mod repository;
mod store;


// Re-export public API
pub use model::{DEFAULT_PROFILE_PICTURE, Profile, ProfileStatus};
pub use repository::ProfileRepository;
pub use store::ProfileStore;
