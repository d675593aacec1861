pub mod config_storage;
pub mod http_api;
pub mod paths;
pub mod profile_repository;
pub mod storage;
pub mod token_repository;

pub use crate::config_storage::ConfigStorage;
pub use crate::http_api::HttpAuthApi;
pub use crate::profile_repository::JsonProfileRepository;
pub use crate::token_repository::JsonTokenRepository;
