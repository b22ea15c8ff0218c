//! VS Code-family workspace storage

pub mod folder_url;
pub mod state_db;
pub mod storage;

pub use storage::WorkspaceStorage;
