//! workspace-recs library
//!
//! Review and toggle the "workspace recommendations" prompt of VS Code-family
//! editors across every project they remember.
//!
//! The [`session`] module holds the editing state: the project list, the
//! batch of pending toggles, and the filtered view. [`vscode`] implements the
//! [`backend::ProjectBackend`] boundary over the editor's workspace storage.

pub mod backend;
pub mod config;
pub mod project;
pub mod session;
pub mod vscode;
