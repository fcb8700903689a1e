// Library root for the Beginner Coder API

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod state;

// Re-export commonly used types
pub use catalog::Catalog;
pub use db::{Database, DatabaseProbe, NullProbe, ProbeState};
pub use error::{ApiError, ProbeError};
pub use models::{CodeSnippet, Difficulty, Language, Resource};
pub use router::create_router;
pub use state::AppState;
