// Models module

pub mod language;

// Re-export commonly used types
pub use language::{CodeSnippet, Difficulty, Language, Resource};
