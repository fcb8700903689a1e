use serde::Serialize;

/// How hard a language is to pick up for a first-time programmer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A runnable "hello world" style example embedded in a language entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSnippet {
    pub title: &'static str,
    pub language: &'static str,
    /// Raw source text, may span several lines
    pub code: &'static str,
    pub explanation: &'static str,
}

/// External learning link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub label: &'static str,
    pub url: &'static str,
}

/// Language entity served by the catalog endpoints.
/// Every field borrows from compiled-in data, so entries can live in a `static` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub topics: &'static [&'static str],
    pub hello_world: CodeSnippet,
    pub tips: &'static [&'static str],
    pub resources: &'static [Resource],
}

impl Language {
    /// Case-insensitive substring match against the name or any topic.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .topics
                .iter()
                .any(|topic| topic.to_lowercase().contains(needle))
    }
}
