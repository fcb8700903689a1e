use crate::error::ApiError;
use crate::models::{CodeSnippet, Difficulty, Language, Resource};

/// Compiled-in catalog, served in declaration order.
pub static LANGUAGES: [Language; 4] = [
    Language {
        id: "python",
        name: "Python",
        description: "Friendly, readable, and great for beginners. Used for web, data, AI, scripts, and more.",
        difficulty: Difficulty::Easy,
        topics: &["Variables", "Loops", "Functions", "Lists", "Dictionaries"],
        hello_world: CodeSnippet {
            title: "Hello, World!",
            language: "python",
            code: "# hello.py\nprint('Hello, World!')",
            explanation: "Run with: python hello.py",
        },
        tips: &[
            "Use meaningful names: total_price, user_age",
            "Prefer f-strings for formatting",
            "Read errors from bottom-up: the final line often explains it",
        ],
        resources: &[
            Resource {
                label: "Official Docs",
                url: "https://docs.python.org/3/",
            },
            Resource {
                label: "W3Schools",
                url: "https://www.w3schools.com/python/",
            },
        ],
    },
    Language {
        id: "c",
        name: "C",
        description: "Low-level power and speed. Great for understanding how computers work.",
        difficulty: Difficulty::Medium,
        topics: &["Compilation", "Pointers", "Arrays", "Structs", "Headers"],
        hello_world: CodeSnippet {
            title: "Hello, World!",
            language: "c",
            code: "// hello.c\n#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}",
            explanation: "Compile with: gcc hello.c -o hello\nRun: ./hello",
        },
        tips: &[
            "Always initialize your variables",
            "Check return values of functions like malloc and fopen",
            "Use -Wall -Wextra flags with gcc to catch bugs early",
        ],
        resources: &[
            Resource {
                label: "C Reference",
                url: "https://en.cppreference.com/w/c",
            },
            Resource {
                label: "Learn C",
                url: "https://www.learn-c.org/",
            },
        ],
    },
    Language {
        id: "cpp",
        name: "C++",
        description: "C with high-level features: OOP, templates, and the STL.",
        difficulty: Difficulty::Medium,
        topics: &["Classes", "Vectors", "References", "STL", "Templates"],
        hello_world: CodeSnippet {
            title: "Hello, World!",
            language: "cpp",
            code: "// hello.cpp\n#include <iostream>\nusing namespace std;\n\nint main() {\n    cout << \"Hello, World!\" << endl;\n    return 0;\n}",
            explanation: "Compile with: g++ hello.cpp -o hello\nRun: ./hello",
        },
        tips: &[
            "Prefer std::vector over raw arrays",
            "Use references (T&) to avoid unnecessary copies",
            "Learn RAII to manage resources safely",
        ],
        resources: &[
            Resource {
                label: "cppreference",
                url: "https://en.cppreference.com/w/",
            },
            Resource {
                label: "Learn C++",
                url: "https://www.learncpp.com/",
            },
        ],
    },
    Language {
        id: "html",
        name: "HTML & CSS",
        description: "The building blocks of the web: structure (HTML) and style (CSS).",
        difficulty: Difficulty::Easy,
        topics: &["Tags", "Attributes", "Semantic HTML", "Selectors", "Flexbox", "Grid"],
        hello_world: CodeSnippet {
            title: "A simple page",
            language: "html",
            code: "<!-- index.html -->\n<!doctype html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"UTF-8\" />\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n    <title>Hello</title>\n  </head>\n  <body>\n    <h1>Hello, World!</h1>\n    <p>Welcome to the web!</p>\n  </body>\n</html>",
            explanation: "Open the file in your browser. Use VS Code Live Server for quick reloads.",
        },
        tips: &[
            "Use semantic tags: header, nav, main, section, footer",
            "Mobile-first: start with small screens, then add @media rules",
            "Use CSS Flexbox/Grid for layout instead of floats",
        ],
        resources: &[
            Resource {
                label: "MDN Web Docs",
                url: "https://developer.mozilla.org/en-US/",
            },
            Resource {
                label: "Flexbox Froggy",
                url: "https://flexboxfroggy.com/",
            },
        ],
    },
];

/// Read-only view over the language table.
/// `Copy` so it can sit in the shared router state without an `Arc`.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [Language],
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Catalog {
            entries: &LANGUAGES,
        }
    }

    /// Every entry, in declaration order.
    pub fn list_all(&self) -> &'static [Language] {
        self.entries
    }

    /// Filters by name or topic, ignoring case and surrounding whitespace.
    /// A missing or blank query returns the whole catalog unfiltered.
    pub fn search(&self, query: Option<&str>) -> Vec<&'static Language> {
        let needle = query.map(str::trim).unwrap_or_default().to_lowercase();

        if needle.is_empty() {
            return self.entries.iter().collect();
        }

        self.entries
            .iter()
            .filter(|language| language.matches(&needle))
            .collect()
    }

    /// Exact, case-sensitive lookup on `id`.
    pub fn get_by_id(&self, id: &str) -> Result<&'static Language, ApiError> {
        self.entries
            .iter()
            .find(|language| language.id == id)
            .ok_or_else(|| ApiError::not_found("Language"))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids(languages: &[&Language]) -> Vec<&'static str> {
        languages.iter().map(|language| language.id).collect()
    }

    #[test]
    fn test_list_all_returns_declaration_order() {
        let catalog = Catalog::builtin();
        let all: Vec<&str> = catalog.list_all().iter().map(|l| l.id).collect();

        assert_eq!(catalog.len(), 4);
        assert_eq!(all, vec!["python", "c", "cpp", "html"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let unique: HashSet<&str> = LANGUAGES.iter().map(|l| l.id).collect();
        assert_eq!(unique.len(), LANGUAGES.len());
    }

    #[test]
    fn test_get_by_id_finds_every_seeded_entry() {
        let catalog = Catalog::builtin();
        for id in ["python", "c", "cpp", "html"] {
            let language = catalog.get_by_id(id).expect("seeded id should resolve");
            assert_eq!(language.id, id);
        }
    }

    #[test]
    fn test_get_by_id_miss_is_not_found() {
        let catalog = Catalog::builtin();

        assert!(matches!(
            catalog.get_by_id("nonexistent"),
            Err(ApiError::NotFound("Language"))
        ));
        // Lookup is case-sensitive
        assert!(catalog.get_by_id("Python").is_err());
        assert!(catalog.get_by_id("").is_err());
    }

    #[test]
    fn test_search_without_query_returns_everything() {
        let catalog = Catalog::builtin();
        let expected: Vec<&Language> = catalog.list_all().iter().collect();

        assert_eq!(catalog.search(None), expected);
        assert_eq!(catalog.search(Some("")), expected);
        assert_eq!(catalog.search(Some("   ")), expected);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.search(Some("PY"))), vec!["python"]);
        assert_eq!(ids(&catalog.search(Some("  css "))), vec!["html"]);
    }

    #[test]
    fn test_search_matches_topics() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.search(Some("loops"))), vec!["python"]);
        assert_eq!(ids(&catalog.search(Some("STL"))), vec!["cpp"]);
        assert_eq!(ids(&catalog.search(Some("flexbox"))), vec!["html"]);
    }

    #[test]
    fn test_search_preserves_order_without_duplicates() {
        let catalog = Catalog::builtin();
        // "c" hits every entry through names or topics; each appears once, in order
        assert_eq!(
            ids(&catalog.search(Some("c"))),
            vec!["python", "c", "cpp", "html"]
        );
        assert_eq!(ids(&catalog.search(Some("c++"))), vec!["cpp"]);
    }

    #[test]
    fn test_search_with_no_hits_is_empty() {
        let catalog = Catalog::builtin();
        assert!(catalog.search(Some("haskell")).is_empty());
    }
}
