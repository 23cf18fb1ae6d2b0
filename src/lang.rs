//! Language tags for fixture artifacts
//!
//! A fixture's source and target languages are inferred from file
//! extensions and handed to the transformation collaborator as tags.
//! The runner itself never parses any of these languages.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Language of a fixture artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Lang {
    Kotlin,
    Swift,
    Rust,
    TypeScript,
    Python,
    C,
    Java,
    Go,
}

impl Lang {
    /// Infer the language from a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Lang> {
        match ext {
            "kt" | "kts" => Some(Lang::Kotlin),
            "swift" => Some(Lang::Swift),
            "rs" => Some(Lang::Rust),
            "ts" => Some(Lang::TypeScript),
            "py" => Some(Lang::Python),
            "c" | "h" => Some(Lang::C),
            "java" => Some(Lang::Java),
            "go" => Some(Lang::Go),
            _ => None,
        }
    }

    /// Canonical file extension for this language
    pub fn extension(&self) -> &'static str {
        match self {
            Lang::Kotlin => "kt",
            Lang::Swift => "swift",
            Lang::Rust => "rs",
            Lang::TypeScript => "ts",
            Lang::Python => "py",
            Lang::C => "c",
            Lang::Java => "java",
            Lang::Go => "go",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Lang::Kotlin => "kotlin",
            Lang::Swift => "swift",
            Lang::Rust => "rust",
            Lang::TypeScript => "typescript",
            Lang::Python => "python",
            Lang::C => "c",
            Lang::Java => "java",
            Lang::Go => "go",
        };
        write!(f, "{}", name)
    }
}
