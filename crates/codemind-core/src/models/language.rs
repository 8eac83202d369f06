// ABOUTME: Editor language and assistant mode enumerations
// ABOUTME: Carries display labels, editor syntax ids, and per-language starter templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Languages selectable in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Node.js
    JavaScript,
    /// Python 3
    Python,
    /// `OpenJDK`
    Java,
    /// GCC
    C,
}

impl Language {
    /// Every selectable language, in the order the picker shows them
    pub const ALL: [Self; 4] = [Self::JavaScript, Self::Java, Self::Python, Self::C];

    /// Wire name (also the history `language` column value)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::C => "c",
        }
    }

    /// Label shown in the language picker
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::C => "C",
        }
    }

    /// Syntax-highlighting id passed to the editor widget
    #[must_use]
    pub const fn syntax_id(self) -> &'static str {
        self.as_str()
    }

    /// Starter source seeded the first time a language is entered
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::JavaScript => {
                "function greet(name) {\n  console.log(\"Hello \" + name);\n}\n\ngreet(\"JavaScript\");"
            }
            Self::Java => {
                "public class Main {\n  public static void main(String[] args) {\n    System.out.println(\"Hello Java\");\n  }\n}"
            }
            Self::Python => "def greet(name):\n    print(\"Hello\", name)\n\ngreet(\"Python\")",
            Self::C => "#include <stdio.h>\n\nint main() {\n    printf(\"Hello C\");\n    return 0;\n}",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::JavaScript),
            "python" | "py" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "c" => Ok(Self::C),
            other => Err(AppError::unsupported_language(other)),
        }
    }
}

/// Assistant action selecting which instruction template is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    /// Find bugs and return fixed code
    Debug,
    /// Explain the code in plain language
    Explain,
    /// Write new code from a free-text prompt
    Generate,
}

impl AssistantMode {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Explain => "explain",
            Self::Generate => "generate",
        }
    }

    /// Whether the mode's input is the free-text prompt rather than the code
    #[must_use]
    pub const fn uses_prompt(self) -> bool {
        matches!(self, Self::Generate)
    }
}

impl fmt::Display for AssistantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "explain" => Ok(Self::Explain),
            "generate" => Ok(Self::Generate),
            other => Err(AppError::invalid_input(format!(
                "Unknown assistant mode '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip_names() {
        for language in Language::ALL {
            assert_eq!(language.as_str().parse::<Language>().ok(), Some(language));
        }
        assert!("rust".parse::<Language>().is_err());
    }

    #[test]
    fn test_templates_are_distinct() {
        assert!(Language::Python.template().contains("print"));
        assert!(Language::Java.template().contains("class Main"));
        assert_ne!(Language::C.template(), Language::JavaScript.template());
    }

    #[test]
    fn test_mode_uses_prompt() {
        assert!(AssistantMode::Generate.uses_prompt());
        assert!(!AssistantMode::Debug.uses_prompt());
        assert!(!AssistantMode::Explain.uses_prompt());
        assert!("refactor".parse::<AssistantMode>().is_err());
    }
}
