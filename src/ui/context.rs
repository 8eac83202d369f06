// ABOUTME: Shared application context for cross-cutting UI concerns
// ABOUTME: Theme selection and the signed-in identity, passed to components by reference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark scheme, used on first load
    #[default]
    Dark,
    /// Light scheme
    Light,
}

impl Theme {
    /// The other scheme
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(AppError::invalid_input(format!("Unknown theme '{other}'"))),
        }
    }
}

/// Cross-cutting state every component may read
///
/// Owned by the top-level shell and handed down; components never keep
/// their own copy of the theme or identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    /// Active colour scheme
    pub theme: Theme,
    /// Display name of the signed-in user, if any
    pub identity: Option<String>,
}

impl AppContext {
    /// Context with the given theme and no identity
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self {
            theme,
            identity: None,
        }
    }

    /// Attach a signed-in identity; blank names are ignored
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        let identity = identity.into();
        if !identity.trim().is_empty() {
            self.identity = Some(identity);
        }
        self
    }

    /// Flip between dark and light, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    /// Header greeting
    #[must_use]
    pub fn greeting(&self) -> String {
        self.identity
            .as_deref()
            .map_or_else(|| "Not signed in".to_owned(), |name| format!("Signed in as {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggles_back_and_forth() {
        let mut ctx = AppContext::default();
        assert_eq!(ctx.theme, Theme::Dark);
        assert_eq!(ctx.toggle_theme(), Theme::Light);
        assert_eq!(ctx.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn test_identity() {
        let ctx = AppContext::new(Theme::Light).with_identity("ada");
        assert_eq!(ctx.greeting(), "Signed in as ada");
        assert_eq!(AppContext::default().with_identity("  ").identity, None);
        assert!("blue".parse::<Theme>().is_err());
    }
}
