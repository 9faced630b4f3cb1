//! Light/dark theme flag.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use techstore_cache::Cache;

use crate::document::Document;
use crate::error::UiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Read a stored flag. Only `"dark"` selects the dark theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Switches the body class and remembers the choice.
pub struct ThemeController {
    document: Rc<dyn Document>,
    cache: Cache,
    key: String,
    dark_class: String,
}

impl ThemeController {
    pub fn new(
        document: Rc<dyn Document>,
        cache: Cache,
        key: impl Into<String>,
        dark_class: impl Into<String>,
    ) -> Self {
        Self {
            document,
            cache,
            key: key.into(),
            dark_class: dark_class.into(),
        }
    }

    /// The theme the body currently shows.
    pub fn current(&self) -> Theme {
        if self.document.body_has_class(&self.dark_class) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Flip the theme and store the new value.
    pub fn toggle(&self) -> Result<Theme, UiError> {
        let next = match self.current() {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.document
            .set_body_class(&self.dark_class, next == Theme::Dark);
        self.cache.set_string(&self.key, next.as_str())?;
        Ok(next)
    }

    /// Apply the stored theme on page load.
    ///
    /// Only adds the dark class; a stored light theme leaves the body as
    /// served.
    pub fn restore(&self) -> Result<Theme, UiError> {
        let stored = self.cache.get_string(&self.key)?;
        let theme = Theme::from_stored(stored.as_deref());
        if theme == Theme::Dark {
            self.document.set_body_class(&self.dark_class, true);
        }
        Ok(theme)
    }
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("key", &self.key)
            .field("dark_class", &self.dark_class)
            .finish_non_exhaustive()
    }
}
