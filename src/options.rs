//! Per-instance palette configuration.
//!
//! Options are built in code (`PaletteOptions::default().with_palette(..)`)
//! or loaded from JSON. Either way the caller's values are laid over the
//! defaults key by key: a present key replaces the default outright, a
//! missing key keeps it, and unknown keys ride along in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::signal::Handler;

/// The grid used when the caller configures none: one row, white and black.
pub const DEFAULT_PALETTE: &[&str] = &["#fff", "#000"];

/// The serializable subset of [`PaletteOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette_array: Option<Vec<Vec<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything a palette instance is initialized with.
#[derive(Debug, Clone)]
pub struct PaletteOptions {
    /// Rows of swatch colors, top to bottom.
    pub palette: Vec<Vec<String>>,
    /// Called after every selection. When unset the platform's blocking
    /// notification reports the color instead.
    pub on_change: Option<Handler>,
    /// Called after every open/close flip.
    pub on_toggle: Option<Handler>,
    /// Keys this crate does not interpret.
    pub extra: Map<String, Value>,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            palette: vec![DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()],
            on_change: None,
            on_toggle: None,
            extra: Map::new(),
        }
    }
}

impl PaletteOptions {
    /// Parses a JSON object and merges it over the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PaletteConfig = serde_json::from_str(json)?;
        Ok(Self::default().merge(config))
    }

    /// Shallow override: keys present in `config` replace ours.
    pub fn merge(mut self, config: PaletteConfig) -> Self {
        if let Some(palette) = config.palette_array {
            self.palette = palette;
        }
        self.extra.extend(config.extra);
        self
    }

    pub fn with_palette<R, C>(mut self, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.palette = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self
    }

    pub fn on_change(self, f: impl Fn() + 'static) -> Self {
        self.on_change_handler(Handler::new(move |_: &()| f()))
    }

    pub fn on_change_handler(mut self, handler: Handler) -> Self {
        self.on_change = Some(handler);
        self
    }

    pub fn on_toggle(self, f: impl Fn() + 'static) -> Self {
        self.on_toggle_handler(Handler::new(move |_: &()| f()))
    }

    pub fn on_toggle_handler(mut self, handler: Handler) -> Self {
        self.on_toggle = Some(handler);
        self
    }

    /// True if `color` is one of the configured swatches.
    pub fn contains(&self, color: &str) -> bool {
        self.palette.iter().flatten().any(|c| c == color)
    }

    /// The serializable part of these options.
    pub fn config(&self) -> PaletteConfig {
        PaletteConfig {
            palette_array: Some(self.palette.clone()),
            extra: self.extra.clone(),
        }
    }
}
