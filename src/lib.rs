//! # floem-palette
//!
//! A swatch palette color picker. A trigger toggles a grid of configured
//! colors; clicking a swatch records it and notifies a callback.
//!
//! The widget comes in two renditions sharing one core:
//!
//! - [`Palette`], generic over a [`Platform`] adapter, for document-style
//!   hosts. [`headless::Document`] is an in-memory adapter.
//! - [`palette_picker`], a native Floem view (feature `view`, on by default).
//!
//! Both decouple clicks from callbacks through the typed [`Signal`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use floem_palette::headless::Document;
//! use floem_palette::{Palette, PaletteOptions};
//!
//! let doc = Rc::new(Document::new());
//! let host = doc.create_element("input");
//! doc.append_child(doc.body(), host);
//!
//! let options = PaletteOptions::default()
//!     .with_palette([["#fff", "#000"], ["#f00", "#0f0"]])
//!     .on_change(|| println!("picked"));
//! let palette = Palette::initialize(doc.clone(), &host, options);
//! doc.click(*palette.trigger());
//! ```

mod color;
#[cfg(feature = "view")]
mod constants;
mod error;
pub mod headless;
pub mod markup;
mod options;
mod palette;
mod platform;
mod signal;
#[cfg(feature = "view")]
mod view;

pub use color::SolidColor;
pub use error::{Error, Result};
pub use options::{PaletteConfig, PaletteOptions, DEFAULT_PALETTE};
pub use palette::{Display, Palette, PaletteState};
pub use platform::{find_offset, ClickHandler, Offset, Platform, Point};
pub use signal::{Handler, Signal};

#[cfg(feature = "view")]
use std::sync::Once;

#[cfg(feature = "view")]
use floem::prelude::*;
#[cfg(feature = "view")]
use floem::reactive::RwSignal;
#[cfg(feature = "view")]
use floem::text::FONT_SYSTEM;

#[cfg(feature = "view")]
static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the palette picker view.
///
/// Every selection is written to `selected`, which also drives the trigger's
/// preview, so external changes to the signal are reflected in the UI.
#[cfg(feature = "view")]
pub fn palette_picker(
    selected: RwSignal<Option<String>>,
    options: PaletteOptions,
) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    view::palette_view(selected, options)
}
