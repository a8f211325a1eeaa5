//! Sizing and styling constants for the Floem view.

/// Edge length of one swatch
pub const SWATCH_SIZE: f32 = 18.0;

/// Edge length of the preview inside the trigger
pub const PREVIEW_SIZE: f32 = 20.0;

/// Border radius for swatches and the preview
pub const RADIUS: f32 = 3.0;

/// Gap between swatches and rows
pub const GAP: f32 = 4.0;

/// Padding around the grid and inside the trigger
pub const PADDING: f32 = 6.0;

/// Chevron glyph size
pub const ICON_FONT: f32 = 14.0;
