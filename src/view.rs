//! Floem rendering of the palette: a trigger with a preview swatch and a
//! chevron, and the swatch grid underneath it while open.
//!
//! Trigger and swatch clicks go through the same toggle/change [`Signal`]s
//! and [`PaletteState`] the host-agnostic [`Palette`](crate::Palette) uses.

use std::rc::Rc;

use floem::event::EventListener;
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate, SignalWith};
use tracing::{debug, info, warn};

use crate::color::SolidColor;
use crate::constants;
use crate::options::PaletteOptions;
use crate::palette::PaletteState;
use crate::signal::{Handler, Signal};

const BORDER: Color = Color::rgb8(180, 180, 180);
const SURFACE: Color = Color::rgb8(242, 242, 242);

/// Builds the picker. `selected` receives every selection and drives the
/// trigger's preview.
pub(crate) fn palette_view(
    selected: RwSignal<Option<String>>,
    options: PaletteOptions,
) -> impl IntoView {
    let state = RwSignal::new(PaletteState {
        current: selected.get_untracked(),
        ..PaletteState::default()
    });

    let toggle = Rc::new(Signal::new());
    toggle.add(&Handler::new(move |_: &()| {
        state.update(|s| {
            let shown = s.toggle();
            debug!(display = ?shown, "palette toggled");
        });
    }));
    if let Some(on_toggle) = &options.on_toggle {
        toggle.add(on_toggle);
    }

    let change = Rc::new(Signal::new());
    match &options.on_change {
        Some(on_change) => {
            change.add(on_change);
        }
        None => {
            // No modal dialogs in Floem; the selection is logged instead.
            change.add(&Handler::new(move |_: &()| {
                let color = state.with_untracked(|s| s.current.clone().unwrap_or_default());
                info!("Selected color: {color}");
            }));
        }
    }

    v_stack((
        trigger(selected, state, toggle),
        grid(&options, selected, state, change),
    ))
    .style(|s| s.gap(constants::GAP).items_start())
}

fn trigger(
    selected: RwSignal<Option<String>>,
    state: RwSignal<PaletteState>,
    toggle: Rc<Signal>,
) -> impl IntoView {
    h_stack((
        empty().style(move |s| {
            let paint = selected.with(|c| c.as_deref().map(swatch_paint).unwrap_or_default());
            s.size(constants::PREVIEW_SIZE, constants::PREVIEW_SIZE)
                .border_radius(constants::RADIUS)
                .border(1.0)
                .border_color(BORDER)
                .background(Color::rgba(paint.r(), paint.g(), paint.b(), paint.a()))
        }),
        label(move || {
            let icon = if state.with(|s| s.display.is_open()) {
                lucide_icons::Icon::ChevronUp
            } else {
                lucide_icons::Icon::ChevronDown
            };
            icon.unicode().to_string()
        })
        .style(|s| {
            s.font_size(constants::ICON_FONT)
                .font_family("lucide".to_string())
                .color(Color::rgb8(120, 120, 120))
        }),
    ))
    .style(|s| {
        s.items_center()
            .gap(constants::GAP)
            .padding(constants::PADDING / 2.0)
            .border(1.0)
            .border_color(BORDER)
            .border_radius(constants::RADIUS)
            .background(Color::WHITE)
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .on_event_stop(EventListener::Click, move |_| {
        toggle.dispatch(&());
    })
}

fn grid(
    options: &PaletteOptions,
    selected: RwSignal<Option<String>>,
    state: RwSignal<PaletteState>,
    change: Rc<Signal>,
) -> impl IntoView {
    v_stack_from_iter(options.palette.iter().map(|row| {
        h_stack_from_iter(
            row.iter()
                .map(|color| swatch(color.clone(), selected, state, change.clone())),
        )
        .style(|s| s.gap(constants::GAP))
    }))
    .style(move |s| {
        let open = state.with(|st| st.display.is_open());
        s.gap(constants::GAP)
            .padding(constants::PADDING)
            .border(1.0)
            .border_color(BORDER)
            .border_radius(constants::RADIUS)
            .background(SURFACE)
            .apply_if(!open, |s| s.hide())
    })
}

fn swatch(
    color: String,
    selected: RwSignal<Option<String>>,
    state: RwSignal<PaletteState>,
    change: Rc<Signal>,
) -> impl IntoView {
    let paint = swatch_paint(&color);
    empty()
        .style(move |s| {
            s.size(constants::SWATCH_SIZE, constants::SWATCH_SIZE)
                .border_radius(constants::RADIUS)
                .border(1.0)
                .border_color(BORDER)
                .background(Color::rgba(paint.r(), paint.g(), paint.b(), paint.a()))
                .cursor(floem::style::CursorStyle::Pointer)
        })
        .on_event_stop(EventListener::Click, move |_| {
            debug!(%color, "palette selection");
            state.update(|s| s.select(color.clone()));
            selected.set(Some(color.clone()));
            change.dispatch(&());
        })
}

/// Paint for a configured color string; unparsable strings paint gray.
fn swatch_paint(color: &str) -> SolidColor {
    SolidColor::from_hex(color).unwrap_or_else(|| {
        warn!(color, "swatch color is not a hex color, painting gray");
        SolidColor::default()
    })
}

#[cfg(test)]
mod tests {
    use super::swatch_paint;
    use crate::color::SolidColor;

    #[test]
    fn parsable_colors_paint_as_configured() {
        assert_eq!(swatch_paint("#0f0").to_rgb(), (0, 255, 0));
    }

    #[test]
    fn unparsable_colors_paint_gray() {
        assert_eq!(swatch_paint("rebeccapurple"), SolidColor::default());
    }
}
