//! Palette: the swatch grid widget, independent of any particular host.
//!
//! A palette replaces a host element with its trigger and keeps a hidden
//! grid of swatches. Each trigger click flips the grid between closed and
//! open; each swatch click records that swatch's color and fires the change
//! signal. All state is per instance, so several palettes can share a page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::markup::{self, COLOR_ATTR, SWATCH_TAG};
use crate::options::PaletteOptions;
use crate::platform::{find_offset, Platform, Point};
use crate::signal::{Handler, Signal};

/// Whether the grid is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Closed,
    Open,
}

impl Display {
    pub fn flipped(self) -> Self {
        match self {
            Display::Closed => Display::Open,
            Display::Open => Display::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == Display::Open
    }
}

/// Mutable interaction state of one palette.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteState {
    pub display: Display,
    /// Last selected color, if any swatch was clicked yet.
    pub current: Option<String>,
    /// Where the grid was last placed.
    pub position: Option<Point>,
}

impl PaletteState {
    /// Flips the display state and returns the new one.
    pub fn toggle(&mut self) -> Display {
        self.display = self.display.flipped();
        self.display
    }

    pub fn select(&mut self, color: impl Into<String>) {
        self.current = Some(color.into());
    }
}

pub struct Palette<P: Platform> {
    platform: Rc<P>,
    options: Rc<PaletteOptions>,
    state: Rc<RefCell<PaletteState>>,
    trigger: P::Node,
    grid: P::Node,
    toggle: Rc<Signal>,
    change: Rc<Signal>,
}

impl<P: Platform + 'static> Palette<P> {
    /// Replaces `host` with the trigger and wires up the hidden grid.
    pub fn initialize(platform: Rc<P>, host: &P::Node, options: PaletteOptions) -> Self {
        let options = Rc::new(options);
        let state = Rc::new(RefCell::new(PaletteState::default()));

        let trigger = platform.render(&markup::trigger());
        platform.replace(host, &trigger);

        let grid = platform.render(&markup::grid(&options.palette));
        platform.set_style(&grid, "display", "none");

        let toggle = Rc::new(Signal::new());
        let change = Rc::new(Signal::new());

        toggle.add(&toggle_handler(
            Rc::downgrade(&platform),
            state.clone(),
            trigger.clone(),
            grid.clone(),
        ));
        if let Some(on_toggle) = &options.on_toggle {
            toggle.add(on_toggle);
        }

        match &options.on_change {
            Some(on_change) => {
                change.add(on_change);
            }
            None => {
                change.add(&fallback_change_handler(
                    Rc::downgrade(&platform),
                    state.clone(),
                ));
            }
        }

        {
            let toggle = toggle.clone();
            platform.on_click(
                &trigger,
                Box::new(move |_: &P::Event| toggle.dispatch(&())),
            );
        }

        {
            let weak = Rc::downgrade(&platform);
            let options = options.clone();
            let state = state.clone();
            let change = change.clone();
            platform.on_click(
                &grid,
                Box::new(move |event: &P::Event| {
                    let Some(platform) = weak.upgrade() else {
                        return;
                    };
                    let Some(color) = swatch_color(&*platform, event) else {
                        trace!("click outside any swatch");
                        return;
                    };
                    if !options.contains(&color) {
                        warn!(%color, "swatch color is not in the palette");
                        return;
                    }
                    debug!(%color, "palette selection");
                    state.borrow_mut().select(color);
                    change.dispatch(&());
                }),
            );
        }

        debug!(
            rows = options.palette.len(),
            custom_change = options.on_change.is_some(),
            "palette initialized"
        );

        Self {
            platform,
            options,
            state,
            trigger,
            grid,
            toggle,
            change,
        }
    }
}

impl<P: Platform> Palette<P> {
    /// The last selected color, or `None` before the first selection.
    pub fn current_color(&self) -> Option<String> {
        self.state.borrow().current.clone()
    }

    pub fn display(&self) -> Display {
        self.state.borrow().display
    }

    pub fn is_open(&self) -> bool {
        self.display().is_open()
    }

    /// Where the grid was placed when it last opened.
    pub fn position(&self) -> Option<Point> {
        self.state.borrow().position
    }

    pub fn trigger(&self) -> &P::Node {
        &self.trigger
    }

    pub fn grid(&self) -> &P::Node {
        &self.grid
    }

    pub fn options(&self) -> &PaletteOptions {
        &self.options
    }

    pub fn platform(&self) -> &Rc<P> {
        &self.platform
    }

    /// Fires after every open/close flip.
    pub fn toggle_signal(&self) -> &Signal {
        &self.toggle
    }

    /// Fires after every selection; read the color with
    /// [`Palette::current_color`].
    pub fn change_signal(&self) -> &Signal {
        &self.change
    }
}

/// Flips visibility and, when opening, parks the grid below the trigger.
fn toggle_handler<P: Platform + 'static>(
    platform: Weak<P>,
    state: Rc<RefCell<PaletteState>>,
    trigger: P::Node,
    grid: P::Node,
) -> Handler {
    Handler::new(move |_: &()| {
        let Some(platform) = platform.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        match state.toggle() {
            Display::Open => {
                let at = find_offset(&*platform, &trigger);
                state.position = Some(at);
                platform.set_style(&grid, "position", "absolute");
                platform.set_style(&grid, "top", &format!("{}px", at.y));
                platform.set_style(&grid, "left", &format!("{}px", at.x));
                platform.insert_after(&trigger, &grid);
                platform.set_style(&grid, "display", "block");
                debug!(x = at.x, y = at.y, "palette opened");
            }
            Display::Closed => {
                platform.set_style(&grid, "display", "none");
                debug!("palette closed");
            }
        }
    })
}

/// Reports the selection through the platform when no callback was given.
fn fallback_change_handler<P: Platform + 'static>(
    platform: Weak<P>,
    state: Rc<RefCell<PaletteState>>,
) -> Handler {
    Handler::new(move |_: &()| {
        let Some(platform) = platform.upgrade() else {
            return;
        };
        let color = state.borrow().current.clone().unwrap_or_default();
        platform.notify(&format!("Selected color: {color}"));
    })
}

/// The color of the swatch a click came from, if it came from one.
fn swatch_color<P: Platform + ?Sized>(platform: &P, event: &P::Event) -> Option<String> {
    let source = platform.element_at(event)?;
    if platform.tag_name(&source) != SWATCH_TAG {
        return None;
    }
    platform.attribute(&source, COLOR_ATTR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Document, NodeId};
    use crate::platform::Offset;
    use std::cell::Cell;

    fn mount(options: PaletteOptions) -> (Rc<Document>, Palette<Document>) {
        let doc = Rc::new(Document::new());
        let host = doc.create_element("input");
        doc.append_child(doc.body(), host);
        let palette = Palette::initialize(doc.clone(), &host, options);
        (doc, palette)
    }

    fn two_rows() -> PaletteOptions {
        PaletteOptions::default().with_palette([["#fff", "#000"], ["#f00", "#0f0"]])
    }

    fn swatches(doc: &Document, palette: &Palette<Document>) -> Vec<NodeId> {
        doc.by_class(*palette.grid(), markup::ROW_CLASS)
            .into_iter()
            .flat_map(|row| doc.children(row))
            .collect()
    }

    fn swatch(doc: &Document, palette: &Palette<Document>, color: &str) -> NodeId {
        swatches(doc, palette)
            .into_iter()
            .find(|s| doc.attribute(s, COLOR_ATTR).as_deref() == Some(color))
            .unwrap()
    }

    #[test]
    fn trigger_replaces_host() {
        let doc = Rc::new(Document::new());
        let host = doc.create_element("input");
        doc.append_child(doc.body(), host);
        let palette = Palette::initialize(doc.clone(), &host, PaletteOptions::default());

        assert_eq!(doc.children(doc.body()), vec![*palette.trigger()]);
        assert!(!doc.is_attached(host));
        assert_eq!(
            doc.by_class(*palette.trigger(), markup::PREVIEW_CLASS).len(),
            1
        );
    }

    #[test]
    fn grid_renders_each_row_and_swatch() {
        let (doc, palette) = mount(two_rows());
        let rows = doc.by_class(*palette.grid(), markup::ROW_CLASS);
        assert_eq!(rows.len(), 2);

        let colors: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                doc.children(*row)
                    .iter()
                    .map(|s| {
                        assert_eq!(doc.tag_name(s), SWATCH_TAG);
                        doc.attribute(s, COLOR_ATTR).unwrap()
                    })
                    .collect()
            })
            .collect();
        assert_eq!(colors, vec![vec!["#fff", "#000"], vec!["#f00", "#0f0"]]);
    }

    #[test]
    fn default_palette_is_black_and_white() {
        let (doc, palette) = mount(PaletteOptions::default());
        let colors: Vec<_> = swatches(&doc, &palette)
            .iter()
            .map(|s| doc.attribute(s, COLOR_ATTR).unwrap())
            .collect();
        assert_eq!(colors, vec!["#fff", "#000"]);
    }

    #[test]
    fn grid_starts_hidden_and_closed() {
        let (doc, palette) = mount(two_rows());
        assert_eq!(palette.display(), Display::Closed);
        assert_eq!(doc.style(*palette.grid(), "display").as_deref(), Some("none"));
        assert_eq!(palette.current_color(), None);
        assert!(palette.position().is_none());
    }

    #[test]
    fn trigger_click_opens_below_trigger_and_second_click_closes() {
        let (doc, palette) = mount(two_rows());
        let trigger = *palette.trigger();
        doc.set_offset(trigger, Offset { left: 40.0, top: 25.0, height: 18.0 });

        doc.click(trigger);
        assert!(palette.is_open());
        assert_eq!(palette.position(), Some(Point::new(40.0, 43.0)));
        let grid = *palette.grid();
        assert_eq!(doc.style(grid, "display").as_deref(), Some("block"));
        assert_eq!(doc.style(grid, "position").as_deref(), Some("absolute"));
        assert_eq!(doc.style(grid, "left").as_deref(), Some("40px"));
        assert_eq!(doc.style(grid, "top").as_deref(), Some("43px"));
        assert_eq!(doc.next_sibling(trigger), Some(grid));

        doc.click(trigger);
        assert_eq!(palette.display(), Display::Closed);
        assert_eq!(doc.style(grid, "display").as_deref(), Some("none"));
    }

    #[test]
    fn reopening_tracks_the_trigger() {
        let (doc, palette) = mount(two_rows());
        let trigger = *palette.trigger();
        let container = doc.create_element("div");
        doc.set_offset(container, Offset { left: 200.0, top: 100.0, height: 500.0 });
        doc.set_offset(trigger, Offset { left: 10.0, top: 5.0, height: 20.0 });
        doc.set_offset_parent(trigger, Some(container));

        doc.click(trigger);
        assert_eq!(palette.position(), Some(Point::new(210.0, 125.0)));
        doc.click(trigger);

        doc.set_offset(trigger, Offset { left: 30.0, top: 5.0, height: 20.0 });
        doc.click(trigger);
        assert_eq!(palette.position(), Some(Point::new(230.0, 125.0)));
    }

    #[test]
    fn swatch_click_selects_and_calls_on_change_once() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let (doc, palette) = mount(two_rows().on_change(move || c.set(c.get() + 1)));

        doc.click(*palette.trigger());
        doc.click(swatch(&doc, &palette, "#0f0"));

        assert_eq!(palette.current_color().as_deref(), Some("#0f0"));
        assert_eq!(calls.get(), 1);
        assert!(doc.notifications().is_empty());
    }

    #[test]
    fn on_change_can_read_the_new_color() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let palette_slot: Rc<RefCell<Option<Palette<Document>>>> = Rc::new(RefCell::new(None));
        let on_change = {
            let seen = seen.clone();
            let slot = palette_slot.clone();
            move || {
                if let Some(p) = slot.borrow().as_ref() {
                    seen.borrow_mut().push(p.current_color());
                }
            }
        };
        let (doc, palette) = mount(two_rows().on_change(on_change));
        let red = swatch(&doc, &palette, "#f00");
        *palette_slot.borrow_mut() = Some(palette);

        doc.click(red);
        assert_eq!(*seen.borrow(), vec![Some("#f00".to_string())]);
        palette_slot.borrow_mut().take();
    }

    #[test]
    fn background_and_row_clicks_are_ignored() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let (doc, palette) = mount(two_rows().on_change(move || c.set(c.get() + 1)));
        doc.click(swatch(&doc, &palette, "#fff"));

        doc.click(*palette.grid());
        let row = doc.by_class(*palette.grid(), markup::ROW_CLASS)[1];
        doc.click(row);

        assert_eq!(palette.current_color().as_deref(), Some("#fff"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn text_inside_a_swatch_counts_as_the_swatch() {
        let (doc, palette) = mount(two_rows().on_change(|| {}));
        let black = swatch(&doc, &palette, "#000");
        let text = doc.create_text("\u{a0}");
        doc.append_child(black, text);

        doc.click(text);
        assert_eq!(palette.current_color().as_deref(), Some("#000"));
    }

    #[test]
    fn foreign_span_in_grid_is_not_selectable() {
        let (doc, palette) = mount(two_rows().on_change(|| {}));
        let stray = doc.create_element("span");
        doc.set_attribute(stray, COLOR_ATTR, "#abcdef");
        doc.append_child(*palette.grid(), stray);

        doc.click(stray);
        assert_eq!(palette.current_color(), None);
    }

    #[test]
    fn missing_on_change_falls_back_to_notification() {
        let (doc, palette) = mount(two_rows());
        doc.click(swatch(&doc, &palette, "#f00"));

        assert_eq!(palette.current_color().as_deref(), Some("#f00"));
        assert_eq!(doc.notifications(), vec!["Selected color: #f00"]);
    }

    #[test]
    fn on_toggle_runs_after_each_flip() {
        let opened = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Palette<Document>>>> = Rc::new(RefCell::new(None));
        let on_toggle = {
            let opened = opened.clone();
            let slot = slot.clone();
            move || {
                if let Some(p) = slot.borrow().as_ref() {
                    opened.borrow_mut().push(p.is_open());
                }
            }
        };
        let (doc, palette) = mount(two_rows().on_toggle(on_toggle));
        let trigger = *palette.trigger();
        *slot.borrow_mut() = Some(palette);

        doc.click(trigger);
        doc.click(trigger);
        assert_eq!(*opened.borrow(), vec![true, false]);
        slot.borrow_mut().take();
    }

    #[test]
    fn instances_do_not_share_state() {
        let doc = Rc::new(Document::new());
        let first_host = doc.create_element("input");
        let second_host = doc.create_element("input");
        doc.append_child(doc.body(), first_host);
        doc.append_child(doc.body(), second_host);
        let first = Palette::initialize(doc.clone(), &first_host, two_rows().on_change(|| {}));
        let second = Palette::initialize(
            doc.clone(),
            &second_host,
            PaletteOptions::default().on_change(|| {}),
        );

        doc.click(*first.trigger());
        doc.click(swatch(&doc, &second, "#000"));

        assert!(first.is_open());
        assert!(!second.is_open());
        assert_eq!(first.current_color(), None);
        assert_eq!(second.current_color().as_deref(), Some("#000"));
    }

    #[test]
    fn extra_listeners_can_subscribe_to_change() {
        let (doc, palette) = mount(two_rows().on_change(|| {}));
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        palette
            .change_signal()
            .add_once(&Handler::new(move |_: &()| h.set(h.get() + 1)));

        doc.click(swatch(&doc, &palette, "#fff"));
        doc.click(swatch(&doc, &palette, "#000"));
        assert_eq!(hits.get(), 1);
        assert_eq!(palette.change_signal().len(), 1);
    }
}
