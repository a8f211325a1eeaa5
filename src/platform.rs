//! Host adapter consumed by [`Palette`](crate::Palette).
//!
//! The palette core never talks to a document directly. Whatever hosts it
//! (a browser binding, the headless [`Document`](crate::headless::Document),
//! a test double) implements this trait once and the core stays free of
//! host-specific branches.

use crate::markup::Markup;

/// Layout box of a node relative to its offset parent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub left: f64,
    pub top: f64,
    pub height: f64,
}

/// A position in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type ClickHandler<E> = Box<dyn Fn(&E)>;

pub trait Platform {
    /// Handle to a live node. Cheap to clone.
    type Node: Clone + PartialEq + std::fmt::Debug;
    /// Payload delivered to click handlers.
    type Event;

    /// Builds a detached node tree from `markup` and returns its root.
    fn render(&self, markup: &Markup) -> Self::Node;

    /// Puts `new` where `old` sits in the document.
    fn replace(&self, old: &Self::Node, new: &Self::Node);

    /// Moves `node` to be the next sibling of `reference`.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node);

    /// Calls `handler` for clicks on `node` or anything inside it.
    fn on_click(&self, node: &Self::Node, handler: ClickHandler<Self::Event>);

    /// The element a click originated from. Text targets resolve to their
    /// parent element.
    fn element_at(&self, event: &Self::Event) -> Option<Self::Node>;

    /// Lowercase element tag.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn offset(&self, node: &Self::Node) -> Offset;

    fn offset_parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Surfaces `message` to the user. Browser hosts block on an alert here.
    fn notify(&self, message: &str);
}

/// Bottom-left corner of `node` in document coordinates.
///
/// Sums the offsets up the offset-parent chain, then adds the node's own
/// height so the result sits directly below it.
pub fn find_offset<P: Platform + ?Sized>(platform: &P, node: &P::Node) -> Point {
    let height = platform.offset(node).height;
    let mut point = Point::default();
    let mut current = Some(node.clone());
    while let Some(n) = current {
        let offset = platform.offset(&n);
        point.x += offset.left;
        point.y += offset.top;
        current = platform.offset_parent(&n);
    }
    point.y += height;
    point
}
