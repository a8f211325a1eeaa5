//! Markup templates for the trigger and the swatch grid.
//!
//! Templates are plain element trees; a [`Platform`](crate::Platform) turns
//! them into live nodes. `to_html` exists for hosts that render from strings.

use std::fmt::Write;

/// Tag that identifies a swatch inside the grid.
pub const SWATCH_TAG: &str = "span";
/// Attribute carrying a swatch's color string.
pub const COLOR_ATTR: &str = "data-color";

pub const TRIGGER_CLASS: &str = "color-container";
pub const PREVIEW_CLASS: &str = "color-preview";
pub const GRID_CLASS: &str = "palette-container";
pub const ROW_CLASS: &str = "palette-row";

/// An element with ordered attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl Markup {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The always-visible trigger: a container with a nested preview region.
pub fn trigger() -> Markup {
    Markup::new("div")
        .class(TRIGGER_CLASS)
        .child(Markup::new("div").class(PREVIEW_CLASS))
}

/// The grid container with one row per palette row.
pub fn grid(palette: &[Vec<String>]) -> Markup {
    Markup::new("div")
        .class(GRID_CLASS)
        .children(palette.iter().map(|colors| row(colors)))
}

pub fn row(colors: &[String]) -> Markup {
    Markup::new("div")
        .class(ROW_CLASS)
        .children(colors.iter().map(|c| swatch(c)))
}

/// A swatch exposes its color both as fill and as a readable attribute.
pub fn swatch(color: &str) -> Markup {
    Markup::new(SWATCH_TAG)
        .attr(COLOR_ATTR, color)
        .attr("style", format!("background-color:{color};"))
}
