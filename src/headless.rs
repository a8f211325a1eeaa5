//! In-memory document implementing [`Platform`].
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Clicks bubble from
//! the target up through its ancestors, so a listener on a container sees
//! clicks on its descendants. Layout is not computed: offsets are whatever
//! the host assigns with [`Document::set_offset`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::markup::Markup;
use crate::platform::{ClickHandler, Offset, Platform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A click delivered to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: NodeId,
}

enum Kind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

struct NodeData {
    kind: Kind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: BTreeMap<String, String>,
    offset: Offset,
    offset_parent: Option<NodeId>,
    listeners: Vec<Rc<dyn Fn(&ClickEvent)>>,
}

impl NodeData {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            style: BTreeMap::new(),
            offset: Offset::default(),
            offset_parent: None,
            listeners: Vec::new(),
        }
    }
}

pub struct Document {
    nodes: RefCell<Vec<NodeData>>,
    notifications: RefCell<Vec<String>>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding just a `body` element.
    pub fn new() -> Self {
        let body = NodeData::new(Kind::Element {
            tag: "body".into(),
            attrs: Vec::new(),
        });
        Self {
            nodes: RefCell::new(vec![body]),
            notifications: RefCell::new(Vec::new()),
            body: NodeId(0),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn push(&self, data: NodeData) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(data);
        NodeId(nodes.len() - 1)
    }

    pub fn create_element(&self, tag: &str) -> NodeId {
        self.push(NodeData::new(Kind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }))
    }

    pub fn create_text(&self, text: &str) -> NodeId {
        self.push(NodeData::new(Kind::Text(text.to_string())))
    }

    fn detach(nodes: &mut [NodeData], node: NodeId) {
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        Self::detach(&mut nodes, child);
        nodes[parent.0].children.push(child);
        nodes[child.0].parent = Some(parent);
    }

    /// Contents of a text node; `None` for elements.
    pub fn text(&self, node: NodeId) -> Option<String> {
        match &self.nodes.borrow()[node.0].kind {
            Kind::Text(text) => Some(text.clone()),
            Kind::Element { .. } => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let parent = nodes[node.0].parent?;
        let siblings = &nodes[parent.0].children;
        let idx = siblings.iter().position(|c| *c == node)?;
        siblings.get(idx + 1).copied()
    }

    /// True if `node` is reachable from the body.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.body {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Kind::Element { attrs, .. } = &mut self.nodes.borrow_mut()[node.0].kind {
            match attrs.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes.borrow()[node.0].style.get(property).cloned()
    }

    pub fn set_offset(&self, node: NodeId, offset: Offset) {
        self.nodes.borrow_mut()[node.0].offset = offset;
    }

    pub fn set_offset_parent(&self, node: NodeId, parent: Option<NodeId>) {
        self.nodes.borrow_mut()[node.0].offset_parent = parent;
    }

    /// Descendants of `root` (inclusive) whose `class` attribute contains
    /// `class`, in document order.
    pub fn by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let has_class = self
                .attribute(&node, "class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class));
            if has_class {
                found.push(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        found
    }

    /// Delivers a click on `target` to it and each of its ancestors.
    pub fn click(&self, target: NodeId) {
        let event = ClickEvent { target };
        let mut current = Some(target);
        while let Some(node) = current {
            // Collected up front: listeners call back into the document.
            let (listeners, parent) = {
                let nodes = self.nodes.borrow();
                (nodes[node.0].listeners.clone(), nodes[node.0].parent)
            };
            for listener in listeners {
                listener(&event);
            }
            current = parent;
        }
    }

    /// Messages passed to [`Platform::notify`], oldest first.
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.borrow().clone()
    }
}

impl Platform for Document {
    type Node = NodeId;
    type Event = ClickEvent;

    fn render(&self, markup: &Markup) -> NodeId {
        let node = self.create_element(&markup.tag);
        for (name, value) in &markup.attrs {
            self.set_attribute(node, name, value);
        }
        for child in &markup.children {
            let child = self.render(child);
            self.append_child(node, child);
        }
        node
    }

    fn replace(&self, old: &NodeId, new: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes[old.0].parent else {
            warn!(node = ?old, "replace target is detached");
            return;
        };
        Self::detach(&mut nodes, *new);
        if let Some(slot) = nodes[parent.0].children.iter_mut().find(|c| **c == *old) {
            *slot = *new;
        }
        nodes[new.0].parent = Some(parent);
        nodes[old.0].parent = None;
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(parent) = nodes[reference.0].parent else {
            warn!(node = ?reference, "insert_after reference is detached");
            return;
        };
        Self::detach(&mut nodes, *node);
        let siblings = &mut nodes[parent.0].children;
        let idx = siblings
            .iter()
            .position(|c| c == reference)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(idx, *node);
        nodes[node.0].parent = Some(parent);
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler<ClickEvent>) {
        self.nodes.borrow_mut()[node.0].listeners.push(Rc::from(handler));
    }

    fn element_at(&self, event: &ClickEvent) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        match nodes.get(event.target.0)?.kind {
            Kind::Element { .. } => Some(event.target),
            Kind::Text(_) => nodes[event.target.0].parent,
        }
    }

    fn tag_name(&self, node: &NodeId) -> String {
        match &self.nodes.borrow()[node.0].kind {
            Kind::Element { tag, .. } => tag.clone(),
            Kind::Text(_) => "#text".to_string(),
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        match &self.nodes.borrow()[node.0].kind {
            Kind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone()),
            Kind::Text(_) => None,
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn offset(&self, node: &NodeId) -> Offset {
        self.nodes.borrow()[node.0].offset
    }

    fn offset_parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].offset_parent
    }

    fn notify(&self, message: &str) {
        debug!(text = message, "notify");
        self.notifications.borrow_mut().push(message.to_string());
    }
}
