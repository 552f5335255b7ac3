//! Mutable page document
//!
//! A thin layer over [`scraper::Html`] offering the handful of DOM
//! operations the loaders need. Nodes are addressed by [`NodeId`], which
//! stays valid until the node is removed.

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn to_html(&self) -> String {
        self.html.html()
    }

    pub fn first(&self, selector: &Selector) -> Option<NodeId> {
        self.html.select(selector).next().map(|element| element.id())
    }

    pub fn all(&self, selector: &Selector) -> Vec<NodeId> {
        self.html.select(selector).map(|element| element.id()).collect()
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn find_in(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.element(scope)
            .map(|scope| scope.select(selector).map(|element| element.id()).collect())
            .unwrap_or_default()
    }

    pub fn first_in(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.element(scope)?
            .select(selector)
            .next()
            .map(|element| element.id())
    }

    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.value().attr(name)
    }

    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.element(id)
            .map(|element| element.value().classes().collect())
            .unwrap_or_default()
    }

    pub fn remove(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = match self.html.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect::<Vec<_>>(),
            None => return,
        };
        for child in children {
            self.remove(child);
        }
    }

    /// Parses `fragment` and inserts its nodes as the last children of
    /// `parent`.
    pub fn append_html(&mut self, parent: NodeId, fragment: &str) {
        let fragment = Html::parse_fragment(fragment);
        for node in fragment.root_element().children() {
            graft(&mut self.html.tree, parent, node, Position::Last);
        }
    }

    /// Parses `fragment` and inserts its nodes, in order, before the first
    /// child of `parent`.
    pub fn prepend_html(&mut self, parent: NodeId, fragment: &str) {
        let fragment = Html::parse_fragment(fragment);
        let nodes = fragment.root_element().children().collect::<Vec<_>>();
        for node in nodes.into_iter().rev() {
            graft(&mut self.html.tree, parent, node, Position::First);
        }
    }

    /// Replaces the `class` attribute of an element.
    ///
    /// The element is rebuilt from a body-context fragment, so elements that
    /// only parse inside a table or select (`td`, `tr`, `option`) are left
    /// unchanged.
    pub fn set_classes(&mut self, id: NodeId, classes: &[&str]) {
        let Some(element) = self.element(id) else {
            return;
        };
        let name = element.value().name();
        let mut tag = format!("<{name}");
        let class = classes.join(" ");
        if !class.is_empty() {
            tag.push_str(&format!(r#" class="{}""#, crate::render::escape_attr(&class)));
        }
        for (key, value) in element.value().attrs() {
            if key != "class" {
                tag.push_str(&format!(
                    r#" {key}="{}""#,
                    crate::render::escape_attr(value)
                ));
            }
        }
        tag.push_str(&format!("></{name}>"));

        let rebuilt = Html::parse_fragment(&tag);
        let Some(replacement) = rebuilt
            .root_element()
            .children()
            .find(|node| node.value().is_element())
            .map(|node| node.value().clone())
        else {
            debug!(element = name, "element cannot be rebuilt outside its parent context");
            return;
        };
        if let Some(mut node) = self.html.tree.get_mut(id) {
            *node.value() = replacement;
        }
    }
}

#[derive(Clone, Copy)]
enum Position {
    First,
    Last,
}

fn graft(tree: &mut Tree<Node>, parent: NodeId, source: NodeRef<'_, Node>, position: Position) {
    let Some(mut parent) = tree.get_mut(parent) else {
        return;
    };
    let value = source.value().clone();
    let id = match position {
        Position::First => parent.prepend(value).id(),
        Position::Last => parent.append(value).id(),
    };
    for child in source.children() {
        graft(tree, id, child, Position::Last);
    }
}
