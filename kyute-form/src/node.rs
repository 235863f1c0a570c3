//! Virtual UI tree.
//!
//! Widgets render to trees of [`Node`]s: element names, attributes, event listeners and text. The tree says
//! nothing about styling or about the toolkit that eventually displays it. Listeners produce messages, and
//! [`Node::map`] converts them, the same way a parent widget wraps the actions of its children.
use smallvec::SmallVec;
use std::{fmt, rc::Rc};

/// Produces a message when an event is delivered to an element.
pub enum Handler<Msg> {
    /// Always produces the same message (clicks, focus loss).
    Message(Msg),
    /// Produces a message from the event payload, typically the current text of an input.
    Input(Rc<dyn Fn(&str) -> Msg>),
}

impl<Msg: Clone> Clone for Handler<Msg> {
    fn clone(&self) -> Self {
        match self {
            Handler::Message(msg) => Handler::Message(msg.clone()),
            Handler::Input(f) => Handler::Input(f.clone()),
        }
    }
}

impl<Msg: Clone> Handler<Msg> {
    /// Runs the handler with the given event payload.
    pub fn invoke(&self, payload: &str) -> Msg {
        match self {
            Handler::Message(msg) => msg.clone(),
            Handler::Input(f) => f(payload),
        }
    }
}

impl<Msg: 'static> Handler<Msg> {
    fn map<B: 'static>(self, f: &Rc<dyn Fn(Msg) -> B>) -> Handler<B> {
        match self {
            Handler::Message(msg) => Handler::Message(f(msg)),
            Handler::Input(input) => {
                let f = f.clone();
                Handler::Input(Rc::new(move |payload: &str| f(input(payload))))
            }
        }
    }
}

/// An event listener.
#[derive(Clone)]
pub struct Listener<Msg> {
    pub event: &'static str,
    pub handler: Handler<Msg>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// An element of the UI tree.
#[derive(Clone)]
pub struct Element<Msg> {
    pub tag: &'static str,
    pub attributes: SmallVec<[(&'static str, String); 4]>,
    pub listeners: SmallVec<[Listener<Msg>; 2]>,
    pub children: Vec<Node<Msg>>,
}

impl<Msg> Element<Msg> {
    pub fn new(tag: &'static str) -> Element<Msg> {
        Element {
            tag,
            attributes: SmallVec::new(),
            listeners: SmallVec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.attributes.push((name, value));
        }
        self
    }

    #[must_use]
    pub fn id(self, dom_id: impl Into<String>) -> Self {
        self.attr("id", dom_id)
    }

    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Sends `msg` when `event` is delivered to the element.
    #[must_use]
    pub fn on(mut self, event: &'static str, msg: Msg) -> Self {
        self.listeners.push(Listener {
            event,
            handler: Handler::Message(msg),
        });
        self
    }

    /// Sends a message computed from the event payload when `event` is delivered to the element.
    #[must_use]
    pub fn on_input(mut self, event: &'static str, f: impl Fn(&str) -> Msg + 'static) -> Self {
        self.listeners.push(Listener {
            event,
            handler: Handler::Input(Rc::new(f)),
        });
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node<Msg>>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node<Msg>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Appends a text node.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn has_listener(&self, event: &str) -> bool {
        self.listeners.iter().any(|l| l.event == event)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in self.children.iter() {
            child.collect_text(&mut text);
        }
        text
    }
}

impl<Msg: Clone> Element<Msg> {
    /// Delivers an event to this element and returns the message produced by the first matching listener.
    pub fn trigger(&self, event: &str, payload: &str) -> Option<Msg> {
        self.listeners
            .iter()
            .find(|l| l.event == event)
            .map(|l| l.handler.invoke(payload))
    }
}

impl<Msg: 'static> Element<Msg> {
    fn map<B: 'static>(self, f: &Rc<dyn Fn(Msg) -> B>) -> Element<B> {
        Element {
            tag: self.tag,
            attributes: self.attributes,
            listeners: self
                .listeners
                .into_iter()
                .map(|l| Listener {
                    event: l.event,
                    handler: l.handler.map(f),
                })
                .collect(),
            children: self.children.into_iter().map(|child| child.map_with(f)).collect(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A node of the UI tree.
#[derive(Clone)]
pub enum Node<Msg> {
    Element(Element<Msg>),
    Text(String),
}

impl<Msg> Node<Msg> {
    pub fn text(text: impl Into<String>) -> Node<Msg> {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element<Msg>> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Finds the element with the given DOM id in this subtree.
    pub fn find(&self, dom_id: &str) -> Option<&Element<Msg>> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => {
                if element.dom_id() == Some(dom_id) {
                    Some(element)
                } else {
                    find(&element.children, dom_id)
                }
            }
        }
    }

    /// Concatenated text of this subtree.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in element.children.iter() {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl<Msg: 'static> Node<Msg> {
    /// Converts the messages produced by this subtree.
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Node<B> {
        let f: Rc<dyn Fn(Msg) -> B> = Rc::new(f);
        self.map_with(&f)
    }

    fn map_with<B: 'static>(self, f: &Rc<dyn Fn(Msg) -> B>) -> Node<B> {
        match self {
            Node::Element(element) => Node::Element(element.map(f)),
            Node::Text(text) => Node::Text(text),
        }
    }
}

impl<Msg> From<Element<Msg>> for Node<Msg> {
    fn from(element: Element<Msg>) -> Self {
        Node::Element(element)
    }
}

/// Converts the messages produced by a list of nodes.
pub fn map_nodes<A: 'static, B: 'static>(nodes: Vec<Node<A>>, f: impl Fn(A) -> B + 'static) -> Vec<Node<B>> {
    let f: Rc<dyn Fn(A) -> B> = Rc::new(f);
    nodes.into_iter().map(|node| node.map_with(&f)).collect()
}

/// Finds the element with the given DOM id in a list of nodes.
pub fn find<'a, Msg>(nodes: &'a [Node<Msg>], dom_id: &str) -> Option<&'a Element<Msg>> {
    nodes.iter().find_map(|node| node.find(dom_id))
}

/// Concatenated text of a list of nodes.
pub fn text_content<Msg>(nodes: &[Node<Msg>]) -> String {
    let mut text = String::new();
    for node in nodes {
        node.collect_text(&mut text);
    }
    text
}

////////////////////////////////////////////////////////////////////////////////////////////////////

impl<Msg> fmt::Debug for Element<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let events: Vec<_> = self.listeners.iter().map(|l| l.event).collect();
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .field("listeners", &events)
            .field("children", &self.children)
            .finish()
    }
}

impl<Msg> fmt::Debug for Node<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Element(element) => fmt::Debug::fmt(element, f),
            Node::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Inner {
        Clicked,
        Typed(String),
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Outer(usize, Inner);

    fn tree() -> Node<Inner> {
        Element::new("div")
            .id("root")
            .child(Element::new("button").id("ok").on("click", Inner::Clicked).text("OK"))
            .child(
                Element::new("input")
                    .id("name")
                    .attr("value", "x")
                    .on_input("input", |text| Inner::Typed(text.to_owned())),
            )
            .text("!")
            .into()
    }

    #[test]
    fn find_and_trigger() {
        let tree = tree();
        let button = tree.find("ok").unwrap();
        assert_eq!(button.tag, "button");
        assert_eq!(button.trigger("click", ""), Some(Inner::Clicked));
        assert_eq!(button.trigger("input", ""), None);
        let input = tree.find("name").unwrap();
        assert_eq!(input.trigger("input", "bob"), Some(Inner::Typed("bob".into())));
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn map_wraps_every_listener() {
        let tree = tree().map(|inner| Outer(7, inner));
        assert_eq!(tree.find("ok").unwrap().trigger("click", ""), Some(Outer(7, Inner::Clicked)));
        assert_eq!(
            tree.find("name").unwrap().trigger("input", "z"),
            Some(Outer(7, Inner::Typed("z".into())))
        );
    }

    #[test]
    fn attributes_and_text() {
        let tree = tree();
        let input = tree.find("name").unwrap();
        assert_eq!(input.attribute("value"), Some("x"));
        let input = Element::<Inner>::new("input").attr("value", "a").attr("value", "b");
        assert_eq!(input.attribute("value"), Some("b"));
        assert_eq!(input.attributes.len(), 1);
        assert_eq!(tree.text_content(), "OK!");
    }
}
