//! Platform-neutral modal content.
//!
//! Content handed to [`ModalRequest`](crate::request::ModalRequest) is a small
//! retained view tree. It is built once, without knowing which platform will
//! show it, and the mounted [`PresentationShell`](crate::shell::PresentationShell)
//! materializes it.
//!
//! Nodes are handles: cloning an [`Element`] or [`Text`] gives another handle to
//! the same underlying node, so event handlers can update content in place.
use std::rc::Rc;

use crate::{Str, sync::Shared};

type Handler = Rc<dyn Fn()>;

/// A text node.
#[derive(Clone)]
pub struct Text {
    text: Shared<Str>,
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.text.ptr_eq(&other.text)
    }
}

impl Text {
    pub fn new(text: impl Into<Str>) -> Self {
        Text {
            text: Shared::new(text.into()),
        }
    }

    pub fn set_text(&self, text: impl Into<Str>) {
        self.text.set(text.into());
    }

    pub fn text(&self) -> Str {
        self.text.get().clone()
    }
}

/// An element node.
#[derive(Clone)]
pub struct Element {
    name: Str,
    attributes: Shared<Vec<(Str, Option<Str>)>>,
    styles: Shared<Vec<(Str, Str)>>,
    handlers: Shared<Vec<(Str, Handler)>>,
    children: Shared<Vec<Node>>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.attributes.ptr_eq(&other.attributes)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.html_string())
    }
}

impl Element {
    pub fn new(name: impl Into<Str>) -> Self {
        Self {
            name: name.into(),
            attributes: Default::default(),
            styles: Default::default(),
            handlers: Default::default(),
            children: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn set_attribute(&self, key: impl Into<Str>, value: impl Into<Str>) {
        let (k, v) = (key.into(), value.into());
        let mut attributes = self.attributes.get_mut();
        for (k_prev, v_prev) in attributes.iter_mut() {
            if k_prev == &k {
                *v_prev = Some(v);
                return;
            }
        }
        attributes.push((k, Some(v)));
    }

    /// Set a valueless attribute, like `disabled`.
    pub fn set_flag(&self, key: impl Into<Str>) {
        let k = key.into();
        let mut attributes = self.attributes.get_mut();
        if !attributes.iter().any(|(k_prev, _)| k_prev == &k) {
            attributes.push((k, None));
        }
    }

    pub fn has_attribute(&self, key: impl AsRef<str>) -> bool {
        self.attributes
            .get()
            .iter()
            .any(|(k, _)| k.as_str() == key.as_ref())
    }

    pub fn get_attribute(&self, key: impl AsRef<str>) -> Option<Str> {
        self.attributes
            .get()
            .iter()
            .find(|(k, _)| k.as_str() == key.as_ref())
            .and_then(|(_, v)| v.clone())
    }

    pub fn remove_attribute(&self, key: impl AsRef<str>) {
        self.attributes
            .get_mut()
            .retain(|(k, _)| k.as_str() != key.as_ref());
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> Vec<(Str, Option<Str>)> {
        self.attributes.get().clone()
    }

    /// Append a class name to the `class` attribute.
    pub fn add_class(&self, class: impl AsRef<str>) {
        let class = class.as_ref();
        let classes = match self.get_attribute("class") {
            Some(prev) if prev.split_whitespace().any(|c| c == class) => return,
            Some(prev) if !prev.is_empty() => format!("{prev} {class}"),
            _ => class.to_owned(),
        };
        self.set_attribute("class", classes);
    }

    /// Add or replace a style property.
    pub fn set_style(&self, key: impl Into<Str>, value: impl Into<Str>) {
        let (key, value) = (key.into(), value.into());
        let mut styles = self.styles.get_mut();
        for (pkey, pval) in styles.iter_mut() {
            if pkey == &key {
                *pval = value;
                return;
            }
        }
        styles.push((key, value));
    }

    pub fn get_style(&self, key: impl AsRef<str>) -> Option<Str> {
        self.styles
            .get()
            .iter()
            .find(|(k, _)| k.as_str() == key.as_ref())
            .map(|(_, v)| v.clone())
    }

    pub fn remove_style(&self, key: impl AsRef<str>) {
        self.styles
            .get_mut()
            .retain(|(k, _)| k.as_str() != key.as_ref());
    }

    /// Style properties in insertion order.
    pub fn styles(&self) -> Vec<(Str, Str)> {
        self.styles.get().clone()
    }

    pub fn append_child(&self, child: impl Into<Node>) {
        self.children.get_mut().push(child.into());
    }

    pub fn remove_child(&self, child: &Node) {
        self.children.get_mut().retain(|c| c != child);
    }

    pub fn children(&self) -> Vec<Node> {
        self.children.get().clone()
    }

    /// Register a handler for the named event.
    pub fn on(&self, event: impl Into<Str>, handler: impl Fn() + 'static) {
        self.handlers
            .get_mut()
            .push((event.into(), Rc::new(handler)));
    }

    /// Names of the events this element has handlers for.
    pub fn events(&self) -> Vec<Str> {
        let mut names: Vec<Str> = vec![];
        for (name, _) in self.handlers.get().iter() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Dispatch the named event to this element's handlers, in registration
    /// order.
    ///
    /// Events do not bubble. Returns the number of handlers invoked.
    pub fn fire(&self, event: impl AsRef<str>) -> usize {
        // Handlers may add handlers or rebuild content, so don't hold the borrow.
        let handlers = self
            .handlers
            .get()
            .iter()
            .filter(|(name, _)| name.as_str() == event.as_ref())
            .map(|(_, handler)| handler.clone())
            .collect::<Vec<_>>();
        for handler in handlers.iter() {
            handler();
        }
        handlers.len()
    }

    /// Depth-first search for the first element (including this one) matching
    /// the predicate.
    pub fn find(&self, predicate: impl Fn(&Element) -> bool + Copy) -> Option<Element> {
        if predicate(self) {
            return Some(self.clone());
        }
        self.children.get().iter().find_map(|child| match child {
            Node::Element(el) => el.find(predicate),
            Node::Text(_) => None,
        })
    }

    /// Find the first element whose `key` attribute equals `value`.
    pub fn find_by_attribute(&self, key: &str, value: &str) -> Option<Element> {
        self.find(|el| el.get_attribute(key).as_deref() == Some(value))
    }

    pub fn with_attribute(self, key: impl Into<Str>, value: impl Into<Str>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn with_style(self, key: impl Into<Str>, value: impl Into<Str>) -> Self {
        self.set_style(key, value);
        self
    }

    pub fn with_child(self, child: impl Into<Node>) -> Self {
        self.append_child(child);
        self
    }

    pub fn with_handler(self, event: impl Into<Str>, handler: impl Fn() + 'static) -> Self {
        self.on(event, handler);
        self
    }

    /// Render this element as markup.
    pub fn html_string(&self) -> String {
        // Only certain nodes can be "void" - which means written as <tag /> when
        // the node contains no children. Writing non-void nodes in void notation
        // does some spooky things to the DOM at parse-time.
        fn tag_is_voidable(tag: &str) -> bool {
            matches!(
                tag,
                "area"
                    | "base"
                    | "br"
                    | "col"
                    | "hr"
                    | "img"
                    | "input"
                    | "link"
                    | "meta"
                    | "param"
                    | "command"
                    | "keygen"
                    | "source"
            )
        }

        let name = &self.name;
        let styles = self.styles.get();
        let mut attributes = self.attributes.get().clone();
        let children = self.children.get();

        if !styles.is_empty() {
            let styles = styles
                .iter()
                .map(|(k, v)| format!("{k}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            match attributes.iter_mut().find(|(k, _)| k == "style") {
                Some((_, Some(prev))) => *prev = format!("{prev} {styles}").into(),
                Some((_, value)) => *value = Some(styles.into()),
                None => attributes.push(("style".into(), Some(styles.into()))),
            }
        }

        let atts = attributes
            .iter()
            .map(|(key, may_val)| match may_val {
                Some(val) => format!(r#"{key}="{}""#, escape(val)),
                None => key.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        let open = if atts.is_empty() {
            name.to_string()
        } else {
            format!("{name} {atts}")
        };

        if children.is_empty() {
            if tag_is_voidable(name) {
                format!("<{open} />")
            } else {
                format!("<{open}></{name}>")
            }
        } else {
            let kids = children
                .iter()
                .map(Node::html_string)
                .collect::<Vec<_>>()
                .join("");
            format!("<{open}>{kids}</{name}>")
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Either an [`Element`] or a [`Text`].
#[derive(Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl From<Text> for Node {
    fn from(value: Text) -> Self {
        Node::Text(value)
    }
}

impl From<&Text> for Node {
    fn from(value: &Text) -> Self {
        Node::Text(value.clone())
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<&Element> for Node {
    fn from(value: &Element) -> Self {
        Node::Element(value.clone())
    }
}

impl From<&'static str> for Node {
    fn from(value: &'static str) -> Self {
        Node::Text(Text::new(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(Text::new(value))
    }
}

impl From<Str> for Node {
    fn from(value: Str) -> Self {
        Node::Text(Text::new(value))
    }
}

impl Node {
    pub fn element(name: impl Into<Str>) -> Self {
        Node::Element(Element::new(name))
    }

    pub fn text(text: impl Into<Str>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn html_string(&self) -> String {
        match self {
            Node::Element(el) => el.html_string(),
            Node::Text(text) => escape(text.text.get().as_str()),
        }
    }
}
