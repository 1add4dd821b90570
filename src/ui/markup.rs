//! Owned markup tree for the widget.
//!
//! Rendering produces an [`Element`] tree rather than a string so callers can
//! query it the way component test utilities query a mounted DOM
//! (`contains(".alert")`, `find("a")`, `attr("href")`), and serialize it with
//! [`Element::to_html`] when it has to reach a real webview.

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends one or more whitespace-separated classes.
    pub fn with_class(mut self, classes: &str) -> Self {
        let merged = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, classes),
            _ => classes.to_string(),
        };
        self.set_attr("class", &merged);
        self
    }

    /// Sets an attribute, replacing any previous value.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name, value.to_string())),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of all descendant text nodes, trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        if selector.is_empty() {
            return false;
        }
        if let Some(tag) = &selector.tag {
            if !self.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        selector.classes.iter().all(|c| self.has_class(c))
            && selector.attrs.iter().all(|a| self.attr(a).is_some())
    }

    /// First element matching `selector` in document order, the root included.
    pub fn find(&self, selector: &str) -> Option<&Element> {
        let selector = Selector::parse(selector);
        self.find_parsed(&selector)
    }

    fn find_parsed(&self, selector: &Selector) -> Option<&Element> {
        if self.matches(selector) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(e) => e.find_parsed(selector),
            Node::Text(_) => None,
        })
    }

    /// All elements matching `selector` in document order, the root included.
    pub fn find_all(&self, selector: &str) -> Vec<&Element> {
        let selector = Selector::parse(selector);
        let mut found = Vec::new();
        self.collect_matches(&selector, &mut found);
        found
    }

    fn collect_matches<'a>(&'a self, selector: &Selector, found: &mut Vec<&'a Element>) {
        if self.matches(selector) {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(e) = child {
                e.collect_matches(selector, found);
            }
        }
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.find(selector).is_some()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&escape_text(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// A simple selector: optional tag, any number of `.class` and `[attr]` parts.
///
/// `"a"`, `".card"`, `"[title]"`, `"button.btn"`, `"span.badge[title]"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Self {
        let mut selector = Selector::default();
        let mut chars = input.trim().chars().peekable();

        let tag: String = std::iter::from_fn(|| chars.next_if(|c| is_ident_char(*c))).collect();
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    let class: String =
                        std::iter::from_fn(|| chars.next_if(|c| is_ident_char(*c))).collect();
                    if !class.is_empty() {
                        selector.classes.push(class);
                    }
                }
                '[' => {
                    let attr: String = std::iter::from_fn(|| chars.next_if(|c| *c != ']')).collect();
                    let _ = chars.next_if_eq(&']');
                    let attr = attr.trim();
                    if !attr.is_empty() {
                        selector.attrs.push(attr.to_ascii_lowercase());
                    }
                }
                _ => {}
            }
        }

        selector
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
