use std::fmt::{self, Write};

/// A node in a small, owned DOM tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// An element with attributes and children
    Element(Element),
    /// A run of (unescaped) text
    Text(String),
}

impl DomNode {
    /// The element, if this is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// The text content of this node and all its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Self::Element(el) => el.text_content(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<Element> for DomNode {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for DomNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for DomNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An HTML element. Attributes keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// The lowercase tag name
    pub tag: String,
    /// The attributes, in document order
    pub attrs: Vec<(String, String)>,
    /// The child nodes
    pub children: Vec<DomNode>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new<T: Into<String>>(tag: T) -> Self {
        Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value.
    pub fn attr<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child node.
    pub fn child<N: Into<DomNode>>(mut self, node: N) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child.
    pub fn text<T: Into<String>>(self, text: T) -> Self {
        self.child(DomNode::Text(text.into()))
    }

    /// Set an attribute in place, replacing an existing value.
    pub fn set_attr<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Get the value of an attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether an attribute is present, regardless of its value.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Iterate over the element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(DomNode::as_element)
    }

    /// Find the first descendant element (depth first) with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        for child in self.child_elements() {
            if child.tag == tag {
                return Some(child);
            }
            if let Some(found) = child.find(tag) {
                return Some(found);
            }
        }
        None
    }

    /// The concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut buf = String::new();
        for child in &self.children {
            buf.push_str(&child.text_content());
        }
        buf
    }

    /// Serialize this element to an HTML string.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"", name)?;
            escape(f, value, true)?;
            f.write_char('"')?;
        }
        f.write_char('>')?;
        if is_void(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(el) => fmt::Display::fmt(el, f),
            Self::Text(text) => escape(f, text, false),
        }
    }
}

/// Serialize a list of nodes to an HTML string.
pub fn write_html(nodes: &[DomNode]) -> String {
    let mut buf = String::new();
    for node in nodes {
        // writing into a String can't fail
        let _ = write!(buf, "{}", node);
    }
    buf
}

fn escape<W: Write>(out: &mut W, text: &str, attr: bool) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' if attr => out.write_str("&quot;")?,
            // the tokenizer folds raw CR and CRLF into LF
            '\r' => out.write_str("&#13;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

/// Elements that never have content or an end tag.
pub(crate) fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::{write_html, DomNode, Element};

    #[test]
    fn test_serialize_escapes() {
        let el = Element::new("p")
            .attr("title", "a \"quote\" & more")
            .text("1 < 2");
        assert_eq!(
            el.to_html(),
            r#"<p title="a &quot;quote&quot; &amp; more">1 &lt; 2</p>"#
        );
    }

    #[test]
    fn test_serialize_carriage_return() {
        let el = Element::new("p").attr("title", "a\rb").text("c\r\nd");
        assert_eq!(el.to_html(), "<p title=\"a&#13;b\">c&#13;\nd</p>");
    }

    #[test]
    fn test_void_elements() {
        let nodes = vec![
            DomNode::from(Element::new("img").attr("src", "a.png")),
            DomNode::from(Element::new("br")),
        ];
        assert_eq!(write_html(&nodes), r#"<img src="a.png"><br>"#);
    }

    #[test]
    fn test_find_and_attrs() {
        let el = Element::new("figure")
            .attr("data-x", "1")
            .child(Element::new("div").child(Element::new("img").attr("src", "b")))
            .attr("data-x", "2");
        assert_eq!(el.get_attr("data-x"), Some("2"));
        assert_eq!(el.attrs.len(), 1);
        assert!(el.has_attr("data-x"));
        assert_eq!(el.find("img").and_then(|i| i.get_attr("src")), Some("b"));
        assert_eq!(el.find("figcaption"), None);
    }
}
