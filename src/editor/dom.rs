use super::{DomSchema, Registry};
use crate::html::{parse_fragment, write_html, DomNode, Element};
use crate::model::{Fragment, Node, NodeType, Schema};
use tracing::trace;

/// Turns HTML into document nodes, using the parse rules of a [`Registry`].
///
/// Elements that no rule recognises are transparent: their content is parsed in their place.
pub struct DomParser<'a, S: Schema> {
    registry: &'a Registry<S>,
}

impl<'a, S: DomSchema> DomParser<'a, S> {
    /// Create a parser for the given registry.
    pub fn new(registry: &'a Registry<S>) -> Self {
        DomParser { registry }
    }

    /// Parse an HTML string into a document node.
    pub fn parse_document(&self, html: &str) -> S::Node {
        let dom = parse_fragment(html);
        let mut blocks = self.parse_blocks(&dom);
        if blocks.is_empty() {
            blocks.push(S::paragraph(Fragment::new()));
        }
        S::doc(Fragment::from(blocks))
    }

    /// Parse DOM nodes as block content. Runs of inline content are wrapped in paragraphs;
    /// runs that only hold whitespace are dropped.
    pub fn parse_blocks(&self, nodes: &[DomNode]) -> Vec<S::Node> {
        self.group(nodes, S::paragraph)
    }

    /// Parse the content of a textblock. Block nodes found inside are lifted out, splitting
    /// the textblock around them. Always returns at least one textblock.
    pub fn parse_textblock<F>(&self, nodes: &[DomNode], wrap: F) -> Vec<S::Node>
    where
        F: Fn(Fragment<S>) -> S::Node,
    {
        let mut result = self.group(nodes, &wrap);
        if result.is_empty() {
            result.push(wrap(Fragment::new()));
        }
        result
    }

    /// Parse DOM nodes into a flat list of document nodes, inline and block mixed.
    pub fn parse_nodes(&self, nodes: &[DomNode]) -> Vec<S::Node> {
        let mut result = Vec::new();
        for node in nodes {
            match node {
                DomNode::Text(text) => {
                    let text = collapse_whitespace(text);
                    if !text.is_empty() {
                        result.push(S::Node::text(text));
                    }
                }
                DomNode::Element(el) => result.extend(self.parse_element(el)),
            }
        }
        result
    }

    fn parse_element(&self, el: &Element) -> Vec<S::Node> {
        for spec in self.registry.specs() {
            if let Some(parse) = spec.parse {
                if let Some(nodes) = parse(el, self) {
                    trace!(tag = %el.tag, node = spec.name, "parse rule matched");
                    return nodes;
                }
            }
        }
        self.parse_nodes(&el.children)
    }

    fn group<F>(&self, nodes: &[DomNode], wrap: F) -> Vec<S::Node>
    where
        F: Fn(Fragment<S>) -> S::Node,
    {
        let mut result = Vec::new();
        let mut inline = Vec::new();
        for node in self.parse_nodes(nodes) {
            if node.is_block() {
                flush::<S, _>(&mut inline, &mut result, &wrap);
                result.push(node);
            } else {
                inline.push(node);
            }
        }
        flush::<S, _>(&mut inline, &mut result, &wrap);
        result
    }
}

fn flush<S, F>(inline: &mut Vec<S::Node>, out: &mut Vec<S::Node>, wrap: &F)
where
    S: Schema,
    F: Fn(Fragment<S>) -> S::Node,
{
    let blank = inline
        .iter()
        .all(|n| n.text_node().map_or(false, |t| t.text.as_str().trim().is_empty()));
    if !blank {
        let content = inline
            .drain(..)
            .fold(Fragment::new(), |acc, n| acc.append(Fragment::from(vec![n])));
        out.push(wrap(content));
    }
    inline.clear();
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Turns document nodes into HTML, using the render functions of a [`Registry`].
pub struct DomSerializer<'a, S: Schema> {
    registry: &'a Registry<S>,
}

impl<'a, S: Schema> DomSerializer<'a, S> {
    /// Create a serializer for the given registry.
    pub fn new(registry: &'a Registry<S>) -> Self {
        DomSerializer { registry }
    }

    /// Serialize the content of a fragment.
    pub fn serialize_fragment(&self, fragment: &Fragment<S>) -> Vec<DomNode> {
        let mut out = Vec::with_capacity(fragment.child_count());
        for child in fragment.children() {
            self.serialize_node(child, &mut out);
        }
        out
    }

    fn serialize_node(&self, node: &S::Node, out: &mut Vec<DomNode>) {
        if let Some(text) = node.text_node() {
            out.push(DomNode::Text(text.text.as_str().to_owned()));
            return;
        }
        let rendered = self
            .registry
            .get(node.r#type().name())
            .and_then(|spec| spec.render)
            .and_then(|render| render(node));
        let children = node
            .content()
            .map(|c| self.serialize_fragment(c))
            .unwrap_or_default();
        match rendered {
            Some(mut el) => {
                el.children.extend(children);
                out.push(DomNode::Element(el));
            }
            None => out.extend(children),
        }
    }

    /// Serialize a document to an HTML string. The document node itself is not rendered.
    pub fn to_html(&self, doc: &S::Node) -> String {
        let nodes = doc
            .content()
            .map(|c| self.serialize_fragment(c))
            .unwrap_or_default();
        write_html(&nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, DomParser, DomSerializer};
    use crate::editor::{DomSchema, Registry};
    use crate::schema::{helper::*, ED};

    fn registry() -> Registry<ED> {
        Registry::new(ED::node_specs())
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("\n"), " ");
    }

    #[test]
    fn test_parse_base_nodes() {
        let registry = registry();
        let parser = DomParser::new(&registry);
        let doc_node = parser.parse_document(
            "<h1>Tea</h1>\n<p>Green <b>and</b> black<br>tea</p><blockquote><p>q</p></blockquote><hr>",
        );
        assert_eq!(
            doc_node,
            doc((
                h1("Tea"),
                p(("Green and black", br(), "tea")),
                blockquote((p("q"),)),
                hr(),
            ))
        );
    }

    #[test]
    fn test_parse_wraps_stray_inline() {
        let registry = registry();
        let parser = DomParser::new(&registry);
        assert_eq!(
            parser.parse_document("loose <div>text</div>"),
            doc((p("loose text"),))
        );
        assert_eq!(parser.parse_document(""), doc((p(()),)));
        assert_eq!(parser.parse_document("<p></p>"), doc((p(()),)));
    }

    #[test]
    fn test_serialize_base_nodes() {
        let registry = registry();
        let serializer = DomSerializer::new(&registry);
        let doc_node = doc((h(2, "A & B"), p(("x", br(), "y")), hr()));
        assert_eq!(
            serializer.to_html(&doc_node),
            "<h2>A &amp; B</h2><p>x<br>y</p><hr>"
        );
    }
}
