use super::dom::{is_void, DomNode, Element};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use tracing::{trace, warn};

#[derive(Default)]
struct Sink {
    roots: Vec<DomNode>,
    stack: Vec<Element>,
}

impl Sink {
    fn push_node(&mut self, node: DomNode) {
        let children = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        if let DomNode::Text(text) = &node {
            if let Some(DomNode::Text(prev)) = children.last_mut() {
                prev.push_str(text);
                return;
            }
        }
        children.push(node);
    }

    fn close(&mut self, name: &str) {
        // Unmatched end tags are ignored, open elements in between are closed implicitly.
        if let Some(idx) = self.stack.iter().rposition(|el| el.tag == name) {
            while self.stack.len() > idx {
                if let Some(el) = self.stack.pop() {
                    self.push_node(DomNode::Element(el));
                }
            }
        } else {
            trace!(tag = name, "unmatched end tag");
        }
    }

    fn finish(mut self) -> Vec<DomNode> {
        while let Some(el) = self.stack.pop() {
            self.push_node(DomNode::Element(el));
        }
        self.roots
    }
}

impl TokenSink for Sink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line: u64) -> TokenSinkResult<Self::Handle> {
        match token {
            Token::TagToken(tag) => {
                let name = tag.name.to_string();
                match tag.kind {
                    TagKind::StartTag => {
                        let mut el = Element::new(name);
                        for attr in &tag.attrs {
                            el.set_attr(attr.name.local.to_string(), attr.value.to_string());
                        }
                        if tag.self_closing || is_void(&el.tag) {
                            self.push_node(DomNode::Element(el));
                        } else {
                            self.stack.push(el);
                        }
                    }
                    TagKind::EndTag if is_void(&name) => {}
                    TagKind::EndTag => self.close(&name),
                }
            }
            Token::CharacterTokens(s) => self.push_node(DomNode::Text(s.to_string())),
            // only emitted in the data state, where the character is kept as is
            Token::NullCharacterToken => {
                trace!("null character in text");
                self.push_node(DomNode::Text('\0'.to_string()));
            }
            Token::ParseError(err) => trace!(%err, "html parse error"),
            Token::DoctypeToken(_) | Token::CommentToken(_) | Token::EOFToken => {}
        }
        TokenSinkResult::Continue
    }
}

/// Parse an HTML fragment into a list of top-level DOM nodes.
///
/// The tokenizer is lenient: unclosed elements are closed at the end of input and stray end
/// tags are dropped.
pub fn parse_fragment(html: &str) -> Vec<DomNode> {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let mut tok = Tokenizer::new(Sink::default(), TokenizerOpts::default());
    match tok.feed(&mut input) {
        TokenizerResult::Done => {}
        // the sink never asks for script execution
        TokenizerResult::Script(()) => warn!("tokenizer paused for a script"),
    }
    tok.end();

    let sink = std::mem::take(&mut tok.sink);
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::parse_fragment;
    use crate::html::{DomNode, Element};

    #[test]
    fn test_parse_figure() {
        let nodes = parse_fragment(
            r#"<figure><img data-resizable-image="true" src="a&amp;b.png" width="10"><figcaption>▲ hi</figcaption></figure>"#,
        );
        assert_eq!(
            nodes,
            vec![DomNode::Element(
                Element::new("figure")
                    .child(
                        Element::new("img")
                            .attr("data-resizable-image", "true")
                            .attr("src", "a&b.png")
                            .attr("width", "10")
                    )
                    .child(Element::new("figcaption").text("▲ hi"))
            )]
        );
    }

    #[test]
    fn test_parse_keeps_special_characters() {
        let nodes = parse_fragment("<p>a\u{0}b&#13;\nc</p>");
        assert_eq!(
            nodes,
            vec![DomNode::Element(Element::new("p").text("a\u{0}b\r\nc"))]
        );
    }

    #[test]
    fn test_parse_lenient() {
        let nodes = parse_fragment("<p>one<br/>two</span><p>three");
        assert_eq!(
            nodes,
            vec![
                DomNode::Element(
                    Element::new("p")
                        .text("one")
                        .child(Element::new("br"))
                        .text("two")
                        .child(Element::new("p").text("three"))
                ),
            ]
        );
    }
}
