//! # Helpers
//!
//! This module contains some functions to create nodes programmatically.
//!
//! See also: <https://github.com/prosemirror/prosemirror-test-builder>
use super::{EditorNode, HeadingAttrs, ED};
use crate::image::ImageAttrs;
use crate::model::{self, AttrNode, Block, Leaf};

type Fragment = model::Fragment<ED>;

impl From<&str> for Fragment {
    fn from(s: &str) -> Fragment {
        Fragment::from(vec![EditorNode::from(s)])
    }
}

impl From<EditorNode> for Fragment {
    fn from(node: EditorNode) -> Fragment {
        Fragment::from(vec![node])
    }
}

impl From<()> for Fragment {
    fn from(_: ()) -> Fragment {
        Fragment::new()
    }
}

/// Create a document node.
pub fn doc<A: Into<Fragment>>(content: A) -> EditorNode {
    EditorNode::Doc(Block {
        content: content.into(),
    })
}

/// Create a heading node.
pub fn h<A: Into<Fragment>>(level: u8, content: A) -> EditorNode {
    EditorNode::Heading(AttrNode {
        attrs: HeadingAttrs { level },
        content: content.into(),
    })
}

/// Create a heading (level 1) node.
pub fn h1<A: Into<Fragment>>(content: A) -> EditorNode {
    h(1, content)
}

/// Create a paragraph node.
pub fn p<A: Into<Fragment>>(content: A) -> EditorNode {
    EditorNode::Paragraph(Block {
        content: content.into(),
    })
}

/// Create a blockquote node.
pub fn blockquote<A: Into<Fragment>>(content: A) -> EditorNode {
    EditorNode::Blockquote(Block {
        content: content.into(),
    })
}

/// Create a horizontal rule.
pub fn hr() -> EditorNode {
    EditorNode::HorizontalRule
}

/// Create a hard break.
pub fn br() -> EditorNode {
    EditorNode::HardBreak
}

/// Create a resizable image node.
pub fn img(attrs: ImageAttrs) -> EditorNode {
    EditorNode::ResizableImage(Leaf { attrs })
}

/// Create a node.
pub fn node<A: Into<EditorNode>>(src: A) -> EditorNode {
    src.into()
}
