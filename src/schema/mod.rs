//! # The editor schema
//!
//! The node types of the article editor: a small set of text blocks plus the resizable image.
//! Nodes serialize to the usual JSON document format, e.g.
//! `{"type": "resizableImage", "attrs": {"src": "a.png", "width": 300, ...}}`.
mod attrs;
pub mod helper;
mod html;

pub use attrs::HeadingAttrs;

use crate::editor::{DomSchema, NodeSpec};
use crate::image::{ImageAttrs, ImageSchema};
use crate::model::{AttrNode, Block, Fragment, Leaf, Node, NodeImpl, NodeType, Schema, TextNode};
use serde::{Deserialize, Serialize};

/// The editor schema type
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ED;

impl Schema for ED {
    type Node = EditorNode;
    type NodeType = EditorNodeType;
}

/// The node type for the editor schema
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorNode {
    /// The document root
    Doc(Block<ED>),
    /// A paragraph
    Paragraph(Block<ED>),
    /// A heading, e.g. `<h1>`
    Heading(AttrNode<ED, HeadingAttrs>),
    /// A blockquote
    Blockquote(Block<ED>),
    /// A horizontal line `<hr>`
    HorizontalRule,
    /// A hard break `<br>`
    HardBreak,
    /// A text node
    Text(TextNode),
    /// A resizable image with an optional caption
    ResizableImage(Leaf<ImageAttrs>),
}

impl From<TextNode> for EditorNode {
    fn from(text_node: TextNode) -> Self {
        Self::Text(text_node)
    }
}

impl From<&str> for EditorNode {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl Node<ED> for EditorNode {
    fn r#type(&self) -> EditorNodeType {
        match self {
            Self::Doc { .. } => EditorNodeType::Doc,
            Self::Paragraph { .. } => EditorNodeType::Paragraph,
            Self::Heading { .. } => EditorNodeType::Heading,
            Self::Blockquote { .. } => EditorNodeType::Blockquote,
            Self::HorizontalRule => EditorNodeType::HorizontalRule,
            Self::HardBreak => EditorNodeType::HardBreak,
            Self::Text { .. } => EditorNodeType::Text,
            Self::ResizableImage { .. } => EditorNodeType::ResizableImage,
        }
    }

    fn content(&self) -> Option<&Fragment<ED>> {
        match self {
            Self::Doc(block) => block.content(),
            Self::Paragraph(block) => block.content(),
            Self::Heading(node) => node.content(),
            Self::Blockquote(block) => block.content(),
            Self::HorizontalRule => None,
            Self::HardBreak => None,
            Self::Text { .. } => None,
            Self::ResizableImage { .. } => None,
        }
    }

    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<ED>) -> Fragment<ED>,
    {
        match self {
            Self::Doc(block) => Self::Doc(block.copy(map)),
            Self::Paragraph(block) => Self::Paragraph(block.copy(map)),
            Self::Heading(node) => Self::Heading(node.copy(map)),
            Self::Blockquote(block) => Self::Blockquote(block.copy(map)),
            Self::HorizontalRule => Self::HorizontalRule,
            Self::HardBreak => Self::HardBreak,
            Self::Text(node) => Self::Text(node.clone()),
            Self::ResizableImage(img) => Self::ResizableImage(img.clone()),
        }
    }

    fn text_node(&self) -> Option<&TextNode> {
        if let Self::Text(node) = self {
            Some(node)
        } else {
            None
        }
    }

    fn new_text_node(node: TextNode) -> Self {
        Self::Text(node)
    }
}

/// The node-spec type for the editor schema
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditorNodeType {
    /// The document root
    Doc,
    /// A paragraph
    Paragraph,
    /// A heading, e.g. `<h1>`
    Heading,
    /// A blockquote
    Blockquote,
    /// A horizontal line `<hr>`
    HorizontalRule,
    /// A hard break `<br>`
    HardBreak,
    /// A text node
    Text,
    /// A resizable image
    ResizableImage,
}

impl NodeType<ED> for EditorNodeType {
    fn name(self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Blockquote => "blockquote",
            Self::HorizontalRule => "horizontalRule",
            Self::HardBreak => "hardBreak",
            Self::Text => "text",
            Self::ResizableImage => "resizableImage",
        }
    }

    fn is_block(self) -> bool {
        matches!(
            self,
            Self::Doc
                | Self::Paragraph
                | Self::Heading
                | Self::Blockquote
                | Self::HorizontalRule
                | Self::ResizableImage
        )
    }

    fn is_textblock(self) -> bool {
        matches!(self, Self::Paragraph | Self::Heading)
    }

    fn is_atom(self) -> bool {
        self == Self::ResizableImage
    }

    fn valid_content(self, fragment: &Fragment<ED>) -> bool {
        let children = fragment.children();
        match self {
            // block+
            Self::Doc | Self::Blockquote => {
                !children.is_empty() && children.iter().all(Node::is_block)
            }
            // inline*
            Self::Paragraph | Self::Heading => children.iter().all(Node::is_inline),
            Self::HorizontalRule | Self::HardBreak | Self::Text | Self::ResizableImage => {
                children.is_empty()
            }
        }
    }
}

impl DomSchema for ED {
    fn doc(content: Fragment<ED>) -> EditorNode {
        EditorNode::Doc(Block { content })
    }

    fn paragraph(content: Fragment<ED>) -> EditorNode {
        EditorNode::Paragraph(Block { content })
    }

    fn node_specs() -> Vec<NodeSpec<ED>> {
        html::base_specs()
    }
}

impl ImageSchema for ED {
    fn image_node(attrs: ImageAttrs) -> EditorNode {
        EditorNode::ResizableImage(Leaf { attrs })
    }

    fn image_attrs(node: &EditorNode) -> Option<&ImageAttrs> {
        match node {
            EditorNode::ResizableImage(Leaf { attrs }) => Some(attrs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{helper::*, EditorNode, EditorNodeType, ED};
    use crate::image::{Align, ImageAttrs};
    use crate::model::{Fragment, Node, NodeType};

    #[test]
    fn test_json_format() {
        let image = img(ImageAttrs {
            src: Some("a.png".into()),
            ..Default::default()
        });
        let json = serde_json::to_value(doc((p("x"), image.clone()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "doc",
                "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "x"}]},
                    {"type": "resizableImage", "attrs": {
                        "src": "a.png", "width": 300, "height": 200, "alt": null,
                        "caption": "", "align": "left"
                    }},
                ]
            })
        );
        let parsed: EditorNode = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, doc((p("x"), image)));
    }

    #[test]
    fn test_deserialize_image_defaults() {
        let node: EditorNode = serde_json::from_str(
            r#"{"type": "resizableImage", "attrs": {"src": "b.png", "caption": null, "align": "center"}}"#,
        )
        .unwrap();
        assert_eq!(
            node,
            img(ImageAttrs {
                src: Some("b.png".into()),
                align: Align::Center,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_node_types() {
        let image = img(Default::default());
        assert_eq!(image.r#type(), EditorNodeType::ResizableImage);
        assert_eq!(image.r#type().name(), "resizableImage");
        assert!(image.is_block() && image.is_atom() && image.is_leaf());
        assert!(br().is_inline());
        assert!(EditorNodeType::Heading.is_textblock());
        assert!(!EditorNodeType::Blockquote.is_textblock());
    }

    #[test]
    fn test_valid_content() {
        let blocks: Fragment<ED> = Fragment::from((p("a"), img(Default::default())));
        let inline: Fragment<ED> = Fragment::from((node("a"), br()));
        assert!(EditorNodeType::Doc.valid_content(&blocks));
        assert!(!EditorNodeType::Doc.valid_content(&inline));
        assert!(!EditorNodeType::Doc.valid_content(&Fragment::new()));
        assert!(EditorNodeType::Paragraph.valid_content(&inline));
        assert!(EditorNodeType::Paragraph.valid_content(&Fragment::new()));
        assert!(!EditorNodeType::Heading.valid_content(&blocks));
        assert!(!EditorNodeType::ResizableImage.valid_content(&inline));
    }
}
