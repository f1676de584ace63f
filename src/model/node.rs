use super::{
    replace, util, Fragment, Index, NodeType, ReplaceError, ResolveErr, ResolvedPos, Schema,
    Slice, TextNode,
};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt::Debug;
use std::ops::RangeBounds;

/// This trait represents a node in the tree that makes up a document. So a document is
/// an instance of Node, with children that are also instances of Node.
pub trait Node<S: Schema<Node = Self> + 'static>:
    Serialize + for<'de> Deserialize<'de> + Clone + Debug + PartialEq + Eq
{
    /// The type of this node
    fn r#type(&self) -> S::NodeType;

    /// A container holding the node's children.
    fn content(&self) -> Option<&Fragment<S>>;

    /// Create a new node with the same markup as this node, containing the given content (or
    /// empty, if no content is given).
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>;

    /// Get the text node data if this is a text node
    fn text_node(&self) -> Option<&TextNode>;

    /// Create a new text node
    fn new_text_node(node: TextNode) -> Self;

    /// Creates a new text node
    fn text<A: Into<String>>(text: A) -> Self {
        Self::new_text_node(TextNode {
            text: super::Text::from(text.into()),
        })
    }

    /// Create a copy of this node with only the content between the given positions.
    fn cut<R: RangeBounds<usize>>(&self, range: R) -> Cow<Self> {
        let from = util::from(&range);

        if let Some(node) = self.text_node() {
            let len = node.text.len_utf16();
            let to = usize::min(util::to(&range, len), len);

            if from == 0 && to == len {
                return Cow::Borrowed(self);
            }
            let (_, rest) = util::split_at_utf16(node.text.as_str(), from);
            let (rest, _) = util::split_at_utf16(rest, to.saturating_sub(from));

            Cow::Owned(Self::text(rest))
        } else {
            let content_size = self.content_size();
            let to = util::to(&range, content_size);

            if from == 0 && to == content_size {
                Cow::Borrowed(self)
            } else {
                Cow::Owned(self.copy(|c| c.cut(from..to)))
            }
        }
    }

    /// Resolve the given position in the document, returning a struct with information about its
    /// context.
    fn resolve(&self, pos: usize) -> Result<ResolvedPos<S>, ResolveErr> {
        ResolvedPos::resolve(self, pos)
    }

    /// Replace the part of the document between the given positions with the given slice.
    ///
    /// Only flat replacements are supported: both positions must point into the same parent
    /// and the slice must be closed on both sides.
    fn replace<R: RangeBounds<usize>>(
        &self,
        range: R,
        slice: &Slice<S>,
    ) -> Result<Self, ReplaceError> {
        let from = util::from(&range);
        let to = util::to(&range, self.content_size());
        replace(self, from, to, slice)
    }

    /// Find the node directly after the given position.
    fn node_at(&self, pos: usize) -> Option<&Self> {
        let mut node = self;
        let mut pos = pos;
        loop {
            let content = node.content()?;
            let Index { index, offset } = content.find_index(pos, false).ok()?;
            let child = content.child(index)?;
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }

    /// Call `f` for every descendant node, with its absolute position. When the callback
    /// returns false, the children of that node are skipped.
    fn descendants<F: FnMut(&Self, usize) -> bool>(&self, f: &mut F) {
        if let Some(content) = self.content() {
            content.nodes_between(0, content.size(), f, 0)
        }
    }

    /// Concatenates all the text nodes found in this node and its children.
    fn text_content(&self) -> String {
        if let Some(node) = self.text_node() {
            node.text.as_str().to_owned()
        } else {
            let mut buf = String::new();
            if let Some(c) = self.content() {
                for child in c.children() {
                    buf.push_str(&child.text_content());
                }
            }
            buf
        }
    }

    /// Represents `.content.size` in JS
    fn content_size(&self) -> usize {
        self.content().map(Fragment::size).unwrap_or(0)
    }

    /// Get the child node at the given index, if it exists.
    fn child(&self, index: usize) -> Option<&Self> {
        self.content().and_then(|c| c.child(index))
    }

    /// The number of children that the node has.
    fn child_count(&self) -> usize {
        self.content().map_or(0, Fragment::child_count)
    }

    /// True when this is a leaf node.
    fn is_leaf(&self) -> bool {
        self.content().is_none()
    }

    /// True when this is a block (non-inline node)
    fn is_block(&self) -> bool {
        self.r#type().is_block()
    }

    /// True when this is an inline node
    fn is_inline(&self) -> bool {
        self.r#type().is_inline()
    }

    /// True when this is an atom, i.e. when it does not have directly editable content.
    fn is_atom(&self) -> bool {
        self.is_leaf() || self.r#type().is_atom()
    }

    /// True when this is a text node.
    fn is_text(&self) -> bool {
        self.text_node().is_some()
    }

    /// The size of this node, as defined by the integer-based indexing scheme. For text nodes,
    /// this is the amount of characters. For other leaf nodes, it is one. For non-leaf nodes, it
    /// is the size of the content plus two (the start and end token).
    fn node_size(&self) -> usize {
        match self.content() {
            Some(c) => c.size() + 2,
            None => {
                if let Some(node) = self.text_node() {
                    node.text.len_utf16()
                } else {
                    1
                }
            }
        }
    }
}

/// A string that stores its length in utf-16
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Text {
    len_utf16: usize,
    content: String,
}

impl Text {
    /// Return the contained string
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// The length of this string if it were encoded in utf-16
    pub fn len_utf16(&self) -> usize {
        self.len_utf16
    }
}

impl From<String> for Text {
    fn from(src: String) -> Text {
        Text {
            len_utf16: src.encode_utf16().count(),
            content: src,
        }
    }
}

impl Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.content.serialize(serializer)
    }
}
