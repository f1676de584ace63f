use super::{Fragment, Node, Text};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// This type represents a schema.
pub trait Schema: Sized + 'static {
    /// This type represents any of the nodes that are valid in the schema.
    type Node: Node<Self>;
    /// This type represents any of the node types that are valid in the schema.
    type NodeType: NodeType<Self>;
}

/// The type of a node, i.e. the static information shared by all nodes of one kind.
pub trait NodeType<S: Schema>: Copy + Clone + Debug + PartialEq + Eq {
    /// The name used for this type in serialized documents and in the node registry.
    fn name(self) -> &'static str;

    /// True if this is a block type.
    fn is_block(self) -> bool;

    /// True if this is an inline type.
    fn is_inline(self) -> bool {
        !self.is_block()
    }

    /// True if this is a block type with inline content.
    fn is_textblock(self) -> bool;

    /// True if nodes of this type can't be entered for editing, even if they have content.
    fn is_atom(self) -> bool {
        false
    }

    /// Returns true if the given fragment is valid content for this node type.
    fn valid_content(self, fragment: &Fragment<S>) -> bool;
}

/// Implemented for model data containers
pub trait NodeImpl<S: Schema> {
    /// Copy the data using the mapping function for child content
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>;

    /// Get the content of this node
    fn content(&self) -> Option<&Fragment<S>>;
}

/// A simple block node
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    Default(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "")]
pub struct Block<S: Schema> {
    /// The content.
    #[serde(default)]
    pub content: Fragment<S>,
}

impl<S: Schema> NodeImpl<S> for Block<S> {
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        Block {
            content: map(&self.content),
        }
    }

    fn content(&self) -> Option<&Fragment<S>> {
        Some(&self.content)
    }
}

/// A node with attributes
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = "A: Debug"),
    Clone(bound = "A: Clone"),
    Default(bound = "A: Default"),
    PartialEq(bound = "A: PartialEq"),
    Eq(bound = "A: Eq")
)]
#[serde(bound = "A: for<'d> Deserialize<'d> + Serialize")]
pub struct AttrNode<S: Schema, A> {
    /// Attributes
    pub attrs: A,

    /// The content.
    #[serde(default)]
    pub content: Fragment<S>,
}

impl<S: Schema, A: Clone> NodeImpl<S> for AttrNode<S, A> {
    fn copy<F>(&self, map: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        AttrNode {
            content: map(&self.content),
            attrs: self.attrs.clone(),
        }
    }

    fn content(&self) -> Option<&Fragment<S>> {
        Some(&self.content)
    }
}

/// A leaf node (just attributes)
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Leaf<A> {
    /// Attributes
    pub attrs: A,
}

impl<S: Schema, A: Clone> NodeImpl<S> for Leaf<A> {
    fn copy<F>(&self, _: F) -> Self
    where
        F: FnOnce(&Fragment<S>) -> Fragment<S>,
    {
        self.clone()
    }

    fn content(&self) -> Option<&Fragment<S>> {
        None
    }
}

/// A text node
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TextNode {
    /// The actual text
    pub text: Text,
}

impl TextNode {
    /// Create a new `TextNode` by appending `other` to this node's text
    pub fn join(&self, other: &TextNode) -> TextNode {
        let mut joined = self.text.as_str().to_owned();
        joined.push_str(other.text.as_str());
        TextNode {
            text: Text::from(joined),
        }
    }
}
