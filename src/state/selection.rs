use crate::model::{Node, Schema};
use crate::transform::{Assoc, Mapping};
use serde::{Deserialize, Serialize};

/// The current selection in an editor
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Selection {
    /// A text selection; a cursor when `anchor == head`
    Text {
        /// The side that does not move when the selection is extended
        anchor: usize,
        /// The moving side of the selection
        head: usize,
    },
    /// A single selected node, identified by the position directly before it
    Node {
        /// The position before the node
        pos: usize,
    },
}

impl Default for Selection {
    fn default() -> Self {
        Selection::cursor(0)
    }
}

impl Selection {
    /// A collapsed text selection
    pub fn cursor(pos: usize) -> Self {
        Selection::Text {
            anchor: pos,
            head: pos,
        }
    }

    /// A node selection of the node after `pos`
    pub fn node(pos: usize) -> Self {
        Selection::Node { pos }
    }

    /// The lower bound of the selection's main range.
    pub fn from(&self) -> usize {
        match *self {
            Self::Text { anchor, head } => usize::min(anchor, head),
            Self::Node { pos } => pos,
        }
    }

    /// The upper bound of the selection's main range.
    pub fn to(&self) -> usize {
        match *self {
            Self::Text { anchor, head } => usize::max(anchor, head),
            Self::Node { pos } => pos + 1,
        }
    }

    /// True when this is a node selection of the node at `pos`.
    pub fn is_node_at(&self, pos: usize) -> bool {
        matches!(*self, Self::Node { pos: p } if p == pos)
    }

    /// Map this selection through a mapping. A node selection whose node was deleted collapses
    /// into a cursor.
    pub fn map(&self, mapping: &Mapping) -> Self {
        match *self {
            Self::Text { anchor, head } => Self::Text {
                anchor: mapping.map(anchor, Assoc::After),
                head: mapping.map(head, Assoc::After),
            },
            Self::Node { pos } => {
                let result = mapping.map_result(pos, Assoc::After);
                if result.deleted {
                    Self::cursor(result.pos)
                } else {
                    Self::node(result.pos)
                }
            }
        }
    }

    /// Make sure the selection is valid in `doc`: positions are clamped to the document and a
    /// node selection must point at a non-text node.
    pub fn validate<S: Schema>(self, doc: &S::Node) -> Self {
        let max = doc.content_size();
        match self {
            Self::Text { anchor, head } => Self::Text {
                anchor: usize::min(anchor, max),
                head: usize::min(head, max),
            },
            Self::Node { pos } => match doc.node_at(pos) {
                Some(node) if !node.is_text() => self,
                _ => Self::cursor(usize::min(pos, max)),
            },
        }
    }
}
