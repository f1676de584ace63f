use super::{Index, IndexError, Node, Schema};
use derivative::Derivative;
use displaydoc::Display;
use std::borrow::Cow;
use thiserror::Error;

/// Errors at `resolve`
#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq)]
pub enum ResolveErr {
    /// Position {pos} out of range
    RangeError {
        /// The position that was out of range
        pos: usize,
    },
    /// Index error: {0}
    Index(#[from] IndexError),
}

/// One level of a resolved position
#[derive(Derivative, new)]
#[derivative(Debug(bound = ""), PartialEq(bound = ""), Eq(bound = ""))]
pub(crate) struct ResolvedNode<'a, S: Schema> {
    pub node: &'a S::Node,
    pub index: usize,
    pub before: usize,
}

impl<'a, S: Schema> Clone for ResolvedNode<'a, S> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            index: self.index,
            before: self.before,
        }
    }
}

impl<'a, S: Schema> Copy for ResolvedNode<'a, S> {}

/// You can resolve a position to get more information about it. Objects of this class represent
/// such a resolved position, providing various pieces of context information, and some helper
/// methods.
#[derive(Derivative)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct ResolvedPos<'a, S: Schema> {
    pub(crate) pos: usize,
    path: Vec<ResolvedNode<'a, S>>,
    pub(crate) parent_offset: usize,
    pub(crate) depth: usize,
}

impl<'a, S: Schema> ResolvedPos<'a, S> {
    fn new(pos: usize, path: Vec<ResolvedNode<'a, S>>, parent_offset: usize) -> Self {
        Self {
            depth: path.len() - 1,
            pos,
            path,
            parent_offset,
        }
    }

    /// The position that was resolved.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The number of levels the parent node is from the root. If this position points directly
    /// into the root node, it is 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The offset into the position's parent node.
    pub fn parent_offset(&self) -> usize {
        self.parent_offset
    }

    /// The parent node that the position points into. Note that even if
    /// a position points into a text node, that node is not considered
    /// the parent. Text nodes are flat in this model, and have no content.
    pub fn parent(&self) -> &'a S::Node {
        self.node(self.depth)
    }

    /// The root node in which the position was resolved.
    pub fn doc(&self) -> &'a S::Node {
        self.node(0)
    }

    /// The ancestor node at the given level. `p.node(p.depth())` is the same as `p.parent()`.
    pub fn node(&self, depth: usize) -> &'a S::Node {
        self.path[depth].node
    }

    /// The index into the ancestor at the given level. If this points at the 3rd node in the
    /// 2nd paragraph on the top level, for example, `p.index(0)` is 1 and `p.index(1)` is 2.
    pub fn index(&self, depth: usize) -> usize {
        self.path[depth].index
    }

    /// The (absolute) position at the start of the node at the given level.
    pub fn start(&self, depth: usize) -> usize {
        if depth == 0 {
            0
        } else {
            self.path[depth - 1].before + 1
        }
    }

    /// The (absolute) position at the end of the node at the given level.
    pub fn end(&self, depth: usize) -> usize {
        self.start(depth) + self.node(depth).content_size()
    }

    /// The (absolute) position directly before the wrapping node at the given level, or, when
    /// depth is `self.depth + 1`, the original position.
    pub fn before(&self, depth: usize) -> Option<usize> {
        if depth == 0 {
            None
        } else if depth == self.depth + 1 {
            Some(self.pos)
        } else {
            Some(self.path[depth - 1].before)
        }
    }

    /// The (absolute) position directly after the wrapping node at the given level, or the
    /// original position when depth is `self.depth + 1`.
    pub fn after(&self, depth: usize) -> Option<usize> {
        if depth == 0 {
            None
        } else if depth == self.depth + 1 {
            Some(self.pos)
        } else {
            Some(self.path[depth - 1].before + self.path[depth].node.node_size())
        }
    }

    /// When this position points into a text node, this returns the distance between the position
    /// and the start of the text node. Will be zero for positions that point between nodes.
    pub fn text_offset(&self) -> usize {
        self.path
            .last()
            .map_or(0, |level| self.pos.saturating_sub(level.before))
    }

    /// Get the node directly before the position, if any. If the position points into a text node,
    /// only the part of that node before the position is returned.
    pub fn node_before(&self) -> Option<Cow<'a, S::Node>> {
        let index = self.index(self.depth);
        let d_off = self.text_offset();
        if d_off > 0 {
            let child = self.parent().child(index)?;
            Some(child.cut(0..d_off))
        } else if index == 0 {
            None
        } else {
            self.parent().child(index - 1).map(Cow::Borrowed)
        }
    }

    /// Get the node directly after the position, if any. If the position points into a text node,
    /// only the part of that node after the position is returned.
    pub fn node_after(&self) -> Option<Cow<'a, S::Node>> {
        let parent = self.parent();
        let index = self.index(self.depth);
        let child = parent.child(index)?;
        let d_off = self.text_offset();
        if d_off > 0 {
            Some(child.cut(d_off..))
        } else {
            Some(Cow::Borrowed(child))
        }
    }

    pub(crate) fn resolve(doc: &'a S::Node, pos: usize) -> Result<Self, ResolveErr> {
        if pos > doc.content_size() {
            return Err(ResolveErr::RangeError { pos });
        }
        let mut path = vec![];
        let mut start = 0;
        let mut parent_offset = pos;
        let mut node = doc;

        loop {
            let Index { index, offset } = match node.content() {
                Some(content) => content.find_index(parent_offset, false)?,
                None => return Err(ResolveErr::RangeError { pos }),
            };
            let rem = parent_offset - offset;
            path.push(ResolvedNode::new(node, index, start + offset));
            if rem == 0 {
                break;
            }
            node = match node.child(index) {
                Some(child) => child,
                None => return Err(ResolveErr::RangeError { pos }),
            };
            if node.is_text() {
                break;
            }
            parent_offset = rem - 1;
            start += offset + 1;
        }
        Ok(ResolvedPos::new(pos, path, parent_offset))
    }
}
