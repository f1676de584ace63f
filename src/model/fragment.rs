use super::{util, Node, Schema};
use derivative::Derivative;
use displaydoc::Display;
use serde::{Deserialize, Serialize, Serializer};
use std::ops::RangeBounds;
use thiserror::Error;

/// A fragment represents a node's collection of child nodes.
///
/// Like nodes, fragments are persistent data structures, and you should not mutate them or their
/// content. Rather, you create new instances whenever needed.
#[derive(Derivative, Deserialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", from = "Vec<S::Node>")]
pub struct Fragment<S: Schema> {
    inner: Vec<S::Node>,
    size: usize,
}

/// The position of a child inside a fragment
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Index {
    /// The index of the child
    pub index: usize,
    /// The offset of the child's start
    pub offset: usize,
}

/// Error when looking up a position in a fragment
#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Position {pos} outside of fragment of size {size}
    OutOfBounds {
        /// The requested position
        pos: usize,
        /// The size of the fragment
        size: usize,
    },
}

impl<S: Schema> Fragment<S> {
    /// Create a new empty fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// The size of the fragment, which is the total of the size of its content nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get a slice to all child nodes
    pub fn children(&self) -> &[S::Node] {
        &self.inner[..]
    }

    /// The first child of the fragment wrapped in `Some`, or `None` if it is empty.
    pub fn first_child(&self) -> Option<&S::Node> {
        self.inner.first()
    }

    /// The last child of the fragment wrapped in `Some`, or `None` if it is empty.
    pub fn last_child(&self) -> Option<&S::Node> {
        self.inner.last()
    }

    /// The number of child nodes in this fragment.
    pub fn child_count(&self) -> usize {
        self.inner.len()
    }

    /// Get the child node at the given index, if it exists.
    pub fn child(&self, index: usize) -> Option<&S::Node> {
        self.inner.get(index)
    }

    /// Create a new fragment containing the combined content of this fragment and the other.
    ///
    /// Adjacent text nodes at the seam are merged.
    pub fn append(mut self, mut other: Self) -> Self {
        if other.inner.is_empty() {
            return self;
        }
        if self.inner.is_empty() {
            return other;
        }
        if let (Some(last), Some(first)) = (self.inner.last_mut(), other.inner.first()) {
            if let (Some(n1), Some(n2)) = (last.text_node(), first.text_node()) {
                *last = S::Node::new_text_node(n1.join(n2));
                other.inner.remove(0);
            }
        }
        self.inner.append(&mut other.inner);
        self.size += other.size;
        self
    }

    /// Cut out the sub-fragment between the two given positions.
    pub fn cut<R: RangeBounds<usize>>(&self, range: R) -> Self {
        let from = util::from(&range);
        let to = usize::min(util::to(&range, self.size), self.size);

        if from == 0 && to == self.size {
            return self.clone();
        }

        let mut result = vec![];
        let mut size = 0;
        if to > from {
            let mut pos = 0;
            for child in &self.inner {
                if pos >= to {
                    break;
                }
                let end = pos + child.node_size();
                if end > from {
                    let new_child = if pos < from || end > to {
                        if child.is_text() {
                            child.cut(from.saturating_sub(pos)..usize::min(end, to) - pos)
                        } else {
                            let t = pos + 1;
                            let end = usize::min(child.content_size(), to.saturating_sub(t));
                            child.cut(from.saturating_sub(t)..end)
                        }
                        .into_owned()
                    } else {
                        child.clone()
                    };
                    size += new_child.node_size();
                    result.push(new_child);
                }
                pos = end;
            }
        }
        Fragment {
            inner: result,
            size,
        }
    }

    /// Invoke a callback for all descendant nodes between the given two positions (relative to
    /// start of this fragment). Doesn't descend into a node when the callback returns `false`.
    pub fn nodes_between<F: FnMut(&S::Node, usize) -> bool>(
        &self,
        from: usize,
        to: usize,
        f: &mut F,
        node_start: usize,
    ) {
        let mut pos = 0;
        for child in &self.inner {
            if pos >= to {
                break;
            }
            let end = pos + child.node_size();
            if end > from && f(child, node_start + pos) {
                if let Some(content) = child.content() {
                    let start = pos + 1;
                    content.nodes_between(
                        from.saturating_sub(start),
                        usize::min(content.size(), to.saturating_sub(start)),
                        f,
                        node_start + start,
                    )
                }
            }
            pos = end;
        }
    }

    /// Create a new fragment in which the node at the given index is replaced by the given node.
    ///
    /// Returns `None` if there is no child at `index`.
    pub fn replace_child(&self, index: usize, node: S::Node) -> Option<Self> {
        let current = self.inner.get(index)?;
        let size = self.size + node.node_size() - current.node_size();
        let mut copy = self.inner.clone();
        copy[index] = node;
        Some(Fragment { inner: copy, size })
    }

    /// Find the index and inner offset corresponding to a given relative position in this
    /// fragment. When `round` is true, a position inside a child resolves to the index after it.
    pub fn find_index(&self, pos: usize, round: bool) -> Result<Index, IndexError> {
        if pos == 0 {
            return Ok(Index { index: 0, offset: 0 });
        }
        if pos == self.size {
            return Ok(Index {
                index: self.inner.len(),
                offset: pos,
            });
        }
        if pos > self.size {
            return Err(IndexError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        let mut cur_pos = 0;
        for (i, cur) in self.inner.iter().enumerate() {
            let end = cur_pos + cur.node_size();
            if end >= pos {
                if end == pos || round {
                    return Ok(Index {
                        index: i + 1,
                        offset: end,
                    });
                }
                return Ok(Index {
                    index: i,
                    offset: cur_pos,
                });
            }
            cur_pos = end;
        }
        Err(IndexError::OutOfBounds {
            pos,
            size: self.size,
        })
    }
}

impl<S: Schema> Default for Fragment<S> {
    fn default() -> Self {
        Self {
            inner: Vec::new(),
            size: 0,
        }
    }
}

impl<S: Schema> Serialize for Fragment<S> {
    fn serialize<Sr>(&self, serializer: Sr) -> Result<Sr::Ok, Sr::Error>
    where
        Sr: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<S: Schema> From<Vec<S::Node>> for Fragment<S> {
    fn from(src: Vec<S::Node>) -> Fragment<S> {
        let size = src.iter().map(|x| x.node_size()).sum::<usize>();
        Fragment { inner: src, size }
    }
}

impl<S: Schema> From<Fragment<S>> for Vec<S::Node> {
    fn from(src: Fragment<S>) -> Vec<S::Node> {
        src.inner
    }
}

impl<S, A, B> From<(A, B)> for Fragment<S>
where
    S: Schema,
    A: Into<S::Node>,
    B: Into<S::Node>,
{
    fn from((a, b): (A, B)) -> Self {
        Self::from(vec![a.into(), b.into()])
    }
}

impl<S, A, B, C> From<(A, B, C)> for Fragment<S>
where
    S: Schema,
    A: Into<S::Node>,
    B: Into<S::Node>,
    C: Into<S::Node>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::from(vec![a.into(), b.into(), c.into()])
    }
}

impl<S, A, B, C, D> From<(A, B, C, D)> for Fragment<S>
where
    S: Schema,
    A: Into<S::Node>,
    B: Into<S::Node>,
    C: Into<S::Node>,
    D: Into<S::Node>,
{
    fn from((a, b, c, d): (A, B, C, D)) -> Self {
        Self::from(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

impl<S, A, B, C, D, E> From<(A, B, C, D, E)> for Fragment<S>
where
    S: Schema,
    A: Into<S::Node>,
    B: Into<S::Node>,
    C: Into<S::Node>,
    D: Into<S::Node>,
    E: Into<S::Node>,
{
    fn from((a, b, c, d, e): (A, B, C, D, E)) -> Self {
        Self::from(vec![a.into(), b.into(), c.into(), d.into(), e.into()])
    }
}

impl<S, A> From<(A,)> for Fragment<S>
where
    S: Schema,
    A: Into<S::Node>,
{
    fn from((a,): (A,)) -> Self {
        Self::from(vec![a.into()])
    }
}
