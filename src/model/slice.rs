use super::{Fragment, Schema};
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// A slice represents a piece cut out of a larger document. It stores not only a fragment, but
/// also the depth up to which nodes on both side are ‘open’ (cut through).
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    Default(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct Slice<S: Schema> {
    /// The slice's content.
    #[serde(default)]
    pub content: Fragment<S>,
    /// The open depth at the start.
    #[serde(default)]
    pub open_start: usize,
    /// The open depth at the end.
    #[serde(default)]
    pub open_end: usize,
}

impl<S: Schema> Slice<S> {
    /// Create a slice. When specifying a non-zero open depth, you must make sure that there are
    /// nodes of at least that depth at the appropriate side of the fragment.
    pub fn new(content: Fragment<S>, open_start: usize, open_end: usize) -> Self {
        Slice {
            content,
            open_start,
            open_end,
        }
    }

    /// A closed slice holding exactly one node.
    pub fn from_node(node: S::Node) -> Self {
        Slice::new(Fragment::from(vec![node]), 0, 0)
    }

    /// The size this slice would add when inserted into a document.
    pub fn size(&self) -> usize {
        self.content
            .size()
            .saturating_sub(self.open_start + self.open_end)
    }

    /// The node this slice consists of, if it is a closed slice of exactly one node.
    pub fn single_node(&self) -> Option<&S::Node> {
        if self.open_start == 0 && self.open_end == 0 && self.content.child_count() == 1 {
            self.content.first_child()
        } else {
            None
        }
    }

    /// True if the slice doesn't contain any node.
    pub fn is_empty(&self) -> bool {
        self.content.child_count() == 0
    }
}
