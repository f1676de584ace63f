use super::{MapRange, StepMap};
use crate::model::{Node, ReplaceError, Schema, Slice};
use derivative::Derivative;
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Different ways a step application can fail
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    /// No node at position {0}
    NoNodeAt(usize),
    /// The node at {pos} can only be replaced by a node of the same type and size
    NodeMismatch {
        /// Position of the existing node
        pos: usize,
    },
    /// Replace failed: {0}
    Replace(#[from] ReplaceError),
}

/// The result of [applying](StepKind::apply) a step. Contains either a new document or a
/// failure value.
#[allow(type_alias_bounds)]
pub type StepResult<S: Schema> = Result<S::Node, StepError>;

/// A step object represents an atomic change.
///
/// It generally applies only to the document it was created for, since the positions
/// stored in it will only make sense for that document.
pub trait StepKind<S: Schema> {
    /// Applies this step to the given document, returning a result
    /// object that either indicates failure, if the step can not be
    /// applied to this document, or indicates success by containing a
    /// transformed document.
    fn apply(&self, doc: &S::Node) -> StepResult<S>;

    /// Get the step map that represents the changes made by this step.
    fn get_map(&self) -> StepMap;
}

/// A span within a document
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Span {
    /// Start of the span
    pub from: usize,
    /// End of the span
    pub to: usize,
}

/// Replace some part of the document
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct ReplaceStep<S: Schema> {
    /// The affected span
    #[serde(flatten)]
    pub span: Span,
    /// The slice to replace the current content with
    #[serde(default)]
    pub slice: Slice<S>,
}

impl<S: Schema> StepKind<S> for ReplaceStep<S> {
    fn apply(&self, doc: &S::Node) -> StepResult<S> {
        let node = doc.replace(self.span.from..self.span.to, &self.slice)?;
        Ok(node)
    }

    fn get_map(&self) -> StepMap {
        StepMap::new(vec![MapRange::new(
            self.span.from,
            self.span.to.saturating_sub(self.span.from),
            self.slice.size(),
        )])
    }
}

/// Replace the node at a position by another node of the same type and size, e.g. to update
/// its attributes.
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", rename_all = "camelCase")]
pub struct SetNodeStep<S: Schema> {
    /// The position directly before the node
    pub pos: usize,
    /// The replacement
    pub node: S::Node,
}

impl<S: Schema> StepKind<S> for SetNodeStep<S> {
    fn apply(&self, doc: &S::Node) -> StepResult<S> {
        let old = doc.node_at(self.pos).ok_or(StepError::NoNodeAt(self.pos))?;
        if old.is_text()
            || old.r#type() != self.node.r#type()
            || old.node_size() != self.node.node_size()
        {
            return Err(StepError::NodeMismatch { pos: self.pos });
        }
        let end = self.pos + old.node_size();
        let node = doc.replace(self.pos..end, &Slice::from_node(self.node.clone()))?;
        Ok(node)
    }

    fn get_map(&self) -> StepMap {
        StepMap::identity()
    }
}

/// Steps that can be applied on a document
#[derive(Derivative, Deserialize, Serialize)]
#[derivative(
    Debug(bound = ""),
    Clone(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
#[serde(bound = "", tag = "stepType", rename_all = "camelCase")]
pub enum Step<S: Schema> {
    /// Replace some content
    Replace(ReplaceStep<S>),
    /// Replace a single node in place
    SetNode(SetNodeStep<S>),
}

impl<S: Schema> Step<S> {
    /// Apply the step to the given node
    pub fn apply(&self, doc: &S::Node) -> StepResult<S> {
        match self {
            Self::Replace(r_step) => r_step.apply(doc),
            Self::SetNode(sn_step) => sn_step.apply(doc),
        }
    }

    /// The step map of this step
    pub fn get_map(&self) -> StepMap {
        match self {
            Self::Replace(r_step) => r_step.get_map(),
            Self::SetNode(sn_step) => sn_step.get_map(),
        }
    }
}
