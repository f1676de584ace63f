//! # The document transformations
//!
//! Documents are changed by applying [`Step`]s. A [`Transform`] accumulates steps, the
//! intermediate document and a [`Mapping`] from positions in the start document to positions
//! in the current one.
mod map;
mod step;

pub use map::{Assoc, MapRange, MapResult, Mapping, StepMap};
pub use step::{ReplaceStep, SetNodeStep, Span, Step, StepError, StepKind, StepResult};

use crate::model::{Fragment, Node, NodeType, Schema, Slice};
use derivative::Derivative;

/// A list of steps
#[allow(type_alias_bounds)]
pub type Steps<S: Schema> = Vec<Step<S>>;

/// Abstraction to build up and track an array of steps representing a document transformation.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Transform<S: Schema> {
    before: S::Node,
    doc: S::Node,
    steps: Steps<S>,
    mapping: Mapping,
}

impl<S: Schema> Transform<S> {
    /// Create a transform that starts with the given document.
    pub fn new(doc: S::Node) -> Self {
        Transform {
            before: doc.clone(),
            doc,
            steps: Vec::new(),
            mapping: Mapping::new(),
        }
    }

    /// The document at the start of the transform.
    pub fn before(&self) -> &S::Node {
        &self.before
    }

    /// The current document (the result of applying the steps in the transform).
    pub fn doc(&self) -> &S::Node {
        &self.doc
    }

    /// The steps in this transform.
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// A mapping with the maps for each of the steps in this transform.
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// True when the document has been changed (when there are any steps).
    pub fn doc_changed(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Apply a new step in this transform, saving the result. Fails when the step fails.
    pub fn step(&mut self, step: Step<S>) -> Result<&mut Self, StepError> {
        let doc = step.apply(&self.doc)?;
        self.mapping.append_map(step.get_map());
        self.steps.push(step);
        self.doc = doc;
        Ok(self)
    }

    /// Replace the part of the document between `from` and `to` with the given `slice`.
    pub fn replace(
        &mut self,
        from: usize,
        to: usize,
        slice: Slice<S>,
    ) -> Result<&mut Self, StepError> {
        if from == to && slice.is_empty() {
            return Ok(self);
        }
        self.step(Step::Replace(ReplaceStep {
            span: Span { from, to },
            slice,
        }))
    }

    /// Insert the given node at the given position.
    pub fn insert(&mut self, pos: usize, node: S::Node) -> Result<&mut Self, StepError> {
        self.replace(pos, pos, Slice::from_node(node))
    }

    /// Delete the content between the given positions.
    pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self, StepError> {
        self.replace(from, to, Slice::default())
    }

    /// Replace the node directly after `pos` by `node`, which must have the same type and size.
    pub fn set_node(&mut self, pos: usize, node: S::Node) -> Result<&mut Self, StepError> {
        self.step(Step::SetNode(SetNodeStep { pos, node }))
    }
}

/// Find a position at or near `pos` where the given slice can be inserted as a whole. Tries the
/// parent of `pos` first and then moves outwards, picking the side of each ancestor that is
/// closer to `pos`.
pub fn drop_point<S: Schema>(doc: &S::Node, pos: usize, slice: &Slice<S>) -> Option<usize> {
    let r_pos = doc.resolve(pos).ok()?;
    if slice.is_empty() {
        return Some(pos);
    }
    for d in (0..=r_pos.depth()).rev() {
        let (index, target) = if d == r_pos.depth() {
            (r_pos.index(d), Some(pos))
        } else if pos <= (r_pos.start(d + 1) + r_pos.end(d + 1)) / 2 {
            (r_pos.index(d), r_pos.before(d + 1))
        } else {
            (r_pos.index(d) + 1, r_pos.after(d + 1))
        };
        let parent = r_pos.node(d);
        if fits(parent, index, slice) {
            return target;
        }
    }
    None
}

fn fits<S: Schema>(parent: &S::Node, index: usize, slice: &Slice<S>) -> bool {
    let content = match parent.content() {
        Some(content) => content,
        None => return false,
    };
    let children = content.children();
    let index = usize::min(index, children.len());
    let mut nodes = Vec::with_capacity(children.len() + slice.content.child_count());
    nodes.extend_from_slice(&children[..index]);
    nodes.extend_from_slice(slice.content.children());
    nodes.extend_from_slice(&children[index..]);
    parent.r#type().valid_content(&Fragment::from(nodes))
}

#[cfg(test)]
mod tests {
    use super::{drop_point, Assoc, StepError, Transform};
    use crate::model::{Node, Slice};
    use crate::schema::{helper::*, ED};

    #[test]
    fn test_transform_maps_positions() {
        let image = img(Default::default());
        let mut tr = Transform::<ED>::new(doc((p("A"), image.clone(), p("B"))));
        tr.insert(7, image.clone()).unwrap().delete(3, 4).unwrap();
        assert!(tr.doc_changed());
        assert_eq!(tr.steps().len(), 2);
        assert_eq!(tr.doc(), &doc((p("A"), p("B"), image)));
        assert_eq!(tr.mapping().map(3, Assoc::After), 3);
        assert_eq!(tr.mapping().map(7, Assoc::After), 7);
    }

    #[test]
    fn test_set_node_requires_same_type() {
        let mut tr = Transform::<ED>::new(doc((p("A"), img(Default::default()))));
        assert_eq!(
            tr.set_node(0, img(Default::default())).map(|_| ()),
            Err(StepError::NodeMismatch { pos: 0 })
        );
        assert_eq!(
            tr.set_node(9, img(Default::default())).map(|_| ()),
            Err(StepError::NoNodeAt(9))
        );
        assert!(!tr.doc_changed());
    }

    #[test]
    fn test_drop_point() {
        let image = img(Default::default());
        let slice = Slice::<ED>::from_node(image);
        let test_doc = doc((p("abcd"), blockquote((p("ef"),))));
        // between blocks: valid as is
        assert_eq!(drop_point(&test_doc, 6, &slice), Some(6));
        // inside text: moves out of the paragraph, to the closer side
        assert_eq!(drop_point(&test_doc, 2, &slice), Some(0));
        assert_eq!(drop_point(&test_doc, 4, &slice), Some(6));
        // inside a nested paragraph
        assert_eq!(drop_point(&test_doc, 8, &slice), Some(7));
        assert_eq!(drop_point(&test_doc, 10, &slice), Some(11));
        assert_eq!(drop_point(&test_doc, 99, &slice), None);

        let text = Slice::<ED>::from_node(node("x"));
        assert_eq!(drop_point(&test_doc, 2, &text), Some(2));
        assert_eq!(test_doc.content_size(), 12);
    }
}
