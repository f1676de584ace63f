use super::DomParser;
use crate::html::Element;
use crate::model::{Fragment, Schema};
use crate::view::NodeView;
use derivative::Derivative;
use std::fmt;
use std::rc::Rc;

/// Parse rule of a node type. Returns `None` when the element is not recognised, so the next
/// rule gets a chance.
#[allow(type_alias_bounds)]
pub type ParseFn<S: Schema> = fn(&Element, &DomParser<'_, S>) -> Option<Vec<S::Node>>;

/// Render function of a node type. The children of the node are appended to the returned
/// element by the serializer.
#[allow(type_alias_bounds)]
pub type RenderFn<S: Schema> = fn(&S::Node) -> Option<Element>;

/// Creates the interactive view for a node.
#[allow(type_alias_bounds)]
pub type ViewFactory<S: Schema> = Rc<dyn Fn(&S::Node) -> Box<dyn NodeView<S>>>;

/// Where a node type may appear
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Group {
    /// Among other blocks
    Block,
    /// Inside textblocks
    Inline,
}

/// Everything the editor needs to know about one node type.
pub struct NodeSpec<S: Schema> {
    /// The node type name, as returned by `NodeType::name`
    pub name: &'static str,
    /// The content group
    pub group: Group,
    /// Whether the node is a single unit that can't be entered
    pub atom: bool,
    /// Whether the node can be dragged
    pub draggable: bool,
    /// Whether the node can be the target of a node selection
    pub selectable: bool,
    /// The HTML parse rule
    pub parse: Option<ParseFn<S>>,
    /// The HTML render function
    pub render: Option<RenderFn<S>>,
    /// The node view factory
    pub view: Option<ViewFactory<S>>,
}

impl<S: Schema> NodeSpec<S> {
    /// A spec without parse, render or view bindings.
    pub fn new(name: &'static str, group: Group) -> Self {
        NodeSpec {
            name,
            group,
            atom: false,
            draggable: false,
            selectable: group == Group::Block,
            parse: None,
            render: None,
            view: None,
        }
    }

    /// Set the parse rule
    pub fn with_parse(mut self, parse: ParseFn<S>) -> Self {
        self.parse = Some(parse);
        self
    }

    /// Set the render function
    pub fn with_render(mut self, render: RenderFn<S>) -> Self {
        self.render = Some(render);
        self
    }
}

impl<S: Schema> Clone for NodeSpec<S> {
    fn clone(&self) -> Self {
        NodeSpec {
            name: self.name,
            group: self.group,
            atom: self.atom,
            draggable: self.draggable,
            selectable: self.selectable,
            parse: self.parse,
            render: self.render,
            view: self.view.clone(),
        }
    }
}

impl<S: Schema> fmt::Debug for NodeSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeSpec")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("atom", &self.atom)
            .field("draggable", &self.draggable)
            .field("selectable", &self.selectable)
            .field("parse", &self.parse.is_some())
            .field("render", &self.render.is_some())
            .field("view", &self.view.is_some())
            .finish()
    }
}

/// The node specs known to an editor. Specs added by extensions take precedence over the base
/// specs of the schema, both for parsing and for lookup by name.
#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Registry<S: Schema> {
    specs: Vec<NodeSpec<S>>,
    extensions: usize,
}

impl<S: Schema> Registry<S> {
    /// Create a registry holding the given base specs.
    pub fn new(base: Vec<NodeSpec<S>>) -> Self {
        Registry {
            specs: base,
            extensions: 0,
        }
    }

    /// Register an extension spec. A spec with the same name is replaced.
    pub fn add(&mut self, spec: NodeSpec<S>) {
        if let Some(idx) = self.specs.iter().position(|s| s.name == spec.name) {
            self.specs.remove(idx);
            if idx < self.extensions {
                self.extensions -= 1;
            }
        }
        self.specs.insert(self.extensions, spec);
        self.extensions += 1;
    }

    /// Look up a spec by node type name.
    pub fn get(&self, name: &str) -> Option<&NodeSpec<S>> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// All specs in precedence order.
    pub fn specs(&self) -> &[NodeSpec<S>] {
        &self.specs
    }
}

/// A schema that can be imported from and exported to HTML.
pub trait DomSchema: Schema {
    /// Create the document node
    fn doc(content: Fragment<Self>) -> Self::Node;

    /// Create the default textblock, used to wrap stray inline content
    fn paragraph(content: Fragment<Self>) -> Self::Node;

    /// The base node specs of the schema
    fn node_specs() -> Vec<NodeSpec<Self>>;
}
