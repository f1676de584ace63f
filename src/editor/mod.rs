//! # The editor
//!
//! Glues the document model, the node registry, node views and plugins together. All document
//! changes go through [`Editor::dispatch`]; node views are kept in sync with the document after
//! every dispatch.
mod dom;
mod plugin;
mod registry;

pub use dom::{DomParser, DomSerializer};
pub use plugin::{DropEvent, Extension, Plugin};
pub use registry::{DomSchema, Group, NodeSpec, ParseFn, Registry, RenderFn, ViewFactory};

use crate::html::Element;
use crate::model::{Node, NodeType, Schema, Slice};
use crate::state::{ApplyError, EditorState, Selection, Transaction, UiEvent};
use crate::transform::{drop_point, Assoc, Mapping, StepError};
use crate::view::{NodeView, ViewContext, ViewEvent, ViewId, Window};
use displaydoc::Display;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Editor settings
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Width of the content area in pixels; node views use it to lay out their content
    pub container_width: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            container_width: 700,
        }
    }
}

/// Errors reported by the editor
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Could not apply transaction: {0}
    Apply(#[from] ApplyError),
    /// Step failed: {0}
    Step(#[from] StepError),
    /// No mounted view {0}
    NoSuchView(ViewId),
    /// No node at position {0}
    NoNodeAt(usize),
    /// Dropped content does not fit near position {0}
    NoDropPoint(usize),
}

struct MountedView<S: Schema> {
    id: ViewId,
    pos: usize,
    name: &'static str,
    view: Box<dyn NodeView<S>>,
}

/// Collects node specs, plugins and settings for a new [`Editor`].
pub struct EditorBuilder<S: Schema> {
    registry: Registry<S>,
    plugins: Vec<Rc<dyn Plugin<S>>>,
    config: EditorConfig,
    content: Option<String>,
}

impl<S: DomSchema> EditorBuilder<S> {
    fn new() -> Self {
        EditorBuilder {
            registry: Registry::new(S::node_specs()),
            plugins: Vec::new(),
            config: EditorConfig::default(),
            content: None,
        }
    }

    /// Register a node spec.
    pub fn add_node(&mut self, spec: NodeSpec<S>) -> &mut Self {
        self.registry.add(spec);
        self
    }

    /// Register a plugin.
    pub fn add_plugin(&mut self, plugin: Rc<dyn Plugin<S>>) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    /// Install an extension.
    pub fn extension<E: Extension<S>>(mut self, extension: E) -> Self {
        extension.install(&mut self);
        self
    }

    /// Use the given settings.
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Start with the given HTML content.
    pub fn content<T: Into<String>>(mut self, html: T) -> Self {
        self.content = Some(html.into());
        self
    }

    /// Create the editor.
    pub fn build(self) -> Editor<S> {
        let html = self.content.as_deref().unwrap_or("");
        let doc = DomParser::new(&self.registry).parse_document(html);
        let mut editor = Editor {
            state: EditorState::create(doc),
            registry: self.registry,
            plugins: self.plugins,
            views: Vec::new(),
            window: Window::new(),
            config: self.config,
            next_view: 0,
        };
        editor.sync_views(&Mapping::new());
        editor
    }
}

/// An editor instance.
pub struct Editor<S: Schema> {
    state: EditorState<S>,
    registry: Registry<S>,
    plugins: Vec<Rc<dyn Plugin<S>>>,
    views: Vec<MountedView<S>>,
    window: Window,
    config: EditorConfig,
    next_view: u64,
}

impl<S: DomSchema> Editor<S> {
    /// Start building an editor with the base specs of the schema.
    pub fn builder() -> EditorBuilder<S> {
        EditorBuilder::new()
    }

    /// Replace the document by parsed HTML. All node views are recreated.
    pub fn set_content(&mut self, html: &str) {
        let doc = DomParser::new(&self.registry).parse_document(html);
        for mut mounted in self.views.drain(..) {
            mounted.view.destroy();
        }
        self.state = EditorState::create(doc);
        self.sync_views(&Mapping::new());
    }
}

impl<S: Schema> Editor<S> {
    /// The current state.
    pub fn state(&self) -> &EditorState<S> {
        &self.state
    }

    /// The current document.
    pub fn doc(&self) -> &S::Node {
        self.state.doc()
    }

    /// The editor settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The window listener registry.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The node specs.
    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    /// Serialize the document to HTML.
    pub fn to_html(&self) -> String {
        DomSerializer::new(&self.registry).to_html(self.state.doc())
    }

    /// Apply a transaction, let plugins append their transactions and update the node views.
    pub fn dispatch(&mut self, tr: Transaction<S>) -> Result<(), EditorError> {
        let old_state = &self.state;
        let mut state = old_state.apply(&tr)?;
        trace!(steps = tr.steps().len(), meta = ?tr.meta(), "dispatch");
        let mut trs = vec![tr];

        for plugin in &self.plugins {
            if let Some(appended) = plugin.append_transaction(&trs, old_state, &state) {
                match state.apply(&appended) {
                    Ok(next) => {
                        state = next;
                        trs.push(appended);
                    }
                    Err(err) => warn!(%err, "appended transaction dropped"),
                }
            }
        }

        let mut mapping = Mapping::new();
        for tr in &trs {
            mapping.append_mapping(tr.mapping());
        }
        self.state = state;
        self.sync_views(&mapping);
        Ok(())
    }

    /// Put a node selection on the node after `pos`.
    pub fn select_node(&mut self, pos: usize) -> Result<(), EditorError> {
        match self.state.doc().node_at(pos) {
            Some(node) if !node.is_text() => {}
            _ => return Err(EditorError::NoNodeAt(pos)),
        }
        let mut tr = self.state.tr();
        tr.set_selection(Selection::node(pos));
        self.dispatch(tr)
    }

    /// The mounted views, with the position of their node.
    pub fn views(&self) -> Vec<(ViewId, usize)> {
        self.views.iter().map(|m| (m.id, m.pos)).collect()
    }

    /// The view of the node after `pos`.
    pub fn view_at(&self, pos: usize) -> Option<ViewId> {
        self.views.iter().find(|m| m.pos == pos).map(|m| m.id)
    }

    /// Render a mounted view.
    pub fn render_view(&self, id: ViewId) -> Option<Element> {
        self.views
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.view.render(self.config.container_width))
    }

    /// Deliver an event to a view and dispatch what it produced. Returns whether the view
    /// consumed the event.
    pub fn handle_view_event(
        &mut self,
        id: ViewId,
        event: ViewEvent,
    ) -> Result<bool, EditorError> {
        let mounted = self
            .views
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(EditorError::NoSuchView(id))?;
        let mut ctx = ViewContext::new(
            &self.state,
            mounted.pos,
            id,
            &self.window,
            self.config.container_width,
        );
        let handled = mounted.view.handle_event(&event, &mut ctx);
        let trs = ctx.into_transactions();

        for tr in trs {
            if let Err(err) = self.dispatch(tr) {
                warn!(%err, view = %id, "view transaction dropped");
            }
        }
        Ok(handled)
    }

    /// Deliver a window-level event to every view listening for it.
    pub fn window_event(&mut self, event: ViewEvent) -> Result<bool, EditorError> {
        let kind = match event.listener_kind() {
            Some(kind) => kind,
            None => return Ok(false),
        };
        let mut handled = false;
        for id in self.window.owners(kind) {
            if self.views.iter().any(|m| m.id == id) {
                handled |= self.handle_view_event(id, event)?;
            }
        }
        Ok(handled)
    }

    /// Start a native drag of the node shown by a view. The node gets selected and is returned
    /// as the dragged slice.
    pub fn drag_start(&mut self, id: ViewId) -> Result<Slice<S>, EditorError> {
        let pos = self
            .views
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.pos)
            .ok_or(EditorError::NoSuchView(id))?;
        self.handle_view_event(id, ViewEvent::DragStart)?;
        let node = self
            .state
            .doc()
            .node_at(pos)
            .cloned()
            .ok_or(EditorError::NoNodeAt(pos))?;
        self.select_node(pos)?;
        Ok(Slice::from_node(node))
    }

    /// Handle dropped content. Plugins see the drop first; unless one of them handles it, the
    /// slice is inserted at the nearest valid position. For a move, the selected node is
    /// deleted first.
    pub fn handle_drop(&mut self, event: DropEvent<S>) -> Result<(), EditorError> {
        for plugin in &self.plugins {
            if plugin.handle_drop(&self.state, &event) {
                debug!(pos = event.pos, "drop handled by plugin");
                return Ok(());
            }
        }

        let doc = self.state.doc();
        let target =
            drop_point(doc, event.pos, &event.slice).ok_or(EditorError::NoDropPoint(event.pos))?;
        let mut tr = self.state.tr();
        if event.moved {
            if let Selection::Node { pos } = self.state.selection() {
                let size = doc.node_at(pos).map_or(0, Node::node_size);
                tr.delete(pos, pos + size)?;
            }
        }
        let pos = tr.mapping().map(target, Assoc::After);
        let single = event.slice.single_node().is_some();
        let size = event.slice.size();
        tr.replace(pos, pos, event.slice)?;
        tr.set_selection(if single {
            Selection::node(pos)
        } else {
            Selection::cursor(pos + size)
        });
        tr.set_meta(UiEvent::Drop);
        debug!(pos, moved = event.moved, "drop inserted");
        self.dispatch(tr)
    }

    fn sync_views(&mut self, mapping: &Mapping) {
        let mut old: Vec<Option<MountedView<S>>> = Vec::with_capacity(self.views.len());
        for mut mounted in self.views.drain(..) {
            let result = mapping.map_result(mounted.pos, Assoc::After);
            if result.deleted {
                mounted.view.destroy();
                trace!(view = %mounted.id, "view destroyed");
            } else {
                mounted.pos = result.pos;
                old.push(Some(mounted));
            }
        }

        let registry = &self.registry;
        let mut wanted = Vec::new();
        self.state.doc().descendants(&mut |node, pos| {
            let name = node.r#type().name();
            if let Some(factory) = registry.get(name).and_then(|spec| spec.view.clone()) {
                wanted.push((pos, name, node.clone(), factory));
            }
            true
        });

        let selection = self.state.selection();
        let mut views = Vec::with_capacity(wanted.len());
        for (pos, name, node, factory) in wanted {
            let reused = old
                .iter_mut()
                .find(|slot| matches!(slot, Some(m) if m.pos == pos && m.name == name))
                .and_then(Option::take);
            let mut mounted = match reused {
                Some(mut mounted) => {
                    if mounted.view.update(&node) {
                        mounted
                    } else {
                        mounted.view.destroy();
                        self.mount(pos, name, &node, &factory)
                    }
                }
                None => self.mount(pos, name, &node, &factory),
            };
            mounted.view.select(selection.is_node_at(pos));
            views.push(mounted);
        }

        for mut stale in old.into_iter().flatten() {
            trace!(view = %stale.id, "view destroyed");
            stale.view.destroy();
        }
        self.views = views;
    }
}

impl<S: Schema> Editor<S> {
    fn mount(
        &mut self,
        pos: usize,
        name: &'static str,
        node: &S::Node,
        factory: &ViewFactory<S>,
    ) -> MountedView<S> {
        let id = ViewId(self.next_view);
        self.next_view += 1;
        debug!(view = %id, pos, node = name, "view created");
        MountedView {
            id,
            pos,
            name,
            view: factory(node),
        }
    }
}

impl<S: Schema> Drop for Editor<S> {
    fn drop(&mut self) {
        for mounted in &mut self.views {
            mounted.view.destroy();
        }
    }
}
