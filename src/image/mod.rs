//! # Resizable images
//!
//! A block node holding an image with a caption and an alignment. It round-trips through HTML
//! as a `<figure>` and comes with an interactive view that resizes the image with eight
//! handles. Dragging an image inside the editor moves it instead of copying it.
//!
//! ```
//! use teapress_editor::editor::Editor;
//! use teapress_editor::image::ResizableImage;
//! use teapress_editor::schema::ED;
//!
//! let editor = Editor::<ED>::builder()
//!     .extension(ResizableImage::new())
//!     .content(r#"<p>Tea</p><img data-resizable-image="true" src="cup.png" width="120">"#)
//!     .build();
//! assert_eq!(editor.views().len(), 1);
//! ```
mod attrs;
mod commands;
mod drop;
mod html;
mod options;
mod resize;
mod upload;
mod view;

pub use attrs::{Align, ImageAttrs, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use commands::{insert_image, insert_uploaded_image, InsertError};
pub use drop::{MoveOnDrop, PendingMove};
pub use html::{
    image_style, parse_element, render_element, ALIGN_ATTR, CAPTION_MARKER, MARKER_ATTR,
};
pub use options::ImageOptions;
pub use resize::{resize, ResizeDrag, ResizeState};
pub use upload::{UploadData, UploadError, UploadResponse};
pub use view::{handle_rects, image_rect, ResizableImageView};

use crate::editor::{DomSchema, EditorBuilder, Extension, Group, NodeSpec, ViewFactory};
use crate::view::NodeView;
use std::rc::Rc;

/// The node type name
pub const NODE_NAME: &str = "resizableImage";

/// A schema with a resizable image node.
pub trait ImageSchema: DomSchema {
    /// Create an image node
    fn image_node(attrs: ImageAttrs) -> Self::Node;

    /// The image attributes, if `node` is an image
    fn image_attrs(node: &Self::Node) -> Option<&ImageAttrs>;
}

/// The resizable image extension: the node spec with its view and the drop plugin.
///
/// The view and the plugin share one [`PendingMove`] slot.
#[derive(Debug, Clone, Default)]
pub struct ResizableImage {
    options: Rc<ImageOptions>,
    pending: PendingMove,
}

impl ResizableImage {
    /// The extension with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// The extension with the given options
    pub fn with_options(options: ImageOptions) -> Self {
        ResizableImage {
            options: Rc::new(options),
            pending: PendingMove::new(),
        }
    }

    /// The options
    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    /// The drag origin slot shared by views and plugin
    pub fn pending(&self) -> &PendingMove {
        &self.pending
    }

    /// The node spec: an atomic, draggable and selectable block with HTML rules and a view.
    pub fn node_spec<S: ImageSchema>(&self) -> NodeSpec<S> {
        let options = self.options.clone();
        let pending = self.pending.clone();
        let view: ViewFactory<S> = Rc::new(move |node: &S::Node| {
            let attrs = S::image_attrs(node).cloned().unwrap_or_default();
            Box::new(ResizableImageView::<S>::new(
                attrs,
                options.clone(),
                pending.clone(),
            )) as Box<dyn NodeView<S>>
        });
        NodeSpec {
            atom: true,
            draggable: true,
            selectable: true,
            view: Some(view),
            ..NodeSpec::new(NODE_NAME, Group::Block)
                .with_parse(html::parse_image::<S>)
                .with_render(html::render_image::<S>)
        }
    }

    /// The drop plugin
    pub fn plugin<S: ImageSchema>(&self) -> MoveOnDrop<S> {
        MoveOnDrop::new(self.pending.clone())
    }
}

impl<S: ImageSchema> Extension<S> for ResizableImage {
    fn install(self, builder: &mut EditorBuilder<S>) {
        builder
            .add_node(self.node_spec())
            .add_plugin(Rc::new(self.plugin::<S>()));
    }
}
