use super::html::{image_style, CAPTION_MARKER};
use super::resize::ResizeState;
use super::{Align, ImageAttrs, ImageOptions, ImageSchema, PendingMove};
use crate::html::{Element, Style};
use crate::state::{Selection, UiEvent};
use crate::view::{
    Direction, ListenerKind, NodeView, Point, Rect, Size, Target, ViewContext, ViewEvent,
};
use std::marker::PhantomData;
use std::rc::Rc;
use tracing::{trace, warn};

/// The box of the image inside a wrapper of the given width. The image is at most as wide as
/// the wrapper and placed according to its alignment.
pub fn image_rect(attrs: &ImageAttrs, container_width: i32) -> Rect {
    let container_width = i32::max(container_width, 0);
    let width = i32::min(attrs.width, container_width);
    let x = match attrs.align {
        Align::Left => 0,
        Align::Center => (container_width - width) / 2,
        Align::Right => container_width - width,
    };
    Rect::new(x, 0, width, attrs.height)
}

/// The eight handle boxes around an image box, centered on its corners and edge midpoints and
/// pushed outwards by the handle offset.
pub fn handle_rects(rect: Rect, options: &ImageOptions) -> Vec<(Direction, Rect)> {
    let center = rect.center();
    let half = options.handle_size / 2;
    Direction::ALL
        .iter()
        .map(|&dir| {
            let x = match dir.x_sign() {
                -1 => rect.x - options.handle_offset,
                0 => center.x,
                _ => rect.right() + options.handle_offset,
            };
            let y = match dir.y_sign() {
                -1 => rect.y - options.handle_offset,
                0 => center.y,
                _ => rect.bottom() + options.handle_offset,
            };
            let handle = Rect::new(x - half, y - half, options.handle_size, options.handle_size);
            (dir, handle)
        })
        .collect()
}

/// The interactive view of a resizable image.
pub struct ResizableImageView<S: ImageSchema> {
    attrs: ImageAttrs,
    selected: bool,
    options: Rc<ImageOptions>,
    pending: PendingMove,
    resize: ResizeState,
    _schema: PhantomData<S>,
}

impl<S: ImageSchema> ResizableImageView<S> {
    /// Create a view for an image with the given attributes.
    pub fn new(attrs: ImageAttrs, options: Rc<ImageOptions>, pending: PendingMove) -> Self {
        ResizableImageView {
            attrs,
            selected: false,
            options,
            pending,
            resize: ResizeState::Idle,
            _schema: PhantomData,
        }
    }

    /// The attributes currently shown
    pub fn attrs(&self) -> &ImageAttrs {
        &self.attrs
    }

    /// True while a resize handle is dragged
    pub fn is_resizing(&self) -> bool {
        self.resize.is_dragging()
    }

    fn render_handle(&self, direction: Direction, rect: Rect) -> Element {
        let style = Style::new()
            .set("position", "absolute")
            .set("left", format!("{}px", rect.x))
            .set("top", format!("{}px", rect.y))
            .set("width", format!("{}px", rect.width))
            .set("height", format!("{}px", rect.height))
            .set("background", self.options.handle_color.as_str())
            .set("cursor", direction.cursor());
        Element::new("span")
            .attr("data-handle", direction.name())
            .attr("style", style)
    }

    fn on_move(&mut self, point: Point, ctx: &mut ViewContext<'_, S>) -> bool {
        let size = match self.resize.size_at(point, self.options.min_size) {
            Some(size) => size,
            None => return false,
        };
        if size == Size::new(self.attrs.width, self.attrs.height) {
            return true;
        }
        let attrs = ImageAttrs {
            width: size.width,
            height: size.height,
            ..self.attrs.clone()
        };
        match ctx.set_node(S::image_node(attrs.clone()), UiEvent::Resize) {
            Ok(()) => {
                trace!(width = size.width, height = size.height, "resize");
                self.attrs = attrs;
            }
            Err(err) => {
                warn!(%err, pos = ctx.pos(), "resize could not be applied");
                self.resize.end();
            }
        }
        true
    }
}

impl<S: ImageSchema> NodeView<S> for ResizableImageView<S> {
    fn render(&self, layout_width: i32) -> Element {
        let rect = image_rect(&self.attrs, layout_width);

        let mut style = image_style(&self.attrs);
        if self.selected {
            style = style.set("outline", self.options.selected_border.as_str());
        }
        let mut img = Element::new("img").attr("draggable", "true");
        if let Some(src) = &self.attrs.src {
            img.set_attr("src", src.as_str());
        }
        if let Some(alt) = &self.attrs.alt {
            img.set_attr("alt", alt.as_str());
        }
        img.set_attr("style", style);

        let wrapper_style = Style::new()
            .set("position", "relative")
            .set("width", "100%");
        let mut wrapper = Element::new("div")
            .attr("data-node-view", "resizableImage")
            .attr("style", wrapper_style)
            .child(img);
        if self.selected {
            for (dir, handle) in handle_rects(rect, &self.options) {
                wrapper = wrapper.child(self.render_handle(dir, handle));
            }
        }
        if !self.attrs.caption.is_empty() {
            wrapper = wrapper.child(
                Element::new("figcaption")
                    .attr("style", Style::new().set("text-align", self.attrs.align.as_str()))
                    .text(format!("{} {}", CAPTION_MARKER, self.attrs.caption)),
            );
        }
        wrapper
    }

    fn update(&mut self, node: &S::Node) -> bool {
        match S::image_attrs(node) {
            Some(attrs) => {
                self.attrs = attrs.clone();
                true
            }
            None => false,
        }
    }

    fn select(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn handle_event(&mut self, event: &ViewEvent, ctx: &mut ViewContext<'_, S>) -> bool {
        match *event {
            ViewEvent::MouseDown {
                point,
                target: Target::Handle(direction),
            } => {
                let listeners = ctx
                    .window()
                    .listen(ctx.id(), &[ListenerKind::MouseMove, ListenerKind::MouseUp]);
                let start = Size::new(self.attrs.width, self.attrs.height);
                self.resize.begin(direction, point, start, listeners);
                true
            }
            ViewEvent::MouseMove { point } => self.on_move(point, ctx),
            ViewEvent::MouseUp { .. } => self.resize.end(),
            ViewEvent::Click { point, .. } => {
                let rect = image_rect(&self.attrs, ctx.layout_width());
                if point.x <= rect.right() {
                    return false;
                }
                let mut tr = ctx.state().tr();
                tr.set_selection(Selection::cursor(ctx.pos() + 1))
                    .set_meta(UiEvent::Click);
                ctx.dispatch(tr);
                true
            }
            ViewEvent::DragStart => {
                trace!(pos = ctx.pos(), "image drag start");
                self.pending.set(ctx.pos());
                false
            }
            ViewEvent::MouseDown { .. } => false,
        }
    }

    fn destroy(&mut self) {
        self.resize.end();
    }
}
