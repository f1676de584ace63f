use super::{Align, ImageAttrs, ImageSchema};
use crate::editor::DomParser;
use crate::html::{Element, Style};
use tracing::debug;

/// Marks `<img>` and `<figure>` elements written by [`render_element`]
pub const MARKER_ATTR: &str = "data-resizable-image";
/// Carries the alignment on the `<img>`
pub const ALIGN_ATTR: &str = "data-align";
/// Put in front of the caption text
pub const CAPTION_MARKER: char = '\u{25B2}';

/// Read image attributes from an element.
///
/// Recognises a bare `<img data-resizable-image>`, which has no caption, and a `<figure>` around
/// such an image with an optional `<figcaption>`. A marked `<figure>` without an image yields the
/// default attributes. Any other element returns `None`.
pub fn parse_element(el: &Element) -> Option<ImageAttrs> {
    match el.tag.as_str() {
        "img" if el.has_attr(MARKER_ATTR) => Some(from_img(el, String::new())),
        "figure" => {
            let figure_marked = el.has_attr(MARKER_ATTR);
            let img = el
                .find("img")
                .filter(|img| figure_marked || img.has_attr(MARKER_ATTR));
            let caption = el
                .find("figcaption")
                .map(|c| strip_marker(&c.text_content()).to_owned())
                .unwrap_or_default();
            match img {
                Some(img) => Some(from_img(img, caption)),
                None if figure_marked => {
                    debug!("image figure without <img>, using defaults");
                    Some(ImageAttrs {
                        caption,
                        align: el.get_attr(ALIGN_ATTR).map(Align::from).unwrap_or_default(),
                        ..Default::default()
                    })
                }
                None => None,
            }
        }
        _ => None,
    }
}

fn from_img(img: &Element, caption: String) -> ImageAttrs {
    let defaults = ImageAttrs::default();
    ImageAttrs {
        src: img.get_attr("src").map(str::to_owned),
        width: int_attr(img, "width", defaults.width),
        height: int_attr(img, "height", defaults.height),
        alt: img.get_attr("alt").map(str::to_owned),
        caption,
        align: img.get_attr(ALIGN_ATTR).map(Align::from).unwrap_or_default(),
    }
}

fn int_attr(el: &Element, name: &str, default: i32) -> i32 {
    match el.get_attr(name) {
        Some(value) => value.trim().parse().unwrap_or_else(|err| {
            debug!(attr = name, value, %err, "invalid number, using default");
            default
        }),
        None => default,
    }
}

/// Strip the caption marker and one space after it.
fn strip_marker(text: &str) -> &str {
    match text.strip_prefix(CAPTION_MARKER) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => text,
    }
}

/// The inline style of the `<img>`.
pub fn image_style(attrs: &ImageAttrs) -> Style {
    let (margin_left, margin_right) = attrs.align.margins();
    Style::new()
        .set("width", format!("{}px", attrs.width))
        .set("height", format!("{}px", attrs.height))
        .set("max-width", "100%")
        .set("display", "block")
        .set("margin-left", margin_left)
        .set("margin-right", margin_right)
}

fn caption_style(align: Align) -> Style {
    let text_align = match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    };
    Style::new()
        .set("text-align", text_align)
        .set("color", "#666")
        .set("font-size", "14px")
        .set("margin-top", "4px")
}

/// Write image attributes as a `<figure>` element that [`parse_element`] reads back unchanged.
pub fn render_element(attrs: &ImageAttrs) -> Element {
    let mut img = Element::new("img").attr(MARKER_ATTR, "true");
    if let Some(src) = &attrs.src {
        img.set_attr("src", src.as_str());
    }
    img.set_attr("width", attrs.width.to_string());
    img.set_attr("height", attrs.height.to_string());
    if let Some(alt) = &attrs.alt {
        img.set_attr("alt", alt.as_str());
    }
    img.set_attr(ALIGN_ATTR, attrs.align.as_str());
    img.set_attr("style", image_style(attrs));

    let figure = Element::new("figure").attr(MARKER_ATTR, "true").child(img);
    if attrs.caption.is_empty() {
        figure
    } else {
        figure.child(
            Element::new("figcaption")
                .attr("style", caption_style(attrs.align))
                .text(format!("{} {}", CAPTION_MARKER, attrs.caption)),
        )
    }
}

pub(super) fn parse_image<S: ImageSchema>(
    el: &Element,
    _: &DomParser<'_, S>,
) -> Option<Vec<S::Node>> {
    parse_element(el).map(|attrs| vec![S::image_node(attrs)])
}

pub(super) fn render_image<S: ImageSchema>(node: &S::Node) -> Option<Element> {
    S::image_attrs(node).map(render_element)
}
