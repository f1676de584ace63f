use crate::de;
use serde::{Deserialize, Serialize};

/// Width of a new image
pub const DEFAULT_WIDTH: i32 = 300;
/// Height of a new image
pub const DEFAULT_HEIGHT: i32 = 200;

/// Attributes for a resizable image
///
/// Values are not validated here. The minimum size is only enforced by interactive resizing,
/// attributes set through the API may be smaller.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImageAttrs {
    /// Source URL
    pub src: Option<String>,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Alternative Text (Accessibility)
    pub alt: Option<String>,
    /// Caption shown below the image; empty for none
    #[serde(deserialize_with = "de::deserialize_or_default")]
    pub caption: String,
    /// Horizontal placement
    pub align: Align,
}

impl ImageAttrs {
    /// Attributes for a new image with the given source.
    pub fn with_src<T: Into<String>>(src: T) -> Self {
        ImageAttrs {
            src: Some(src.into()),
            ..Default::default()
        }
    }
}

impl Default for ImageAttrs {
    fn default() -> Self {
        ImageAttrs {
            src: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            alt: None,
            caption: String::new(),
            align: Align::Left,
        }
    }
}

/// Horizontal placement of an image inside the content area
#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Flush left
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

impl Align {
    /// The name used in HTML and JSON
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// The CSS `margin-left` and `margin-right` values.
    pub fn margins(self) -> (&'static str, &'static str) {
        match self {
            Self::Left => ("0", "0"),
            Self::Center => ("auto", "auto"),
            Self::Right => ("auto", "0"),
        }
    }
}

impl Default for Align {
    fn default() -> Self {
        Self::Left
    }
}

/// Unknown names fall back to [`Align::Left`].
impl From<&str> for Align {
    fn from(name: &str) -> Self {
        match name.trim() {
            "center" => Self::Center,
            "right" => Self::Right,
            _ => Self::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Align, ImageAttrs};

    #[test]
    fn test_defaults() {
        let attrs: ImageAttrs = serde_json::from_str("{}").unwrap();
        assert_eq!(attrs, ImageAttrs::default());
        assert_eq!((attrs.width, attrs.height), (300, 200));
        assert_eq!(attrs.src, None);
        assert_eq!(attrs.caption, "");
    }

    #[test]
    fn test_null_caption() {
        let attrs: ImageAttrs =
            serde_json::from_str(r#"{"src": "x.png", "caption": null, "width": 40}"#).unwrap();
        assert_eq!(attrs.caption, "");
        // no clamping at this layer
        assert_eq!(attrs.width, 40);
    }

    #[test]
    fn test_align() {
        assert_eq!(Align::from("center"), Align::Center);
        assert_eq!(Align::from(" right "), Align::Right);
        assert_eq!(Align::from("justify"), Align::Left);
        assert_eq!(Align::Right.margins(), ("auto", "0"));
        assert_eq!(
            serde_json::to_string(&Align::Center).unwrap(),
            r#""center""#
        );
    }
}
