use serde::{Deserialize, Serialize};

/// Settings of the resizable image extension
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageOptions {
    /// Smallest width and height reachable by dragging a handle
    pub min_size: i32,
    /// Edge length of a resize handle
    pub handle_size: i32,
    /// How far handles stick out of the image box
    pub handle_offset: i32,
    /// CSS border of the selected image
    pub selected_border: String,
    /// Fill color of the handles
    pub handle_color: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        ImageOptions {
            min_size: 50,
            handle_size: 10,
            handle_offset: 5,
            selected_border: "2px solid #2d7a2d".to_owned(),
            handle_color: "#2d7a2d".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ImageOptions;

    #[test]
    fn test_partial_options() {
        let opts: ImageOptions = serde_json::from_str(r#"{"minSize": 20}"#).unwrap();
        assert_eq!(opts.min_size, 20);
        assert_eq!(opts.handle_size, 10);
        assert_eq!(opts.selected_border, "2px solid #2d7a2d");
    }
}
