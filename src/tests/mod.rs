mod drag_drop;
mod resize;

use crate::editor::Editor;
use crate::image::ResizableImage;
use crate::model::Node;
use crate::schema::{EditorNode, ED};

fn editor(html: &str) -> Editor<ED> {
    Editor::<ED>::builder()
        .extension(ResizableImage::new())
        .content(html)
        .build()
}

fn count_images(doc: &EditorNode) -> usize {
    let mut count = 0;
    doc.descendants(&mut |node, _| {
        if let EditorNode::ResizableImage(_) = node {
            count += 1;
        }
        true
    });
    count
}
