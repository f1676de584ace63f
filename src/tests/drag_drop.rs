use super::{count_images, editor};
use crate::editor::{DropEvent, EditorError};
use crate::image::ImageAttrs;
use crate::model::{Fragment, Slice};
use crate::schema::helper::*;
use crate::state::Selection;

const START: &str = r#"<p>A</p><img data-resizable-image="true" src="cup.png"><p>B</p>"#;

#[test]
fn test_copy_drop_moves_image() {
    let mut editor = editor(START);
    let image = img(ImageAttrs::with_src("cup.png"));
    assert_eq!(editor.doc(), &doc((p("A"), image.clone(), p("B"))));

    let view = editor.view_at(3).unwrap();
    let slice = editor.drag_start(view).unwrap();
    assert_eq!(editor.state().selection(), Selection::node(3));
    assert_eq!(slice, Slice::from_node(image.clone()));

    editor.handle_drop(DropEvent::new(7, slice, false)).unwrap();
    assert_eq!(editor.doc(), &doc((p("A"), p("B"), image)));
    assert_eq!(count_images(editor.doc()), 1);
    assert_eq!(editor.state().selection(), Selection::node(6));
    assert_eq!(editor.views().len(), 1);
    assert!(editor.view_at(6).is_some());
}

#[test]
fn test_move_drop_uses_default() {
    let mut editor = editor(START);
    let image = img(ImageAttrs::with_src("cup.png"));
    let view = editor.view_at(3).unwrap();
    let slice = editor.drag_start(view).unwrap();

    editor.handle_drop(DropEvent::new(0, slice, true)).unwrap();
    assert_eq!(editor.doc(), &doc((image, p("A"), p("B"))));
    assert_eq!(editor.state().selection(), Selection::node(0));
}

#[test]
fn test_drop_inside_text_lands_between_blocks() {
    let mut editor = editor(START);
    let image = img(ImageAttrs::with_src("cup.png"));
    let view = editor.view_at(3).unwrap();
    let slice = editor.drag_start(view).unwrap();

    // inside "B", closer to its end
    editor.handle_drop(DropEvent::new(6, slice, false)).unwrap();
    assert_eq!(editor.doc(), &doc((p("A"), p("B"), image)));
    assert_eq!(count_images(editor.doc()), 1);
}

#[test]
fn test_external_drop_copies() {
    let mut editor = editor(START);
    let other = img(ImageAttrs::with_src("pot.png"));
    editor
        .handle_drop(DropEvent::new(0, Slice::from_node(other.clone()), false))
        .unwrap();
    assert_eq!(
        editor.doc(),
        &doc((other, p("A"), img(ImageAttrs::with_src("cup.png")), p("B")))
    );
    assert_eq!(editor.views().len(), 2);
}

#[test]
fn test_pending_origin_cleared_by_other_drop() {
    let mut editor = editor(START);
    let view = editor.view_at(3).unwrap();
    editor.drag_start(view).unwrap();

    let text = Slice::new(Fragment::from((p("C"), p("D"))), 0, 0);
    editor.handle_drop(DropEvent::new(7, text, false)).unwrap();
    assert_eq!(count_images(editor.doc()), 1);

    // the origin is gone, a later copy stays a copy
    let again = Slice::from_node(img(ImageAttrs::with_src("cup.png")));
    editor.handle_drop(DropEvent::new(0, again, false)).unwrap();
    assert_eq!(count_images(editor.doc()), 2);
}

#[test]
fn test_failed_drop_keeps_origin() {
    let mut editor = editor(START);
    let image = img(ImageAttrs::with_src("cup.png"));
    let view = editor.view_at(3).unwrap();
    let slice = editor.drag_start(view).unwrap();

    assert_eq!(
        editor.handle_drop(DropEvent::new(99, slice, false)),
        Err(EditorError::NoDropPoint(99))
    );
    assert_eq!(count_images(editor.doc()), 1);

    // an unrelated dispatch afterwards leaves the image alone
    let mut tr = editor.state().tr();
    tr.set_selection(Selection::cursor(1));
    editor.dispatch(tr).unwrap();
    assert_eq!(editor.doc(), &doc((p("A"), image.clone(), p("B"))));
    assert!(editor.view_at(3).is_some());

    // so does a later external drop
    let other = img(ImageAttrs::with_src("pot.png"));
    editor
        .handle_drop(DropEvent::new(0, Slice::from_node(other.clone()), false))
        .unwrap();
    assert_eq!(editor.doc(), &doc((other, p("A"), image, p("B"))));
}
