use super::editor;
use crate::image::ImageAttrs;
use crate::schema::{helper::*, EditorNode, ED};
use crate::editor::Editor;
use crate::state::Selection;
use crate::view::{Direction, Point, Target, ViewEvent};

const START: &str =
    r#"<p>x</p><img data-resizable-image="true" src="a.png" width="300" height="200">"#;

fn image(width: i32, height: i32) -> EditorNode {
    img(ImageAttrs {
        width,
        height,
        ..ImageAttrs::with_src("a.png")
    })
}

fn press(direction: Direction, x: i32, y: i32) -> ViewEvent {
    ViewEvent::MouseDown {
        point: Point::new(x, y),
        target: Target::Handle(direction),
    }
}

fn move_to(x: i32, y: i32) -> ViewEvent {
    ViewEvent::MouseMove {
        point: Point::new(x, y),
    }
}

#[test]
fn test_resize_drag_commits_every_move() {
    let mut editor = editor(START);
    editor.select_node(3).unwrap();
    let view = editor.view_at(3).unwrap();

    assert!(editor
        .handle_view_event(view, press(Direction::BottomRight, 300, 200))
        .unwrap());
    assert_eq!(editor.window().listener_count(), 2);

    assert!(editor.window_event(move_to(340, 230)).unwrap());
    assert_eq!(editor.doc(), &doc((p("x"), image(340, 230))));
    assert_eq!(editor.view_at(3), Some(view));

    // below the minimum
    editor.window_event(move_to(0, 0)).unwrap();
    assert_eq!(editor.doc(), &doc((p("x"), image(50, 50))));
    assert_eq!(editor.state().selection(), Selection::node(3));

    editor
        .window_event(ViewEvent::MouseUp {
            point: Point::new(0, 0),
        })
        .unwrap();
    assert_eq!(editor.window().listener_count(), 0);

    // no longer dragging
    assert!(!editor.window_event(move_to(500, 500)).unwrap());
    assert_eq!(editor.doc(), &doc((p("x"), image(50, 50))));
    assert!(editor.to_html().contains(r#"width="50" height="50""#));
}

#[test]
fn test_edge_handle_changes_one_dimension() {
    let mut editor = editor(START);
    let view = editor.view_at(3).unwrap();
    editor
        .handle_view_event(view, press(Direction::Left, 0, 100))
        .unwrap();
    editor.window_event(move_to(-40, 180)).unwrap();
    assert_eq!(editor.doc(), &doc((p("x"), image(340, 200))));

    editor
        .handle_view_event(
            view,
            ViewEvent::MouseUp {
                point: Point::new(-40, 180),
            },
        )
        .unwrap();
    assert_eq!(editor.window().listener_count(), 0);
}

#[test]
fn test_listeners_released_when_node_deleted() {
    let mut editor = editor(START);
    let view = editor.view_at(3).unwrap();
    editor
        .handle_view_event(view, press(Direction::Top, 150, 0))
        .unwrap();
    assert_eq!(editor.window().listener_count(), 2);

    let mut tr = editor.state().tr();
    tr.delete(3, 4).unwrap();
    editor.dispatch(tr).unwrap();
    assert!(editor.views().is_empty());
    assert_eq!(editor.window().listener_count(), 0);
}

#[test]
fn test_listeners_released_when_editor_dropped() {
    let mut editor = editor(START);
    let window = editor.window().clone();
    let view = editor.view_at(3).unwrap();
    editor
        .handle_view_event(view, press(Direction::Bottom, 150, 200))
        .unwrap();
    assert_eq!(window.listener_count(), 2);
    drop(editor);
    assert_eq!(window.listener_count(), 0);
}

#[test]
fn test_click_right_of_image_places_cursor() {
    let mut editor = editor(START);
    let view = editor.view_at(3).unwrap();
    let click = |x| ViewEvent::Click {
        point: Point::new(x, 20),
        target: Target::Wrapper,
    };

    assert!(!editor.handle_view_event(view, click(120)).unwrap());
    assert_eq!(editor.state().selection(), Selection::cursor(0));

    assert!(editor.handle_view_event(view, click(500)).unwrap());
    assert_eq!(editor.state().selection(), Selection::cursor(4));
}

#[test]
fn test_handles_follow_selection() {
    let mut editor = editor(START);
    let view = editor.view_at(3).unwrap();
    let handles = |editor: &Editor<ED>| {
        editor
            .render_view(view)
            .map(|el| {
                el.child_elements()
                    .filter(|c| c.has_attr("data-handle"))
                    .count()
            })
            .unwrap_or(0)
    };
    assert_eq!(handles(&editor), 0);
    editor.select_node(3).unwrap();
    assert_eq!(handles(&editor), 8);
    editor.select_node(0).unwrap();
    assert_eq!(handles(&editor), 0);
}
