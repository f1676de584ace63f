//! # The document model
//!
//! Persistent document trees in the ProseMirror style. Positions count the opening and closing
//! token of every non-leaf node, one for every leaf and one for every UTF-16 code unit of text.
mod fragment;
mod node;
mod replace;
mod resolved_pos;
mod schema;
mod slice;
pub(crate) mod util;

pub use fragment::{Fragment, Index, IndexError};
pub use node::{Node, Text};
pub(crate) use replace::replace;
pub use replace::ReplaceError;
pub use resolved_pos::{ResolveErr, ResolvedPos};
pub use schema::{AttrNode, Block, Leaf, NodeImpl, NodeType, Schema, TextNode};
pub use slice::Slice;

#[cfg(test)]
mod tests {
    use super::{Fragment, Index, IndexError, Node, ReplaceError, ResolvedPos, Slice};
    use crate::schema::{helper::*, EditorNode, ED};
    use std::ops::Deref;

    #[test]
    fn test_deserialize_text() {
        assert_eq!(
            serde_json::from_str::<EditorNode>(r#"{"type": "text", "text": "Foo"}"#).unwrap(),
            EditorNode::text("Foo"),
        );
    }

    #[test]
    fn test_size() {
        assert_eq!(node("Hello").node_size(), 5);
        assert_eq!(node("\u{1F60A}").node_size(), 2);
        assert_eq!(img(Default::default()).node_size(), 1);

        let test_3 = p(("Hallo", br(), "Foo"));
        assert_eq!(test_3.node_size(), 11);
        let ct_3 = test_3.content().unwrap();
        assert_eq!(ct_3.find_index(0, false), Ok(Index { index: 0, offset: 0 }));
        assert_eq!(ct_3.find_index(3, false), Ok(Index { index: 0, offset: 0 }));
        assert_eq!(ct_3.find_index(5, false), Ok(Index { index: 1, offset: 5 }));
        assert_eq!(ct_3.find_index(6, false), Ok(Index { index: 2, offset: 6 }));
        assert_eq!(ct_3.find_index(7, false), Ok(Index { index: 2, offset: 6 }));
        assert_eq!(ct_3.find_index(7, true), Ok(Index { index: 3, offset: 9 }));
        assert_eq!(ct_3.find_index(9, false), Ok(Index { index: 3, offset: 9 }));
        assert_eq!(
            ct_3.find_index(10, false),
            Err(IndexError::OutOfBounds { pos: 10, size: 9 })
        );
    }

    #[test]
    fn test_append_merges_text() {
        let a: Fragment<ED> = Fragment::from((node("ab"),));
        let b: Fragment<ED> = Fragment::from((node("cd"), br()));
        let joined = a.append(b);
        assert_eq!(joined.child_count(), 2);
        assert_eq!(joined.size(), 5);
        assert_eq!(joined.first_child(), Some(&node("abcd")));
    }

    #[test]
    fn test_node_at() {
        let image = img(Default::default());
        let test_doc = doc((p("ab"), image.clone(), blockquote((p("cd"),))));
        assert_eq!(test_doc.node_at(0), Some(&p("ab")));
        assert_eq!(test_doc.node_at(1), Some(&node("ab")));
        assert_eq!(test_doc.node_at(4), Some(&image));
        assert_eq!(test_doc.node_at(5), test_doc.child(2));
        assert_eq!(test_doc.node_at(7).map(Node::text_content), Some("cd".to_string()));
        assert_eq!(test_doc.node_at(11), None);
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    struct Sol<'a> {
        node: &'a EditorNode,
        start: usize,
        end: usize,
    }

    fn sol(node: &EditorNode, start: usize, end: usize) -> Sol {
        Sol { node, start, end }
    }

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    enum Exp<'a> {
        Node(&'a EditorNode),
        Str(&'static str),
        Null,
    }

    impl<'a> PartialEq<Exp<'a>> for Option<std::borrow::Cow<'a, EditorNode>> {
        fn eq(&self, other: &Exp<'a>) -> bool {
            if let Some(node) = self {
                match other {
                    Exp::Node(exp_node) => node.deref() == *exp_node,
                    Exp::Str(text) => &node.text_content() == text,
                    Exp::Null => false,
                }
            } else {
                *other == Exp::Null
            }
        }
    }

    #[test]
    fn test_resolve() {
        let test_doc = doc((p("ab"), blockquote((p("cdef"),))));
        let _doc = sol(&test_doc, 0, 12);
        let _p1 = sol(test_doc.child(0).unwrap(), 1, 3);
        let _blk = sol(test_doc.child(1).unwrap(), 5, 11);
        let _p2 = sol(_blk.node.child(0).unwrap(), 6, 10);

        let expected = [
            (&[_doc][..], 0, Exp::Null, Exp::Node(_p1.node)),
            (&[_doc, _p1], 0, Exp::Null, Exp::Str("ab")),
            (&[_doc, _p1], 1, Exp::Str("a"), Exp::Str("b")),
            (&[_doc, _p1], 2, Exp::Str("ab"), Exp::Null),
            (&[_doc], 4, Exp::Node(_p1.node), Exp::Node(_blk.node)),
            (&[_doc, _blk], 0, Exp::Null, Exp::Node(_p2.node)),
            (&[_doc, _blk, _p2], 0, Exp::Null, Exp::Str("cdef")),
            (&[_doc, _blk, _p2], 1, Exp::Str("c"), Exp::Str("def")),
            (&[_doc, _blk, _p2], 2, Exp::Str("cd"), Exp::Str("ef")),
            (&[_doc, _blk, _p2], 3, Exp::Str("cde"), Exp::Str("f")),
            (&[_doc, _blk, _p2], 4, Exp::Str("cdef"), Exp::Null),
            (&[_doc, _blk], 6, Exp::Node(_p2.node), Exp::Null),
            (&[_doc], 12, Exp::Node(_blk.node), Exp::Null),
        ];

        for (pos, (path, parent_offset, before, after)) in expected.iter().enumerate() {
            let pos = ResolvedPos::<ED>::resolve(&test_doc, pos).unwrap();
            assert_eq!(pos.depth(), path.len() - 1);

            for (i, exp_i) in path.iter().enumerate() {
                let act = sol(pos.node(i), pos.start(i), pos.end(i));
                assert_eq!((i, &act), (i, exp_i));
                if i > 0 {
                    assert_eq!(pos.before(i), Some(exp_i.start - 1));
                    assert_eq!(pos.after(i), Some(exp_i.end + 1));
                }
            }
            assert_eq!(pos.parent_offset(), *parent_offset);
            assert_eq!(pos.node_before(), *before);
            assert_eq!(pos.node_after(), *after);
        }
        assert!(test_doc.resolve(13).is_err());
    }

    #[test]
    fn test_replace_flat() {
        let image = img(Default::default());
        let test_doc = doc((p("ab"), image.clone(), p("cd")));

        let deleted = test_doc.replace(4..5, &Slice::default()).unwrap();
        assert_eq!(deleted, doc((p("ab"), p("cd"))));

        let moved = deleted.replace(8..8, &Slice::from_node(image.clone())).unwrap();
        assert_eq!(moved, doc((p("ab"), p("cd"), image)));

        let typed = test_doc.replace(2..2, &Slice::from_node(node("x"))).unwrap();
        assert_eq!(typed.child(0), Some(&p("axb")));
    }

    #[test]
    fn test_replace_rejects_invalid() {
        let test_doc = doc((p("ab"), p("cd")));
        let image = img(Default::default());
        assert_eq!(
            test_doc.replace(2..2, &Slice::from_node(image)),
            Err(ReplaceError::InvalidContent("paragraph"))
        );
        assert_eq!(
            test_doc.replace(2..6, &Slice::default()),
            Err(ReplaceError::CrossesNodes { from: 2, to: 6 })
        );
        assert_eq!(
            test_doc.replace(0..8, &Slice::default()),
            Err(ReplaceError::InvalidContent("doc"))
        );
    }
}
