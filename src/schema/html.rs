use super::{EditorNode, HeadingAttrs, ED};
use crate::editor::{DomParser, DomSchema, Group, NodeSpec};
use crate::html::Element;
use crate::model::{AttrNode, Block, Fragment};

pub(super) fn base_specs() -> Vec<NodeSpec<ED>> {
    vec![
        NodeSpec::new("paragraph", Group::Block)
            .with_parse(parse_paragraph)
            .with_render(render_block),
        NodeSpec::new("heading", Group::Block)
            .with_parse(parse_heading)
            .with_render(render_block),
        NodeSpec::new("blockquote", Group::Block)
            .with_parse(parse_blockquote)
            .with_render(render_block),
        NodeSpec::new("horizontalRule", Group::Block)
            .with_parse(parse_hr)
            .with_render(render_block),
        NodeSpec::new("hardBreak", Group::Inline)
            .with_parse(parse_br)
            .with_render(render_block),
    ]
}

fn parse_paragraph(el: &Element, parser: &DomParser<'_, ED>) -> Option<Vec<EditorNode>> {
    if el.tag != "p" {
        return None;
    }
    Some(parser.parse_textblock(&el.children, ED::paragraph))
}

fn parse_heading(el: &Element, parser: &DomParser<'_, ED>) -> Option<Vec<EditorNode>> {
    let level = match el.tag.as_str() {
        "h1" => 1,
        "h2" => 2,
        "h3" => 3,
        "h4" => 4,
        "h5" => 5,
        "h6" => 6,
        _ => return None,
    };
    Some(parser.parse_textblock(&el.children, |content| {
        EditorNode::Heading(AttrNode {
            attrs: HeadingAttrs { level },
            content,
        })
    }))
}

fn parse_blockquote(el: &Element, parser: &DomParser<'_, ED>) -> Option<Vec<EditorNode>> {
    if el.tag != "blockquote" {
        return None;
    }
    let mut content = parser.parse_blocks(&el.children);
    if content.is_empty() {
        content.push(ED::paragraph(Fragment::new()));
    }
    Some(vec![EditorNode::Blockquote(Block {
        content: Fragment::from(content),
    })])
}

fn parse_hr(el: &Element, _: &DomParser<'_, ED>) -> Option<Vec<EditorNode>> {
    (el.tag == "hr").then(|| vec![EditorNode::HorizontalRule])
}

fn parse_br(el: &Element, _: &DomParser<'_, ED>) -> Option<Vec<EditorNode>> {
    (el.tag == "br").then(|| vec![EditorNode::HardBreak])
}

fn render_block(node: &EditorNode) -> Option<Element> {
    let tag = match node {
        EditorNode::Paragraph(_) => "p".to_owned(),
        EditorNode::Heading(AttrNode { attrs, .. }) => format!("h{}", attrs.level),
        EditorNode::Blockquote(_) => "blockquote".to_owned(),
        EditorNode::HorizontalRule => "hr".to_owned(),
        EditorNode::HardBreak => "br".to_owned(),
        _ => return None,
    };
    Some(Element::new(tag))
}
