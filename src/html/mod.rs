//! # HTML import and export
//!
//! A small owned DOM used by the parse and render rules of node types, a writer for it and a
//! lenient fragment parser on top of the `html5ever` tokenizer.
mod dom;
mod parse;
mod style;

pub use dom::{write_html, DomNode, Element};
pub use parse::parse_fragment;
pub use style::Style;
