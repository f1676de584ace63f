#![warn(missing_docs)]
//! # Teapress editor
//!
//! The article editor of the Teapress portal: a ProseMirror-style document model with HTML
//! import and export, node views, plugins, and the resizable image extension.
//!
//! Documents are persistent trees of [`schema::EditorNode`]s. An [`editor::Editor`] owns the
//! current [`state::EditorState`], applies [`state::Transaction`]s and keeps the interactive
//! node views in sync with the document.

#[macro_use]
extern crate derive_new;

pub(crate) mod de;
pub mod editor;
pub mod html;
pub mod image;
pub mod model;
pub mod schema;
pub mod state;
pub mod transform;
pub mod view;

#[cfg(test)]
mod tests;
