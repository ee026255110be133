//! Rope-backed, grapheme-aware text engine core for terminal UIs.
//!
//! Layered bottom to top: [`unicode`] and [`scan`] classify bytes and
//! clusters; [`rope`] holds them in a balanced tree of styled segments;
//! [`buf`] exposes that as [`buf::TextBuffer`], the addressable text model;
//! [`view`] wraps a buffer in a reflowed, viewport-sliceable
//! [`view::TextBufferView`]; [`edit`] layers multi-cursor editing and undo
//! over a buffer as [`edit::EditBuffer`]; [`editorview`] couples the two into
//! [`editorview::EditorView`], translating logical and visual coordinates.

pub mod cfg;
pub mod coord;
pub mod diag;
pub mod err;
pub mod memreg;
pub mod prelude;
pub mod rope;
pub mod scan;
pub mod unicode;

pub mod buf;
pub mod edit;
pub mod editorview;
pub mod view;

pub mod testutil;
