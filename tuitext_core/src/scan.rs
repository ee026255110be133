//! UTF-8 scanner: ASCII-only test, line-break enumeration, wrap-break
//! enumeration, width-bounded wrap-position finder.
//!
//! Never fails on ill-formed byte sequences; continuation bytes encountered
//! standalone are treated as their own one-column unit.

mod ascii;
mod linebreak;
mod wrapbreak;
mod wrapwidth;

pub use ascii::is_ascii_only;
pub use linebreak::{LineBreak, LineBreakKind, find_line_breaks};
pub use wrapbreak::{WrapBreak, WrapBreakKind, find_wrap_breaks};
pub use wrapwidth::{WrapPosResult, find_wrap_pos_by_width};
