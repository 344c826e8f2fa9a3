//! UI primitives for the ipnotes CLI.
//!
//! This module provides:
//! - **Context**: Terminal detection and output mode (json, plain, pretty)
//! - **Theme**: Badge tokens and owo-colors styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Spinner for network round trips
//! - **Format**: String utilities (truncate, timestamps)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{UiContext, Badge};
//! use crate::ui::render::{header, simple_table, hint};
//!
//! let ctx = UiContext::from_env(args.json, cli.no_color);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "list", None));
//! println!("{}", simple_table(&ctx, &columns, &rows));
//! println!("{}", hint(&ctx, "ipnotes show <cid>"));
//! ```

mod context;
pub mod format;
pub mod progress;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::{OutputMode, UiContext};
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, receipt, simple_table,
};

pub use progress::Spinner;
