//! Rendering primitives shared by the commands.
//!
//! Every function returns the text for the current mode. Plain mode emits
//! `key=value` lines so scripts can grep results; JSON mode is handled by
//! the commands themselves.

use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use super::context::{OutputMode, UiContext};
use super::theme::{styled, styles, Badge};

/// `ipnotes · list (3 notes)` on a terminal, `ipnotes list` in plain mode.
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Json => String::new(),
        OutputMode::Plain => format!("ipnotes {}", command),
        OutputMode::Pretty => {
            let title = styled("ipnotes", styles::bold(), ctx.color);
            match context {
                Some(context) => format!("{} \u{00B7} {} ({})", title, command, context),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
    }
}

/// Separator between note metadata and note text.
pub fn divider(ctx: &UiContext) -> String {
    match ctx.mode {
        OutputMode::Pretty => "\u{2500}".repeat(ctx.width.min(60)),
        _ => "---".to_string(),
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let mark = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        mark
    } else {
        format!("{} {}", mark, message)
    }
}

/// `Saved At: value` on a terminal, `saved_at=value` otherwise.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled(&format!("{}:", key), styles::dim(), ctx.color), value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Summary after a write: an OK badge with indented fields, or
/// `status=ok` followed by `key=value` lines.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let (first, indent) = if ctx.mode.is_pretty() {
        (badge(ctx, Badge::Ok, title), "  ")
    } else {
        ("status=ok".to_string(), "")
    };
    std::iter::once(first)
        .chain(items.iter().map(|(key, value)| format!("{}{}", indent, kv(ctx, key, value))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Borderless table with a dim header row; tab-separated rows without a
/// header outside pretty mode.
pub fn simple_table(ctx: &UiContext, headers: &[&str], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(ctx.width).unwrap_or(u16::MAX))
        .set_header(headers.iter().map(|title| {
            let cell = Cell::new(title);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        }));
    for column in table.column_iter_mut() {
        column.set_padding((0, 2));
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print unless the command is producing JSON.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut out = if ctx.mode.is_pretty() {
        badge(ctx, Badge::Err, message)
    } else {
        format!("error={}", message)
    };
    if let Some(text) = error_hint {
        out.push('\n');
        out.push_str(&hint(ctx, text));
    }
    out
}

/// Errors always go to stderr so stdout stays parseable.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
