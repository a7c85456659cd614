//! Terminal text formatting helpers.

use colored::Colorize;

/// Light markdown for terminal output: **bold**, `inline code` and fenced
/// code blocks. Anything else passes through untouched.
pub fn render_markdown_lite(text: &str) -> String {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        if let Some(lang) = line.strip_prefix("```") {
            if in_fence {
                lines.push(String::new());
            } else if !lang.is_empty() {
                lines.push(format!("  {}", lang.dimmed()));
            }
            in_fence = !in_fence;
        } else if in_fence {
            lines.push(format!("  {}", line.cyan()));
        } else {
            lines.push(render_inline(line));
        }
    }

    lines.join("\n")
}

/// Style complete `**..**` and `` `..` `` spans; unclosed markers are kept.
fn render_inline(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(pos) = rest.find(&['*', '`'][..]) {
        let (before, from) = rest.split_at(pos);
        out.push_str(before);

        if let Some(after) = from.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                out.push_str(&after[..end].bold().to_string());
                rest = &after[end + 2..];
                continue;
            }
        } else if let Some(after) = from.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                out.push_str(&after[..end].cyan().to_string());
                rest = &after[end + 1..];
                continue;
            }
        }

        // Both markers are one byte.
        out.push_str(&from[..1]);
        rest = &from[1..];
    }

    out.push_str(rest);
    out
}

/// Cut `text` to at most `max` characters, marking the cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
