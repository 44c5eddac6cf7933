//! Whitespace cleanup for TOON text.
//!
//! [`optimize`] is conservative: it only removes whitespace no construct
//! depends on. [`minify`] goes further, collapsing space runs outside quotes
//! and re-deriving indentation at the smallest depths the decoder can still
//! tell apart. Both guarantee the output decodes to the same tree as the
//! input.

/// Trims trailing whitespace from every line and collapses runs of blank
/// lines to a single one.
#[must_use]
pub fn optimize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_blank = false;
    let mut first = true;
    for raw in input.split('\n') {
        let line = raw.trim_end();
        if line.is_empty() {
            if previous_blank {
                continue;
            }
            previous_blank = true;
        } else {
            previous_blank = false;
        }
        if !first {
            out.push('\n');
        }
        out.push_str(line);
        first = false;
    }
    out
}

/// One indentation level currently open, with its depth in the input and
/// the depth it is re-emitted at.
struct Frame {
    old: usize,
    new: usize,
    /// Whether the last line at this depth was a `- ` list item. Lines
    /// indented under an item keep the item's content alignment rules.
    item: bool,
}

/// Produces the densest text that still decodes to the same tree.
///
/// Runs [`optimize`], collapses interior space runs outside quoted spans,
/// and rewrites indentation level by level. Nesting survives because the
/// rewrite preserves every column relation the decoder inspects: equal
/// depths stay equal, deeper stays deeper, and content continuation lines
/// keep their two-column offset from the item's hyphen.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, encode, minify, toon};
///
/// let value = toon!({"user": {"name": "Ada"}});
/// let dense = minify(&encode(&value).unwrap());
/// assert_eq!(dense, "user:\n name: Ada");
/// assert_eq!(decode(&dense).unwrap(), value);
/// ```
#[must_use]
pub fn minify(input: &str) -> String {
    let cleaned = optimize(input);
    let mut out = String::with_capacity(cleaned.len());
    let mut stack: Vec<Frame> = Vec::new();
    let mut first = true;

    for line in cleaned.split('\n') {
        if !first {
            out.push('\n');
        }
        first = false;
        if line.is_empty() {
            continue;
        }
        let old = line.len() - line.trim_start_matches(' ').len();
        let text = &line[old..];
        let item = text == "-" || text.starts_with("- ");

        while stack.last().is_some_and(|f| old < f.old) {
            stack.pop();
        }
        let pushed = match stack.last() {
            Some(f) if f.old == old => None,
            // Under an item, a line at hyphen+2 is the item's own mapping
            // continuation; anything deeper belongs to a nested block and
            // must clear the continuation column.
            Some(f) if f.item => Some(f.new + if old == f.old + 2 { 2 } else { 3 }),
            Some(f) => Some(f.new + 1),
            None => Some(0),
        };
        let new = match pushed {
            Some(new) => {
                stack.push(Frame { old, new, item });
                new
            }
            None => match stack.last_mut() {
                Some(f) => {
                    f.item = item;
                    f.new
                }
                None => 0,
            },
        };

        for _ in 0..new {
            out.push(' ');
        }
        collapse_spaces(&mut out, text);
    }
    out
}

/// Appends `line` with interior space runs outside quotes collapsed to one.
fn collapse_spaces(out: &mut String, line: &str) {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut in_run = false;
    for c in line.chars() {
        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }
        match c {
            '\\' if in_quotes => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_quotes = !in_quotes;
                in_run = false;
                out.push(c);
            }
            ' ' if !in_quotes => {
                if !in_run {
                    out.push(' ');
                }
                in_run = true;
            }
            c => {
                in_run = false;
                out.push(c);
            }
        }
    }
}
