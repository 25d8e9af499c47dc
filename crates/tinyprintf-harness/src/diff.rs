//! Diff rendering for fixture comparison.
//!
//! Fixture outputs are usually a single line, so besides the per-line hunks
//! the diff marks the first differing column with a caret.

/// Render a text diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i).copied();
        let a = actual_lines.get(i).copied();
        if e == a {
            continue;
        }
        out.push_str(&format!("@@ line {} @@\n", i + 1));
        if let Some(e) = e {
            out.push_str(&format!("-{}\n", visible(e)));
        }
        if let Some(a) = a {
            out.push_str(&format!("+{}\n", visible(a)));
        }
        if let (Some(e), Some(a)) = (e, a) {
            let col = first_difference(&visible(e), &visible(a));
            out.push_str(&format!(" {}^ col {}\n", " ".repeat(col), col + 1));
        }
    }
    out
}

/// Escape control bytes so padding and terminators stay visible.
fn visible(s: &str) -> String {
    s.chars().flat_map(char::escape_default).collect()
}

fn first_difference(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.chars().count().min(b.chars().count()))
}
