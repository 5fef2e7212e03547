use std::borrow::Cow;

use tracing::trace;

use super::line::{leading_indent, parse_list_item};
use crate::tree::is_folder_name;

/// Appends `/` to file-looking items whose next non-blank line is indented deeper.
///
/// Lines that do not parse as list items are left untouched so the strict
/// parser can report them. Running the rewrite twice changes nothing.
pub(super) fn apply_auto_slash(text: &str) -> Cow<'_, str> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut rewritten: Option<Vec<Cow<'_, str>>> = None;

    for (index, &raw) in lines.iter().enumerate() {
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        let Ok(item) = parse_list_item(content, index + 1) else {
            continue;
        };
        if is_folder_name(item.name) {
            continue;
        }

        let next_is_deeper = lines[index + 1..]
            .iter()
            .map(|next| next.trim_end_matches('\r'))
            .find(|next| !next.trim().is_empty())
            .is_some_and(|next| leading_indent(next) > item.indent);
        if !next_is_deeper {
            continue;
        }

        trace!("Appending '/' to '{}' on line {}", item.name, index + 1);
        let mut line = String::with_capacity(raw.len() + 1);
        line.push_str(&raw[..item.name_end]);
        line.push('/');
        line.push_str(&raw[item.name_end..]);

        let lines_out =
            rewritten.get_or_insert_with(|| lines.iter().map(|&raw| Cow::Borrowed(raw)).collect());
        lines_out[index] = Cow::Owned(line);
    }

    match rewritten {
        Some(lines_out) => Cow::Owned(lines_out.join("\n")),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_items_gain_a_slash() {
        let rewritten = apply_auto_slash("Root\n  - Folder\n    - file.txt");
        assert_eq!(rewritten, "Root\n  - Folder/\n    - file.txt");
    }

    #[test]
    fn slash_goes_before_the_comment() {
        let rewritten = apply_auto_slash("- src  # code\n  - main.rs\n");
        assert_eq!(rewritten, "- src/  # code\n  - main.rs\n");
    }

    #[test]
    fn carriage_returns_are_preserved() {
        let rewritten = apply_auto_slash("- src\r\n  - main.rs\r\n");
        assert_eq!(rewritten, "- src/\r\n  - main.rs\r\n");
    }

    #[test]
    fn blank_lines_are_skipped_when_looking_ahead() {
        let rewritten = apply_auto_slash("- src\n\n  - main.rs");
        assert_eq!(rewritten, "- src/\n\n  - main.rs");
    }

    #[test]
    fn untouched_text_is_borrowed() {
        let text = "- src/\n  - main.rs\n- README.md\n";
        assert!(matches!(apply_auto_slash(text), Cow::Borrowed(_)));
    }

    #[test]
    fn rewriting_is_idempotent() {
        let once = apply_auto_slash("- a\n  - b\n    - c\n  - d").into_owned();
        assert_eq!(once, "- a/\n  - b/\n    - c\n  - d");
        assert_eq!(apply_auto_slash(&once), once);
    }
}
