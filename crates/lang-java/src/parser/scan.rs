//! Bracket-aware scanning over type expressions.
//!
//! All splitting tracks `<...>` nesting so that separators inside type arguments are
//! never mistaken for separators of the enclosing expression.

use rosetta_api::{BoundKind, TypeError, TypeResult};

pub const EXTENDS_CLAUSE: &str = " extends ";
pub const SUPER_CLAUSE: &str = " super ";
const ARRAY_SUFFIX: &str = "[]";

/// Validates `<`/`>` nesting and `[]` pairs over the whole expression.
pub fn check_balanced(raw: &str) -> TypeResult<()> {
    let mut depth = 0usize;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeError::malformed(raw, "unmatched `>`"))?;
            }
            '[' => {
                if chars.next() != Some(']') {
                    return Err(TypeError::malformed(raw, "`[` must be followed by `]`"));
                }
            }
            ']' => return Err(TypeError::malformed(raw, "unmatched `]`")),
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypeError::malformed(raw, "unclosed `<`"));
    }
    Ok(())
}

/// Strips trailing `[]` pairs, returning the element text and the array depth.
pub fn strip_array_suffix(text: &str) -> (&str, usize) {
    let mut text = text.trim();
    let mut depth = 0;
    while let Some(rest) = text.strip_suffix(ARRAY_SUFFIX) {
        depth += 1;
        text = rest.trim_end();
    }
    (text, depth)
}

/// Finds the bound clause whose keyword occurs first in `text`.
///
/// Returns the clause kind, the keyword offset, and the offset right after the keyword.
pub fn find_clause(text: &str) -> Option<(BoundKind, usize, usize)> {
    let extends = text.find(EXTENDS_CLAUSE);
    let sup = text.find(SUPER_CLAUSE);
    match (extends, sup) {
        (Some(e), Some(s)) if s < e => Some((BoundKind::Super, s, s + SUPER_CLAUSE.len())),
        (Some(e), _) => Some((BoundKind::Extends, e, e + EXTENDS_CLAUSE.len())),
        (None, Some(s)) => Some((BoundKind::Super, s, s + SUPER_CLAUSE.len())),
        (None, None) => None,
    }
}

/// Splits `text` on `sep` at nesting depth 0. Pieces are trimmed.
pub fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                pieces.push(text[start..idx].trim());
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Reads the argument list opened by the `<` at byte offset `open`.
///
/// Returns the comma separated arguments (split at depth 1) and the offset of the
/// matching `>`. An empty list (`<>`) yields no arguments.
pub fn type_arguments(text: &str, open: usize) -> TypeResult<(Vec<&str>, usize)> {
    debug_assert_eq!(text.as_bytes().get(open), Some(&b'<'));
    let mut depth = 0usize;
    let mut start = open + 1;
    let mut args = Vec::new();
    for (idx, c) in text[open..].char_indices().map(|(i, c)| (i + open, c)) {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    let last = text[start..idx].trim();
                    if !(args.is_empty() && last.is_empty()) {
                        args.push(last);
                    }
                    return Ok((args, idx));
                }
            }
            ',' if depth == 1 => {
                args.push(text[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    Err(TypeError::malformed(text, "unclosed `<`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_balanced() {
        assert!(check_balanced("Map<K, List<V>>[]").is_ok());
        assert!(check_balanced("Map<K, V").is_err());
        assert!(check_balanced("Map<K>>").is_err());
        assert!(check_balanced("int[").is_err());
        assert!(check_balanced("int]").is_err());
    }

    #[test]
    fn test_strip_array_suffix() {
        assert_eq!(strip_array_suffix("int[][]"), ("int", 2));
        assert_eq!(strip_array_suffix(" List<String>[] "), ("List<String>", 1));
        assert_eq!(strip_array_suffix("T"), ("T", 0));
    }

    #[test]
    fn test_find_clause_first_occurrence_wins() {
        let (kind, at, _) = find_clause("? super Comparable<? extends T>").unwrap();
        assert_eq!(kind, BoundKind::Super);
        assert_eq!(at, 1);

        let (kind, _, after) = find_clause("T extends Comparable<? super T>").unwrap();
        assert_eq!(kind, BoundKind::Extends);
        assert_eq!(&"T extends Comparable<? super T>"[after..], "Comparable<? super T>");

        assert!(find_clause("List<T>").is_none());
    }

    #[test]
    fn test_split_top_level_ignores_nested() {
        assert_eq!(
            split_top_level("Comparable<A & B> & Serializable", '&'),
            vec!["Comparable<A & B>", "Serializable"]
        );
    }

    #[test]
    fn test_type_arguments() {
        let text = "Map<String, List<Map<K, V>>>";
        let (args, close) = type_arguments(text, 3).unwrap();
        assert_eq!(args, vec!["String", "List<Map<K, V>>"]);
        assert_eq!(close, text.len() - 1);

        let (args, close) = type_arguments("List<>", 4).unwrap();
        assert!(args.is_empty());
        assert_eq!(close, 5);

        let (args, _) = type_arguments("Map<A,,B>", 3).unwrap();
        assert_eq!(args, vec!["A", "", "B"]);
    }
}
