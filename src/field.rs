//! Primitives for finding fields inside a delimited line of text.
//!
//! A line is never split ahead of time: every lookup walks the line from the
//! start, so lines of any length and any number of fields are handled without
//! a schema.
use std::ops::Range;

/// Strips every trailing line break character from `line`.
pub fn chomp(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// Number of `delim`-separated fields in `line`. A delimiter at the very end
/// of the line still opens a trailing empty field.
pub fn field_count(line: &str, delim: &str) -> usize {
    if delim.is_empty() {
        return 1;
    }

    line.matches(delim).count() + 1
}

/// Locates the byte range of the `index`-th field (0-based) of `line`.
///
/// Returns `None` when the line has fewer than `index + 1` fields. Line break
/// characters ending the line never belong to the last field. An empty
/// delimiter makes the whole line a single field.
pub fn locate(line: &str, index: usize, delim: &str) -> Option<Range<usize>> {
    let tail = chomp(line).len();

    if delim.is_empty() {
        return if index == 0 { Some(0..tail) } else { None };
    }

    let mut start = 0;

    for _ in 0..index {
        start += line[start..].find(delim)? + delim.len();
    }

    let end = match line[start..].find(delim) {
        Some(offset) => start + offset,
        None => tail.max(start),
    };

    Some(start..end)
}

/// Borrows the text of the `index`-th field of `line`.
pub fn extract<'a>(line: &'a str, index: usize, delim: &str) -> Option<&'a str> {
    locate(line, index, delim).map(|range| &line[range])
}

/// Clears `target` and fills it with the fields of `line` at `indexes`,
/// separated by `delim` and each one followed by `suffix` if given.
///
/// On failure returns the first index that `line` does not have; `target` is
/// left holding whatever was copied before it.
pub fn join_fields(
    target: &mut String,
    line: &str,
    indexes: &[usize],
    delim: &str,
    suffix: Option<&str>,
) -> Result<(), usize> {
    target.clear();

    for (i, &index) in indexes.iter().enumerate() {
        if i > 0 {
            target.push_str(delim);
        }

        let range = locate(line, index, delim).ok_or(index)?;

        target.push_str(&line[range]);

        if let Some(suffix) = suffix {
            target.push_str(suffix);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{chomp, extract, field_count, join_fields, locate};

    #[test]
    fn test_chomp() {
        assert_eq!(chomp("a,b\r\n"), "a,b");
        assert_eq!(chomp("a,b\n\n"), "a,b");
        assert_eq!(chomp("a,b"), "a,b");
        assert_eq!(chomp("\n"), "");
    }

    #[test]
    fn test_field_count() {
        assert_eq!(field_count("a,b,c", ","), 3);
        assert_eq!(field_count("a,b,", ","), 3);
        assert_eq!(field_count("", ","), 1);
        assert_eq!(field_count("a::b", "::"), 2);
        assert_eq!(field_count("a,b", ""), 1);
    }

    #[test]
    fn test_locate() {
        let line = "one,,three\n";

        assert_eq!(locate(line, 0, ","), Some(0..3));
        assert_eq!(locate(line, 1, ","), Some(4..4));
        assert_eq!(locate(line, 2, ","), Some(5..10));
        assert_eq!(locate(line, 3, ","), None);
    }

    #[test]
    fn test_trailing_delimiter_opens_empty_field() {
        assert_eq!(extract("a,b,", 2, ","), Some(""));
        assert_eq!(extract("a,b,\r\n", 2, ","), Some(""));
        assert_eq!(extract("a,b,", 3, ","), None);
    }

    #[test]
    fn test_multibyte_delimiter() {
        let line = "k1þk2þ3.5";

        assert_eq!(extract(line, 0, "þ"), Some("k1"));
        assert_eq!(extract(line, 2, "þ"), Some("3.5"));

        assert_eq!(extract("a<>b<>c", 1, "<>"), Some("b"));
    }

    #[test]
    fn test_empty_delimiter_is_one_field() {
        assert_eq!(extract("a,b\n", 0, ""), Some("a,b"));
        assert_eq!(extract("a,b\n", 1, ""), None);
    }

    #[test]
    fn test_join_fields() {
        let mut target = String::from("leftover");

        join_fields(&mut target, "a,b,c,d", &[3, 0], ",", None).unwrap();
        assert_eq!(target, "d,a");

        join_fields(&mut target, "a\tb\tc\td", &[1, 2], "\t", Some("-Sum")).unwrap();
        assert_eq!(target, "b-Sum\tc-Sum");

        assert_eq!(join_fields(&mut target, "a,b", &[0, 5], ",", None), Err(5));
    }

    #[test]
    fn test_long_fields_are_not_truncated() {
        let long = "x".repeat(10_000);
        let line = format!("k,{}", long);

        assert_eq!(extract(&line, 1, ","), Some(long.as_str()));
    }
}
