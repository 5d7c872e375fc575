use std::env;

use encoding::all::ISO_8859_1;
use encoding::EncodingRef;

use crate::error::Result;
use crate::fieldspec::FieldSpecs;

/// Environment variable holding the delimiter used when none is given.
pub const DELIMITER_ENV: &str = "DELIMITER";

/// Delimiter of last resort: the single byte `0xfe` as read through
/// ISO-8859-1.
pub const DEFAULT_DELIMITER: &str = "\u{fe}";

pub const DEFAULT_JOIN_SEPARATOR: &str = ",";

/// Everything that shapes one aggregation run.
#[derive(Clone)]
pub struct Options {
    pub delimiter: String,
    pub join_separator: String,
    pub specs: FieldSpecs,

    /// Echo the header line of the first input to the output
    pub preserve_header: bool,

    /// Replaces the labels of every aggregate column in the output header
    pub labels: Option<String>,

    /// Label the aggregate columns as `<label>-Sum`, `<label>-Count` and
    /// `<label>-Join`
    pub auto_label: bool,

    pub encoding: EncodingRef,
}

impl Options {
    /// Options with the delimiter taken from the environment and every other
    /// setting at its default.
    pub fn new(specs: FieldSpecs) -> Options {
        Options {
            delimiter: default_delimiter(),
            join_separator: DEFAULT_JOIN_SEPARATOR.to_string(),
            specs,
            preserve_header: false,
            labels: None,
            auto_label: false,
            encoding: ISO_8859_1,
        }
    }

    /// Sets the delimiter, expanding backslash escapes in it.
    pub fn delimiter(mut self, delimiter: &str) -> Options {
        self.delimiter = expand_chars(delimiter);
        self
    }

    pub fn join_separator(mut self, separator: &str) -> Options {
        self.join_separator = separator.to_string();
        self
    }

    pub fn preserve_header(mut self, preserve: bool) -> Options {
        self.preserve_header = preserve;
        self
    }

    pub fn labels(mut self, labels: &str) -> Options {
        self.labels = Some(labels.to_string());
        self
    }

    pub fn auto_label(mut self, auto: bool) -> Options {
        self.auto_label = auto;
        self
    }

    pub fn encoding(mut self, encoding: EncodingRef) -> Options {
        self.encoding = encoding;
        self
    }

    /// Whether the first line of the input is a header to be echoed. Labels of
    /// any kind need it.
    pub fn keeps_header(&self) -> bool {
        self.preserve_header || self.labels.is_some() || self.auto_label || self.specs.uses_labels()
    }

    pub fn validate(&self) -> Result<()> {
        self.specs.validate()
    }
}

/// The delimiter in `$DELIMITER`, or `0xfe` when it is not set.
pub fn default_delimiter() -> String {
    match env::var_os(DELIMITER_ENV) {
        Some(value) => expand_chars(&value.to_string_lossy()),
        None => DEFAULT_DELIMITER.to_string(),
    }
}

/// Expands the backslash escapes `\a \b \f \n \r \t \v \\`; a backslash
/// before any other character yields that character.
pub fn expand_chars(s: &str) -> String {
    let mut expanded = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            expanded.push(c);
            continue;
        }

        match chars.next() {
            Some('a') => expanded.push('\x07'),
            Some('b') => expanded.push('\x08'),
            Some('f') => expanded.push('\x0c'),
            Some('n') => expanded.push('\n'),
            Some('r') => expanded.push('\r'),
            Some('t') => expanded.push('\t'),
            Some('v') => expanded.push('\x0b'),
            Some(other) => expanded.push(other),
            None => expanded.push('\\'),
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::{expand_chars, Options};
    use crate::fieldspec::{FieldSpec, FieldSpecs};

    #[test]
    fn test_expand_chars() {
        assert_eq!(expand_chars(r"\t"), "\t");
        assert_eq!(expand_chars(r"a\|b"), "a|b");
        assert_eq!(expand_chars(r"\\"), "\\");
        assert_eq!(expand_chars(r"x\n\r"), "x\n\r");
        assert_eq!(expand_chars("plain"), "plain");
        assert_eq!(expand_chars(r"end\"), "end\\");
    }

    #[test]
    fn test_keeps_header() {
        let numeric = FieldSpecs::new(FieldSpec::Positions("1".into()))
            .sums(FieldSpec::Positions("2".into()));
        let labelled = FieldSpecs::new(FieldSpec::Labels("id".into()))
            .sums(FieldSpec::Positions("2".into()));

        assert!(!Options::new(numeric.clone()).keeps_header());
        assert!(Options::new(numeric.clone()).preserve_header(true).keeps_header());
        assert!(Options::new(numeric.clone()).auto_label(true).keeps_header());
        assert!(Options::new(numeric).labels("x").keeps_header());
        assert!(Options::new(labelled).keeps_header());
    }

    #[test]
    fn test_builder() {
        let options = Options::new(FieldSpecs::new(FieldSpec::Positions("1".into())))
            .delimiter(r"\t")
            .join_separator("; ");

        assert_eq!(options.delimiter, "\t");
        assert_eq!(options.join_separator, "; ");
        assert!(options.validate().is_err());
    }
}
