use std::collections::HashMap;

use crate::field;

/// A structure for keeping relationship between the column labels of a header
/// line and their positions
#[derive(Debug, Clone, PartialEq)]
pub struct Headers {
    indexes: HashMap<String, usize>,
    names: Vec<String>,
}

impl Headers {
    /// Splits a header line on `delim`. When a label repeats, its first
    /// position is the one remembered.
    pub fn from_line(line: &str, delim: &str) -> Headers {
        let line = field::chomp(line);
        let count = field::field_count(line, delim);
        let mut indexes = HashMap::with_capacity(count);
        let mut names = Vec::with_capacity(count);

        for index in 0..count {
            let name = field::extract(line, index, delim).unwrap_or_default();

            indexes.entry(name.to_string()).or_insert(index);
            names.push(name.to_string());
        }

        Headers { indexes, names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 0-based position of the first column named exactly `label`
    pub fn get(&self, label: &str) -> Option<usize> {
        self.indexes.get(label).copied()
    }

    pub fn contains_key(&self, label: &str) -> bool {
        self.indexes.contains_key(label)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::Headers;

    #[test]
    fn test_from_line() {
        let h = Headers::from_line("name,qty,price\n", ",");

        assert_eq!(h.len(), 3);
        assert_eq!(h.get("name"), Some(0));
        assert_eq!(h.get("price"), Some(2));
        assert_eq!(h.get("Price"), None);
        assert_eq!(h.names(), ["name", "qty", "price"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let h = Headers::from_line("a|b|a", "|");

        assert_eq!(h.get("a"), Some(0));
        assert!(h.contains_key("b"));
    }

    #[test]
    fn test_empty_labels_are_columns_too() {
        let h = Headers::from_line("a,,c", ",");

        assert_eq!(h.get(""), Some(1));
    }
}
