use super::Aggregate;

/// Concatenates the field of every record, in order, putting `separator`
/// between consecutive values.
///
/// The separator goes in only once the buffer holds some text, so empty
/// values at the start of a group leave no trace. Later empty values still
/// bring their separator.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    separator: String,
    buffer: String,
}

impl Join {
    pub fn new(separator: &str) -> Join {
        Join {
            separator: separator.to_string(),
            buffer: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }
}

impl Aggregate for Join {
    fn update(&mut self, data: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push_str(&self.separator);
        }

        self.buffer.push_str(data);
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{Aggregate, Join};

    #[test]
    fn test_join() {
        let mut join = Join::new(",");

        join.update("a");
        assert_eq!(join.value(), "a");

        join.update("b");
        join.update("c");
        assert_eq!(join.value(), "a,b,c");
    }

    #[test]
    fn test_leading_empty_values() {
        let mut join = Join::new(" | ");

        join.update("");
        join.update("x");
        join.update("y");

        assert_eq!(join.value(), "x | y");
    }

    #[test]
    fn test_inner_and_trailing_empty_values() {
        let mut join = Join::new("+");

        join.update("x");
        join.update("");
        join.update("y");
        assert_eq!(join.value(), "x++y");

        join.update("");
        assert_eq!(join.value(), "x++y+");
    }

    #[test]
    fn test_reset() {
        let mut join = Join::new(";");

        join.update("a");
        join.update("b");
        join.reset();
        join.update("c");

        assert_eq!(join.value(), "c");
    }

    #[test]
    fn test_grows_without_limit() {
        let mut join = Join::new(",");
        let chunk = "y".repeat(600);

        for _ in 0..10 {
            join.update(&chunk);
        }

        assert_eq!(join.value().len(), 600 * 10 + 9);
    }
}
