use super::Aggregate;

/// Counts the records whose field is not empty.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Count {
    total: u64,
}

impl Count {
    pub fn new() -> Count {
        Default::default()
    }

    pub fn value(&self) -> u64 {
        self.total
    }
}

impl Aggregate for Count {
    fn update(&mut self, data: &str) {
        if !data.is_empty() {
            self.total += 1;
        }
    }

    fn reset(&mut self) {
        self.total = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::{Aggregate, Count};

    #[test]
    fn test_count() {
        let mut count = Count::new();

        count.update("3.0");
        count.update("");
        count.update("x");

        assert_eq!(count.value(), 2);

        count.reset();

        assert_eq!(count.value(), 0);
    }
}
