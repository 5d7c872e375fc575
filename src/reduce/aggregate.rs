use std::fmt::Debug;

mod count;
mod join;
mod sum;

pub use count::Count;
pub use join::Join;
pub use sum::{parse_prefix, Sum};

/// A running computation over the text of one column across the records of a
/// group.
pub trait Aggregate: Debug {
    /// Feeds the text of the column for one more record.
    fn update(&mut self, data: &str);

    /// Forgets every record seen, leaving the aggregate as newly built.
    fn reset(&mut self);
}
