use super::aggregate::{Aggregate, Count, Join, Sum};
use crate::conf::AggConf;
use crate::field;
use crate::fieldspec::Role;

/// The aggregates of the group being accumulated, one per configured sum,
/// count and join column.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    sums: Vec<Sum>,
    counts: Vec<Count>,
    joins: Vec<Join>,
}

impl Group {
    pub fn new(conf: &AggConf, join_separator: &str) -> Group {
        Group {
            sums: conf.sums.iter().map(|_| Sum::new()).collect(),
            counts: conf.counts.iter().map(|_| Count::new()).collect(),
            joins: conf.joins.iter().map(|_| Join::new(join_separator)).collect(),
        }
    }

    /// Feeds one record to every aggregate, also widening the precision of
    /// the sum columns. Fails with the role of the first column the record
    /// lacks.
    pub fn update(&mut self, conf: &mut AggConf, line: &str, delim: &str) -> Result<(), Role> {
        for (count, &index) in self.counts.iter_mut().zip(conf.counts.iter()) {
            count.update(field::extract(line, index, delim).ok_or(Role::Count)?);
        }

        for i in 0..self.sums.len() {
            let data = field::extract(line, conf.sums[i], delim).ok_or(Role::Sum)?;

            self.sums[i].update(data);
            conf.observe_precision(i, data);
        }

        for (join, &index) in self.joins.iter_mut().zip(conf.joins.iter()) {
            join.update(field::extract(line, index, delim).ok_or(Role::Join)?);
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        self.sums.iter_mut().for_each(Aggregate::reset);
        self.counts.iter_mut().for_each(Aggregate::reset);
        self.joins.iter_mut().for_each(Aggregate::reset);
    }

    pub fn sums(&self) -> &[Sum] {
        &self.sums
    }

    pub fn counts(&self) -> &[Count] {
        &self.counts
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }
}
