use crate::error::{Error, Result};
use crate::fieldspec::{FieldSpecs, Role};
use crate::headers::Headers;

/// Resolved column indexes of every role plus the decimal precision observed
/// so far for each sum column.
///
/// Indexes are rebuilt for every input file, precisions live for the whole
/// run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggConf {
    pub keys: Vec<usize>,
    pub sums: Vec<usize>,
    pub counts: Vec<usize>,
    pub joins: Vec<usize>,
    precisions: Vec<usize>,
}

impl AggConf {
    pub fn configure(specs: &FieldSpecs, headers: Option<&Headers>) -> Result<AggConf> {
        let mut conf = AggConf::default();

        conf.reconfigure(specs, headers)?;

        Ok(conf)
    }

    /// Resolves the specs again, possibly against a different header. Sum
    /// precisions already observed are kept.
    ///
    /// Lists that resolve to no columns at all (`,` or `4-2`) count as
    /// missing.
    pub fn reconfigure(&mut self, specs: &FieldSpecs, headers: Option<&Headers>) -> Result<()> {
        self.keys = specs.resolve(Role::Key, headers)?;
        self.sums = specs.resolve(Role::Sum, headers)?;
        self.counts = specs.resolve(Role::Count, headers)?;
        self.joins = specs.resolve(Role::Join, headers)?;

        if self.keys.is_empty() {
            return Err(Error::MissingKeys);
        }

        if self.sums.is_empty() && self.counts.is_empty() && self.joins.is_empty() {
            return Err(Error::MissingAggregates);
        }

        self.precisions.resize(self.sums.len(), 0);

        Ok(())
    }

    pub fn fields(&self, role: Role) -> &[usize] {
        match role {
            Role::Key => &self.keys,
            Role::Sum => &self.sums,
            Role::Count => &self.counts,
            Role::Join => &self.joins,
        }
    }

    pub fn precisions(&self) -> &[usize] {
        &self.precisions
    }

    /// Raises the precision of the `i`-th sum column to that of `text` if it is
    /// larger.
    pub fn observe_precision(&mut self, i: usize, text: &str) {
        let precision = float_precision(text);

        if precision > self.precisions[i] {
            self.precisions[i] = precision;
        }
    }
}

/// Number of characters after the first decimal point of `text`.
pub fn float_precision(text: &str) -> usize {
    match text.find('.') {
        Some(dot) => text[dot + 1..].chars().count(),
        None => 0,
    }
}
