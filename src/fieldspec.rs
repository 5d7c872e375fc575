//! Turns user supplied field lists into 0-based column indexes.
//!
//! A list is given either by position (`2,5-7,9`, 1-based) or by column label
//! (`name,qty`), the latter resolved against the header line of the input
//! being read.
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::headers::Headers;

/// The four independent things a column can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Key,
    Sum,
    Count,
    Join,
}

impl Role {
    /// Suffix added to the header label of this role's columns when labels are
    /// generated.
    pub fn label_suffix(self) -> &'static str {
        match self {
            Role::Key => "",
            Role::Sum => "-Sum",
            Role::Count => "-Count",
            Role::Join => "-Join",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Role::Key => write!(f, "key fields (-k/-K)"),
            Role::Sum => write!(f, "sum fields (-s/-S)"),
            Role::Count => write!(f, "count fields (-c/-C)"),
            Role::Join => write!(f, "join fields (-j/-J)"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SpecError {
    #[error("invalid field list {0:?}")]
    Syntax(String),

    #[error("label not found in header: {0:?}")]
    LabelNotFound(String),
}

/// How the user named the columns of one role.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Comma separated 1-based positions and inclusive ranges
    Positions(String),

    /// Comma separated header labels
    Labels(String),
}

impl FieldSpec {
    pub fn is_labels(&self) -> bool {
        matches!(self, FieldSpec::Labels(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldSpec::Positions(s) | FieldSpec::Labels(s) => s.is_empty(),
        }
    }

    /// Resolves this spec into 0-based indexes. `headers` is only looked at
    /// for label lists; a missing header leaves every label unresolved.
    pub fn resolve(&self, headers: Option<&Headers>) -> std::result::Result<Vec<usize>, SpecError> {
        let positions = match self {
            FieldSpec::Positions(list) => expand_positions(list)?,
            FieldSpec::Labels(list) => match headers {
                Some(headers) => expand_labels(list, headers)?,
                None => {
                    let first = list.split(',').next().unwrap_or_default();

                    return Err(SpecError::LabelNotFound(first.to_string()));
                }
            },
        };

        Ok(positions.into_iter().map(|p| p - 1).collect())
    }
}

/// Highest position a field list may name.
pub const MAX_POSITION: usize = 65_535;

fn position_item() -> Option<&'static Regex> {
    static ITEM: OnceLock<Option<Regex>> = OnceLock::new();

    ITEM.get_or_init(|| Regex::new(r"^(\d+)(?:-(\d+))?$").ok()).as_ref()
}

/// Expands a list like `2,5-7,9` into `[2, 5, 6, 7, 9]`. Positions are
/// 1-based and at most [MAX_POSITION]; empty items are skipped and a
/// decreasing range expands to nothing.
pub fn expand_positions(list: &str) -> std::result::Result<Vec<usize>, SpecError> {
    let syntax = || SpecError::Syntax(list.to_string());
    let item = position_item().ok_or_else(syntax)?;
    let mut positions = Vec::new();

    for token in list.split(',').filter(|t| !t.is_empty()) {
        let captures = item.captures(token).ok_or_else(syntax)?;
        let first: usize = captures[1].parse().map_err(|_| syntax())?;
        let last: usize = match captures.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| syntax())?,
            None => first,
        };

        if first == 0 || last == 0 || first > MAX_POSITION || last > MAX_POSITION {
            return Err(syntax());
        }

        positions.extend(first..=last);
    }

    Ok(positions)
}

/// Finds each comma separated label of `labels` in `headers`, returning their
/// 1-based positions in the order the labels were given.
pub fn expand_labels(labels: &str, headers: &Headers) -> std::result::Result<Vec<usize>, SpecError> {
    crate::field::chomp(labels)
        .split(',')
        .map(|label| {
            headers
                .get(label)
                .map(|index| index + 1)
                .ok_or_else(|| SpecError::LabelNotFound(label.to_string()))
        })
        .collect()
}

/// The field specs of all four roles for one aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpecs {
    pub keys: Option<FieldSpec>,
    pub sums: Option<FieldSpec>,
    pub counts: Option<FieldSpec>,
    pub joins: Option<FieldSpec>,
}

impl FieldSpecs {
    pub fn new(keys: FieldSpec) -> FieldSpecs {
        FieldSpecs {
            keys: Some(keys),
            sums: None,
            counts: None,
            joins: None,
        }
    }

    pub fn sums(mut self, spec: FieldSpec) -> FieldSpecs {
        self.sums = Some(spec);
        self
    }

    pub fn counts(mut self, spec: FieldSpec) -> FieldSpecs {
        self.counts = Some(spec);
        self
    }

    pub fn joins(mut self, spec: FieldSpec) -> FieldSpecs {
        self.joins = Some(spec);
        self
    }

    pub fn get(&self, role: Role) -> Option<&FieldSpec> {
        match role {
            Role::Key => self.keys.as_ref(),
            Role::Sum => self.sums.as_ref(),
            Role::Count => self.counts.as_ref(),
            Role::Join => self.joins.as_ref(),
        }
    }

    /// Whether any role is given by label, which ties resolution to the
    /// header of every input file.
    pub fn uses_labels(&self) -> bool {
        [Role::Key, Role::Sum, Role::Count, Role::Join]
            .iter()
            .filter_map(|&role| self.get(role))
            .any(FieldSpec::is_labels)
    }

    /// Checks that there is something to group by and something to compute.
    pub fn validate(&self) -> Result<()> {
        let given = |spec: Option<&FieldSpec>| spec.map_or(false, |s| !s.is_empty());

        if !given(self.get(Role::Key)) {
            return Err(Error::MissingKeys);
        }

        if !(given(self.get(Role::Sum)) || given(self.get(Role::Count)) || given(self.get(Role::Join))) {
            return Err(Error::MissingAggregates);
        }

        Ok(())
    }

    /// Resolves one role, an absent spec meaning no columns.
    pub fn resolve(&self, role: Role, headers: Option<&Headers>) -> Result<Vec<usize>> {
        match self.get(role) {
            Some(spec) => spec
                .resolve(headers)
                .map_err(|source| Error::Spec { role, source }),
            None => Ok(Vec::new()),
        }
    }
}
