//! Control-break aggregation of key-sorted records.
use std::io::Write;
use std::mem;

pub mod aggregate;
pub mod group;

use group::Group;

use crate::conf::AggConf;
use crate::emit::LineEmitter;
use crate::error::{Error, Result};
use crate::field;
use crate::fieldspec::Role;

/// This accumulator assumes that records sharing a key arrive one after the
/// other, aggregating them and writing the group as soon as a different key
/// shows up.
///
/// A key found again later in the data starts a new group; it is not merged
/// with the earlier run.
pub struct Accumulator {
    delim: String,
    current: String,
    previous: String,
    started: bool,
    group: Group,
    groups: u64,
}

impl Accumulator {
    pub fn new(conf: &AggConf, delim: &str, join_separator: &str) -> Accumulator {
        Accumulator {
            delim: delim.to_string(),
            current: String::new(),
            previous: String::new(),
            started: false,
            group: Group::new(conf, join_separator),
            groups: 0,
        }
    }

    /// Adds one data line. If its key differs from the one of the previous
    /// line the previous group is written to `out` first. `lineno` is only
    /// used to report malformed lines.
    pub fn push<W: Write>(
        &mut self,
        conf: &mut AggConf,
        line: &str,
        lineno: u64,
        out: &mut LineEmitter<W>,
    ) -> Result<()> {
        field::join_fields(&mut self.current, line, &conf.keys, &self.delim, None)
            .map_err(|_| Error::Malformed { role: Role::Key, line: lineno })?;

        if self.started && self.current != self.previous {
            out.write_group(&self.previous, &self.group, conf.precisions())?;

            self.groups += 1;
            self.group.reset();
        }

        self.group
            .update(conf, line, &self.delim)
            .map_err(|role| Error::Malformed { role, line: lineno })?;

        mem::swap(&mut self.current, &mut self.previous);
        self.started = true;

        Ok(())
    }

    /// Number of groups written so far.
    pub fn groups(&self) -> u64 {
        self.groups
    }

    /// Writes the last group, if any line was ever pushed, and returns the
    /// total number of groups written.
    pub fn finish<W: Write>(mut self, conf: &AggConf, out: &mut LineEmitter<W>) -> Result<u64> {
        if self.started {
            out.write_group(&self.previous, &self.group, conf.precisions())?;

            self.groups += 1;
        }

        Ok(self.groups)
    }
}

#[cfg(test)]
mod tests {
    use super::Accumulator;
    use crate::{
        conf::AggConf,
        emit::LineEmitter,
        error::Error,
        fieldspec::{FieldSpec, FieldSpecs, Role},
    };

    fn run(specs: &FieldSpecs, lines: &[&str]) -> String {
        let mut conf = AggConf::configure(specs, None).unwrap();
        let mut acc = Accumulator::new(&conf, ",", ";");
        let mut out = LineEmitter::new(Vec::new(), ",");

        for (i, line) in lines.iter().enumerate() {
            acc.push(&mut conf, line, i as u64 + 1, &mut out).unwrap();
        }

        acc.finish(&conf, &mut out).unwrap();

        String::from_utf8(out.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_groups_contiguous_runs() {
        let specs = FieldSpecs::new(FieldSpec::Positions("1".into()))
            .counts(FieldSpec::Positions("2".into()));

        assert_eq!(
            run(&specs, &["a,1", "a,2", "b,3", "a,4"]),
            "a,2\nb,1\na,1\n",
        );
    }

    #[test]
    fn test_compound_key() {
        let specs = FieldSpecs::new(FieldSpec::Positions("1-2".into()))
            .joins(FieldSpec::Positions("3".into()));

        assert_eq!(
            run(&specs, &["x,1,p", "x,1,q", "x,2,r", "y,2,s"]),
            "x,1,p;q\nx,2,r\ny,2,s\n",
        );
    }

    #[test]
    fn test_single_record_group() {
        let specs = FieldSpecs::new(FieldSpec::Positions("1".into()))
            .sums(FieldSpec::Positions("2".into()))
            .counts(FieldSpec::Positions("3".into()))
            .joins(FieldSpec::Positions("3".into()));

        assert_eq!(run(&specs, &["k,4,v"]), "k,4,1,v\n");
        assert_eq!(run(&specs, &["k,4,"]), "k,4,0,\n");
    }

    #[test]
    fn test_nothing_pushed_writes_nothing() {
        let specs = FieldSpecs::new(FieldSpec::Positions("1".into()))
            .counts(FieldSpec::Positions("2".into()));

        assert_eq!(run(&specs, &[]), "");
    }

    #[test]
    fn test_malformed_key() {
        let specs = FieldSpecs::new(FieldSpec::Positions("3".into()))
            .counts(FieldSpec::Positions("1".into()));
        let mut conf = AggConf::configure(&specs, None).unwrap();
        let mut acc = Accumulator::new(&conf, ",", ",");
        let mut out = LineEmitter::new(Vec::new(), ",");

        acc.push(&mut conf, "a,b,c", 1, &mut out).unwrap();

        match acc.push(&mut conf, "a,b", 2, &mut out) {
            Err(Error::Malformed { role: Role::Key, line: 2 }) => {}
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(acc.groups(), 0);
    }
}
