use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use encoding::all::ISO_8859_1;
use encoding::{EncoderTrap, EncodingRef};

use crate::conf::AggConf;
use crate::error::{Error, Result};
use crate::field;
use crate::fieldspec::Role;
use crate::reduce::group::Group;

/// How the aggregate columns of the output header are labelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderLabels<'a> {
    /// Repeat the input header's labels of the aggregated columns
    Original,

    /// Input labels followed by `-Sum`, `-Count` or `-Join`
    Auto,

    /// One caller supplied string standing for every aggregate column
    Custom(&'a str),
}

/// Writes output records: the group key followed by the sums, the counts and
/// the joins, in that order, separated by the delimiter.
pub struct LineEmitter<W: Write> {
    out: BufWriter<W>,
    delim: String,
    encoding: EncodingRef,
    line: String,
    scratch: String,
}

impl<W: Write> LineEmitter<W> {
    pub fn new(out: W, delim: &str) -> LineEmitter<W> {
        LineEmitter::with_encoding(out, delim, ISO_8859_1)
    }

    pub fn with_encoding(out: W, delim: &str, encoding: EncodingRef) -> LineEmitter<W> {
        LineEmitter {
            out: BufWriter::new(out),
            delim: delim.to_string(),
            encoding,
            line: String::new(),
            scratch: String::new(),
        }
    }

    /// Writes one finished group. Every sum is printed with exactly the
    /// number of decimals of its entry in `precisions`.
    pub fn write_group(&mut self, keys: &str, group: &Group, precisions: &[usize]) -> Result<()> {
        use std::fmt::Write as _;

        self.line.clear();
        self.line.push_str(keys);

        for (sum, &precision) in group.sums().iter().zip(precisions) {
            let _ = write!(self.line, "{}{:.*}", self.delim, precision, sum.value());
        }

        for count in group.counts() {
            let _ = write!(self.line, "{}{}", self.delim, count.value());
        }

        for join in group.joins() {
            self.line.push_str(&self.delim);
            self.line.push_str(join.value());
        }

        self.line.push('\n');
        self.write_pending()
    }

    /// Writes the output header built from the input header line `header`:
    /// the labels of the key columns followed by the labels of the aggregate
    /// columns.
    pub fn write_header(&mut self, header: &str, conf: &AggConf, labels: HeaderLabels<'_>) -> Result<()> {
        let header = field::chomp(header);

        self.line.clear();
        self.append_labels(header, conf, Role::Key, None)?;

        match labels {
            HeaderLabels::Custom(custom) => {
                self.line.push_str(&self.delim);
                self.line.push_str(custom);
            }
            HeaderLabels::Original | HeaderLabels::Auto => {
                for &role in &[Role::Sum, Role::Count, Role::Join] {
                    if conf.fields(role).is_empty() {
                        continue;
                    }

                    let suffix = match labels {
                        HeaderLabels::Auto => Some(role.label_suffix()),
                        _ => None,
                    };

                    self.line.push_str(&self.delim);
                    self.append_labels(header, conf, role, suffix)?;
                }
            }
        }

        self.line.push('\n');
        self.write_pending()
    }

    fn append_labels(&mut self, header: &str, conf: &AggConf, role: Role, suffix: Option<&str>) -> Result<()> {
        field::join_fields(&mut self.scratch, header, conf.fields(role), &self.delim, suffix)
            .map_err(|_| Error::Malformed { role, line: 1 })?;

        self.line.push_str(&self.scratch);

        Ok(())
    }

    fn write_pending(&mut self) -> Result<()> {
        let bytes = self
            .encoding
            .encode(&self.line, EncoderTrap::Replace)
            .map_err(|e| Error::Encoding(e.into_owned()))?;

        self.out.write_all(&bytes)?;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.out.flush()?)
    }

    /// Flushes and gives back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

/// Opens the destination of the output, standard output when no path is
/// given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::Open {
                path: path.display().to_string(),
                source,
            })?;

            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
