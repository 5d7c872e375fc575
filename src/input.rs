use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::iter::FromIterator;
use std::mem;
use std::path::Path;

use encoding::all::ISO_8859_1;
use encoding::{DecoderTrap, EncodingRef};

use crate::error::{Error, Result};
use crate::field;

/// Conventional name standing for the standard input.
pub const STDIN: &str = "-";

/// One input file read line by line. Lines are decoded with the given
/// encoding and handed out without their line break.
pub struct ReaderSource {
    reader: Box<dyn BufRead>,
    path: String,
    encoding: EncodingRef,
    peeked: Option<String>,
    lineno: u64,
    raw: Vec<u8>,
}

impl ReaderSource {
    pub fn from_reader<R, P>(reader: R, path: P, encoding: EncodingRef) -> ReaderSource
    where
        R: BufRead + 'static,
        P: AsRef<Path>,
    {
        ReaderSource {
            reader: Box::new(reader),
            path: path.as_ref().to_string_lossy().to_string(),
            encoding,
            peeked: None,
            lineno: 0,
            raw: Vec::new(),
        }
    }

    /// Opens `path`, or the standard input if `path` is `-`.
    pub fn from_path<P: AsRef<Path>>(path: P, encoding: EncodingRef) -> Result<ReaderSource> {
        let path = path.as_ref();

        if path == Path::new(STDIN) {
            return Ok(ReaderSource::from_reader(
                BufReader::new(io::stdin()),
                path,
                encoding,
            ));
        }

        let file = File::open(path).map_err(|source| Error::Open {
            path: path.display().to_string(),
            source,
        })?;

        Ok(ReaderSource::from_reader(BufReader::new(file), path, encoding))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of the last line handed out by `next_line`, starting at 1.
    pub fn lineno(&self) -> u64 {
        self.lineno
    }

    /// Looks at the next line without consuming it.
    pub fn peek_line(&mut self) -> Result<Option<&str>> {
        if self.peeked.is_none() {
            let mut line = String::new();

            if self.read_line(&mut line)? {
                self.peeked = Some(line);
            }
        }

        Ok(self.peeked.as_deref())
    }

    /// Replaces the contents of `line` with the next line. Returns `false`
    /// once the source is exhausted.
    pub fn next_line(&mut self, line: &mut String) -> Result<bool> {
        let found = match self.peeked.take() {
            Some(mut peeked) => {
                mem::swap(line, &mut peeked);
                true
            }
            None => self.read_line(line)?,
        };

        if found {
            self.lineno += 1;
        }

        Ok(found)
    }

    fn read_line(&mut self, line: &mut String) -> Result<bool> {
        self.raw.clear();
        line.clear();

        if self.reader.read_until(b'\n', &mut self.raw)? == 0 {
            return Ok(false);
        }

        self.encoding
            .decode_to(&self.raw, DecoderTrap::Replace, line)
            .map_err(|e| Error::Encoding(e.into_owned()))?;

        let len = field::chomp(line).len();
        line.truncate(len);

        Ok(true)
    }
}

enum Pending {
    Path(String),
    Ready(ReaderSource),
}

/// The ordered list of inputs of a run. Files are opened one at a time, when
/// the previous one is exhausted.
pub struct InputStream {
    pending: VecDeque<Pending>,
    encoding: EncodingRef,
}

impl InputStream {
    /// Reads the given paths in order; no paths at all means the standard
    /// input.
    pub fn from_paths<I, S>(paths: I, encoding: EncodingRef) -> InputStream
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pending: VecDeque<Pending> = paths
            .into_iter()
            .map(|p| Pending::Path(p.as_ref().to_string()))
            .collect();

        if pending.is_empty() {
            pending.push_back(Pending::Path(STDIN.to_string()));
        }

        InputStream { pending, encoding }
    }

    pub fn encoding(&self) -> EncodingRef {
        self.encoding
    }

    /// Number of inputs not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Opens the next input. Failing to open it is an error, not a reason to
    /// skip it.
    pub fn next_source(&mut self) -> Result<Option<ReaderSource>> {
        match self.pending.pop_front() {
            Some(Pending::Path(path)) => ReaderSource::from_path(path, self.encoding).map(Some),
            Some(Pending::Ready(source)) => Ok(Some(source)),
            None => Ok(None),
        }
    }
}

impl FromIterator<ReaderSource> for InputStream {
    fn from_iter<I: IntoIterator<Item = ReaderSource>>(iter: I) -> Self {
        InputStream {
            pending: iter.into_iter().map(Pending::Ready).collect(),
            encoding: ISO_8859_1,
        }
    }
}
