//! Drives an aggregation run over every input, in order.
use std::io::Write;

use log::{debug, info, warn};

use crate::conf::AggConf;
use crate::emit::{HeaderLabels, LineEmitter};
use crate::error::{Error, Result};
use crate::headers::Headers;
use crate::input::{InputStream, ReaderSource};
use crate::options::Options;
use crate::reduce::Accumulator;

/// What a finished run went through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub files: usize,
    pub lines: u64,
    pub groups: u64,
}

/// Aggregates key-sorted delimited text. Build one from validated
/// [Options], `start` it on the inputs, then `run` the returned session into
/// an output.
pub struct Aggregator {
    options: Options,
}

impl Aggregator {
    pub fn new(options: Options) -> Result<Aggregator> {
        options.validate()?;

        Ok(Aggregator { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Opens the first input and resolves the field specs against it. Nothing
    /// is written yet, so configuration problems show up before an output is
    /// created.
    pub fn start(&self, mut input: InputStream) -> Result<Session<'_>> {
        let mut source = input.next_source()?;

        let headers = match source.as_mut() {
            Some(source) if self.options.specs.uses_labels() => self.peek_headers(source)?,
            _ => None,
        };

        let conf = AggConf::configure(&self.options.specs, headers.as_ref())?;

        Ok(Session {
            options: &self.options,
            input,
            files: if source.is_some() { 1 } else { 0 },
            source,
            conf,
        })
    }

    fn peek_headers(&self, source: &mut ReaderSource) -> Result<Option<Headers>> {
        Ok(source
            .peek_line()?
            .map(|line| Headers::from_line(line, &self.options.delimiter)))
    }
}

/// An aggregation run whose first input is already open.
pub struct Session<'a> {
    options: &'a Options,
    input: InputStream,
    source: Option<ReaderSource>,
    conf: AggConf,
    files: usize,
}

impl<'a> Session<'a> {
    pub fn conf(&self) -> &AggConf {
        &self.conf
    }

    /// Streams every input into `out`. Whatever was written before an error
    /// is flushed; the group in progress at that point is not.
    pub fn run<W: Write>(mut self, out: W) -> Result<Stats> {
        let mut emitter = LineEmitter::with_encoding(out, &self.options.delimiter, self.options.encoding);

        match self.process(&mut emitter) {
            Ok(stats) => {
                emitter.flush()?;

                info!(
                    "aggregated {} lines from {} files into {} groups",
                    stats.lines, stats.files, stats.groups
                );

                Ok(stats)
            }
            Err(e) => {
                if let Err(flush_error) = emitter.flush() {
                    warn!("could not flush output: {}", flush_error);
                }

                Err(e)
            }
        }
    }

    fn process<W: Write>(&mut self, out: &mut LineEmitter<W>) -> Result<Stats> {
        let options = self.options;
        let keeps_header = options.keeps_header();
        let mut acc = Accumulator::new(&self.conf, &options.delimiter, &options.join_separator);
        let mut stats = Stats::default();
        let mut line = String::new();

        let mut source = match self.source.take() {
            Some(source) => source,
            None => return Ok(stats),
        };

        if keeps_header {
            if !source.next_line(&mut line)? {
                return Err(Error::UnexpectedEof {
                    path: source.path().to_string(),
                });
            }

            out.write_header(&line, &self.conf, header_labels(options))?;
        }

        loop {
            while source.next_line(&mut line)? {
                stats.lines += 1;
                acc.push(&mut self.conf, &line, source.lineno(), out)?;
            }

            debug!("{}: {} lines read", source.path(), source.lineno());

            source = match self.input.next_source()? {
                Some(next) => next,
                None => break,
            };
            self.files += 1;

            if options.specs.uses_labels() {
                let headers = source
                    .peek_line()?
                    .map(|header| Headers::from_line(header, &options.delimiter));

                self.conf.reconfigure(&options.specs, headers.as_ref())?;

                debug!("{}: fields resolved to {:?}", source.path(), self.conf);
            }

            if keeps_header {
                source.next_line(&mut line)?;
            }
        }

        stats.groups = acc.finish(&self.conf, out)?;
        stats.files = self.files;

        Ok(stats)
    }
}

fn header_labels(options: &Options) -> HeaderLabels<'_> {
    match options.labels {
        Some(ref labels) => HeaderLabels::Custom(labels),
        None if options.auto_label => HeaderLabels::Auto,
        None => HeaderLabels::Original,
    }
}
