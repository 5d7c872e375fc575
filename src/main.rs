use std::path::Path;
use std::process;

use clap::{App, Arg, ArgMatches};
use encoding::label::encoding_from_whatwg_label;
use log::warn;

use flatagg::{
    open_output, Aggregator, Error, ExitStatus, FieldSpec, FieldSpecs, InputStream, Options,
};

fn spec(matches: &ArgMatches, positions: &str, labels: &str) -> Option<FieldSpec> {
    matches
        .value_of(positions)
        .map(|s| FieldSpec::Positions(s.to_string()))
        .or_else(|| matches.value_of(labels).map(|s| FieldSpec::Labels(s.to_string())))
}

fn field_arg<'a>(name: &'a str, short: &'a str, help: &'a str, conflicts: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .short(short)
        .long(name)
        .value_name("FIELDS")
        .help(help)
        .takes_value(true)
        .conflicts_with(conflicts)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let specs = FieldSpecs {
        keys: spec(matches, "keys", "key-labels"),
        sums: spec(matches, "sums", "sum-labels"),
        counts: spec(matches, "counts", "count-labels"),
        joins: spec(matches, "joins", "join-labels"),
    };

    let mut options = Options::new(specs)
        .preserve_header(matches.is_present("preserve-header"))
        .auto_label(matches.is_present("auto-label"));

    if let Some(delimiter) = matches.value_of("delimiter") {
        options = options.delimiter(delimiter);
    }

    if let Some(separator) = matches.value_of("join-separator") {
        options = options.join_separator(separator);
    }

    if let Some(labels) = matches.value_of("labels") {
        options = options.labels(labels);
    }

    if let Some(label) = matches.value_of("encoding") {
        match encoding_from_whatwg_label(label) {
            Some(encoding) => options = options.encoding(encoding),
            None => {
                eprintln!("unknown encoding: {}", label);
                process::exit(ExitStatus::Help.code());
            }
        }
    }

    let inputs: Vec<&str> = matches.values_of("input").map(|v| v.collect()).unwrap_or_default();
    let input = InputStream::from_paths(inputs, options.encoding);

    let aggregator = Aggregator::new(options)?;
    let session = aggregator.start(input)?;
    let out = open_output(matches.value_of("output").map(Path::new))?;

    session.run(out)?;

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("flatagg")
        .version("0.1")
        .author("Abraham Toriz <categulario@gmail.com>")
        .about("Aggregates runs of key-sorted delimited records into sums, counts and joins")
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .help("Input files, '-' for standard input")
                .multiple(true),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("OUTPUT")
                .help("Output filename, standard output if not given")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("delimiter")
                .short("d")
                .long("delimiter")
                .value_name("DELIM")
                .help("Field delimiter, defaults to $DELIMITER or 0xfe")
                .takes_value(true),
        )
        .arg(field_arg("keys", "k", "1-based positions of the key fields", "key-labels"))
        .arg(field_arg("key-labels", "K", "Labels of the key fields", "keys"))
        .arg(field_arg("sums", "s", "1-based positions of the fields to sum", "sum-labels"))
        .arg(field_arg("sum-labels", "S", "Labels of the fields to sum", "sums"))
        .arg(field_arg("counts", "c", "1-based positions of the fields to count", "count-labels"))
        .arg(field_arg("count-labels", "C", "Labels of the fields to count", "counts"))
        .arg(field_arg("joins", "j", "1-based positions of the fields to join", "join-labels"))
        .arg(field_arg("join-labels", "J", "Labels of the fields to join", "joins"))
        .arg(
            Arg::with_name("preserve-header")
                .short("p")
                .long("preserve-header")
                .help("Echo the header line of the input"),
        )
        .arg(
            Arg::with_name("labels")
                .short("l")
                .long("labels")
                .value_name("LABELS")
                .help("Labels of the aggregate columns in the output header")
                .takes_value(true)
                .conflicts_with("auto-label"),
        )
        .arg(
            Arg::with_name("auto-label")
                .short("A")
                .long("auto-label")
                .help("Label aggregate columns as <label>-Sum, <label>-Count and <label>-Join"),
        )
        .arg(
            Arg::with_name("join-separator")
                .long("join-separator")
                .value_name("SEP")
                .help("String placed between joined values, ',' by default")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("encoding")
                .long("encoding")
                .value_name("LABEL")
                .help("Text encoding of input and output, iso-8859-1 by default")
                .takes_value(true),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        warn!("aggregation stopped: {:?}", e);
        eprintln!("flatagg: {}", e);
        process::exit(e.status().code());
    }
}
