use std::fs::File;
use std::io::{self, BufWriter, Read, Write, stdin};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use readtable::{ErrorCode, FieldSpec, LineReader, Options, parse_field_specs};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DelimArg {
    /// Runs of spaces and tabs
    Blank,
    Tab,
    Comma,
    Semicolon,
    Pipe,
}

impl DelimArg {
    fn byte(self) -> Option<u8> {
        match self {
            DelimArg::Blank => None,
            DelimArg::Tab => Some(b'\t'),
            DelimArg::Comma => Some(b','),
            DelimArg::Semicolon => Some(b';'),
            DelimArg::Pipe => Some(b'|'),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "readtable-cli",
    about = "Check every record of a delimited text file against a field list",
    version
)]
struct Args {
    /// Field list, e.g. `u32[1,100],f64,skip,str`
    #[arg(short, long)]
    fields: String,

    /// Field separator
    #[arg(short, long, value_enum, default_value_t = DelimArg::Blank)]
    delimiter: DelimArg,

    /// Comment marker; the rest of a line after it is ignored
    #[arg(short, long, value_parser = parse_marker)]
    comment: Option<u8>,

    /// Integer base: 0 (auto-detect 0x / 0 prefixes) or 2..=36
    #[arg(long, default_value_t = 10)]
    base: u32,

    /// Report NaN and infinities as errors
    #[arg(long, default_value_t = false)]
    reject_nonfinite: bool,

    /// Treat blank and comment-only lines as records
    #[arg(long, default_value_t = false)]
    keep_blank: bool,

    /// Print each good record as a JSON array
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn parse_marker(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() && *b != b'\n' => Ok(*b),
        _ => Err(format!("expected a single ASCII character, got `{s}`")),
    }
}

#[derive(Debug, Default)]
struct Summary {
    good: u64,
    bad: u64,
}

fn check<R: Read>(reader: &mut LineReader<R>, specs: &[FieldSpec], args: &Args) -> Result<Summary> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stderr = io::stderr();
    let mut summary = Summary::default();
    let mut values = Vec::with_capacity(specs.len());

    while reader.read_line(!args.keep_blank).is_ok() {
        if reader.read_record(specs, &mut values).is_err() {
            summary.bad += 1;
            out.flush()?;
            reader.write_error(stderr.lock())?;
            continue;
        }
        summary.good += 1;
        if args.json {
            serde_json::to_writer(&mut out, &values)?;
            writeln!(out)?;
        } else {
            let mut first = true;
            for value in &values {
                if !first {
                    out.write_all(b"\t")?;
                }
                write!(out, "{value}")?;
                first = false;
            }
            writeln!(out)?;
        }
    }
    out.flush()?;

    if reader.last_error() != ErrorCode::EndOfInput {
        reader.write_error(stderr.lock())?;
        bail!("{}", reader.last_error());
    }
    Ok(summary)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let specs = parse_field_specs(&args.fields)?;
    debug!(fields = specs.len(), "parsed field list");

    let options = Options {
        delimiter: args.delimiter.byte(),
        comment: args.comment,
        base: args.base,
        allow_nonfinite: !args.reject_nonfinite,
    };

    let summary = match &args.input {
        Some(path) => {
            let mut reader: LineReader<File> = LineReader::open(path, options);
            check(&mut reader, &specs, &args)?
        }
        None => {
            let mut reader = LineReader::new(stdin().lock(), options);
            check(&mut reader, &specs, &args)?
        }
    };

    info!(good = summary.good, bad = summary.bad, "finished");
    if summary.bad > 0 {
        bail!("{} of {} records failed", summary.bad, summary.good + summary.bad);
    }
    Ok(())
}
