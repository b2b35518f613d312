use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pdf_cropbox::{LengthPolicy, Offsets, Rewriter};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Trim white margins of a (non image) PDF by shifting every CropBox.
///
/// The rewritten document is written to stdout unless -o is given.
#[derive(Parser, Debug)]
#[command(name = "pdf-cropbox")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source PDF, or "-" for stdin
    file: Option<PathBuf>,

    /// Offsets added to left, bottom, right and top
    #[arg(
        short = 'O',
        long,
        env = "PDF_CROPBOX_OFFSETS",
        value_name = "L,B,R,T",
        default_value_t = Offsets::default(),
        allow_hyphen_values = true
    )]
    offsets: Offsets,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Fail on CropBox values that are not plain integers instead of reading them as 0
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Leave a CropBox untouched when its new form would not fit in the original bytes
    #[arg(long = "preserve-offsets", action = ArgAction::SetTrue)]
    preserve_offsets: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    debug: bool,

    /// Only log errors
    #[arg(short = 'q', long, action = ArgAction::SetTrue)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = if args.debug {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };

    // RUST_LOG wins over the flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn open_input(file: Option<&PathBuf>) -> Result<Box<dyn Read>> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            info!("Reading: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(outfile: &str) -> Result<Box<dyn Write>> {
    if outfile == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }

    let file = File::create(outfile)
        .with_context(|| format!("Failed to create output file {}", outfile))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let policy = if args.preserve_offsets {
        LengthPolicy::KeepOriginal
    } else {
        LengthPolicy::Grow
    };
    let rewriter = Rewriter::new(args.offsets)
        .strict(args.strict)
        .length_policy(policy);

    let mut data = Vec::new();
    open_input(args.file.as_ref())?
        .read_to_end(&mut data)
        .context("Failed to read input")?;

    // Output is opened only after the input is fully read, so -o may name the source
    let (rewritten, report) = rewriter.rewrite(&data).with_context(|| {
        let source = args.file.as_ref().map_or("-".into(), |p| p.display().to_string());
        format!("Failed to rewrite {}", source)
    })?;

    let mut output = open_output(&args.outfile)?;
    output.write_all(&rewritten).context("Failed to write output")?;
    output.flush().context("Failed to write output")?;

    info!(
        matches = report.matches,
        padded = report.padded,
        grown = report.grown,
        kept = report.kept,
        malformed = report.malformed,
        offsets = %args.offsets,
        "CropBox rewrite complete"
    );
    if args.outfile != "-" {
        info!("Output written to: {}", args.outfile);
    }

    Ok(())
}
