use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dotenvy::dotenv;
use itch_decode::messages::DEFAULT_BUFFER_SIZE;
use itch_decode::record::{FileHeader, export_table};
use itch_decode::{DecodeOptions, Family, count_messages, get_messages};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Decode NASDAQ ITCH 5.0 files into column tables")]
struct Args {
    /// Plain (already decompressed) ITCH 5.0 file
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Message family to decode
    #[arg(long, short = 'f', value_enum, default_value_t = Family::Orders)]
    family: Family,

    /// First message (family-relative, zero-based) to decode
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last message to decode, inclusive; 0 decodes through end of file
    #[arg(long, default_value_t = 0)]
    end: u64,

    /// Scanner buffer size in bytes
    #[arg(long, env = "ITCH_BUFFER_SIZE", default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Only print per-type message counts
    #[arg(long, default_value_t = false)]
    count: bool,

    /// Write the decoded table to this file (CRC-framed)
    #[arg(long, env = "ITCH_OUT_FILE")]
    out: Option<PathBuf>,

    /// Number of rows to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// No progress messages
    #[arg(long, short = 'q', default_value_t = false)]
    quiet: bool,

    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();

    if args.count {
        let counts = count_messages(&args.input, args.buffer_size)
            .with_context(|| format!("count messages in {:?}", args.input))?;
        for (t, n) in counts.iter() {
            println!("{} {:>12}", t as char, n);
        }
        println!("total {:>10}", counts.total());
        return Ok(());
    }

    let opts = DecodeOptions::default()
        .range(args.start, args.end)
        .buffer_size(args.buffer_size)
        .quiet(args.quiet);
    let table = get_messages(args.family, &args.input, &opts)
        .with_context(|| format!("decode {} from {:?}", args.family.name(), args.input))?;

    println!("{}", table.names().join(" "));
    for i in 0..table.num_rows().min(args.top) {
        if let Some(row) = table.row(i) {
            let cells: Vec<String> = row.into_iter().map(|(_, v)| v).collect();
            println!("{}", cells.join(" "));
        }
    }
    eprintln!("{} rows, {} columns", table.num_rows(), table.num_columns());

    if let Some(out) = &args.out {
        let header = FileHeader::new(&args.input, args.family.name(), opts.start, opts.end);
        export_table(out, header, table).with_context(|| format!("write {:?}", out))?;
        eprintln!("wrote {:?}", out);
    }
    Ok(())
}
