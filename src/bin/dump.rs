use anyhow::{Context, Result};
use clap::Parser;
use itch_decode::record::import_table;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Parser)]
#[command(about = "Print a table exported by itch_decode --out")]
struct Args {
    /// Exported table file to read
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Number of rows to print
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Skip this many rows before printing
    #[arg(long, default_value_t = 0)]
    skip: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (header, table) = import_table(&args.input).with_context(|| format!("read {:?}", args.input))?;

    let created = OffsetDateTime::from_unix_timestamp_nanos(header.created_unix_ns as i128)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| header.created_unix_ns.to_string());
    eprintln!(
        "Header: v{} {} from {} range={}..={} created={}",
        header.version, header.family, header.source, header.start, header.end, created
    );
    if !table.is_consistent() {
        eprintln!("warning: columns have different lengths");
    }

    for i in args.skip..table.num_rows().min(args.skip.saturating_add(args.top)) {
        if let Some(row) = table.row(i) {
            let fields: Vec<String> = row.into_iter().map(|(n, v)| format!("{n}={v}")).collect();
            println!("{:>8}: {}", i, fields.join(" "));
        }
    }
    eprintln!("Read {} rows, {} columns.", table.num_rows(), table.num_columns());
    Ok(())
}
