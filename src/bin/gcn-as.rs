use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use gcn_asm::listing::{fmt_assembled, records, to_binary};
use gcn_asm::{AsmConfig, Assembler, IsaTables};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble AMD GCN scalar instructions, one per line")]
struct Opts {
    /// Input assembly file (one instruction per line, `;` starts a comment)
    #[arg(value_name = "ASMFILE", required_unless_present = "dump_tables")]
    input: Option<PathBuf>,
    /// JSON instruction/operand tables replacing the built-in GCN set
    #[arg(long, value_name = "FILE")]
    tables: Option<PathBuf>,
    /// Listing format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the listing to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Also write the encoded words as a little-endian binary
    #[arg(long, value_name = "FILE")]
    bin: Option<PathBuf>,
    /// Abort at the first malformed instruction
    #[arg(long)]
    stop_on_error: bool,
    /// Ignore extra operand fields instead of rejecting them
    #[arg(long)]
    lenient: bool,
    /// Print the active tables as JSON and exit
    #[arg(long)]
    dump_tables: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let tables = match &opts.tables {
        Some(path) => IsaTables::load(path)?,
        None => IsaTables::default(),
    };
    if opts.dump_tables {
        println!("{}", tables.to_json()?);
        return Ok(());
    }

    let cfg = AsmConfig {
        stop_on_error: opts.stop_on_error,
        strict_operands: !opts.lenient,
    };
    let asm = Assembler::new(tables, cfg);

    let Some(input) = opts.input.as_ref() else { return Ok(()) };
    let text = std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let reports = asm.assemble_source(&text);

    let mut listing = String::new();
    match opts.format {
        OutputFormat::Text => {
            for r in &reports {
                if let Ok(a) = &r.result {
                    listing.push_str(&fmt_assembled(a));
                    listing.push('\n');
                }
            }
        }
        OutputFormat::Json => {
            listing = serde_json::to_string_pretty(&records(&reports))?;
            listing.push('\n');
        }
    }
    match &opts.out {
        Some(path) => std::fs::write(path, &listing).with_context(|| format!("writing {}", path.display()))?,
        None => std::io::stdout().write_all(listing.as_bytes())?,
    }
    if let Some(path) = &opts.bin {
        std::fs::write(path, to_binary(&reports)).with_context(|| format!("writing {}", path.display()))?;
    }

    let mut failed = 0usize;
    for r in &reports {
        if let Err(e) = &r.result {
            eprintln!("{}:{}: error: {e}", input.display(), r.line);
            failed += 1;
        }
    }
    if failed > 0 {
        eprintln!("{failed} line(s) failed");
        std::process::exit(1);
    }
    Ok(())
}
