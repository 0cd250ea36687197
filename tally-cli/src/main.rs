use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use tally_core::Transaction;
use tally_ingest::{StatementKind, StatementPeriod, decode, parsers, text};

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Extract transactions from decoded bank statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse every decoded statement in a directory and emit CSV
    ///
    /// The PDF decoder writes one `<statement>.pdf.json` sidecar per
    /// statement: pages of `{x, y, text}` runs. The statement file name
    /// carries the year used to resolve transaction dates.
    Import {
        /// Statement template
        #[arg(long, value_enum)]
        kind: Kind,

        /// Directory of decoded `*.json` statements
        #[arg(long)]
        dir: PathBuf,

        /// CSV output path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Coordinate snap step for jittery decoders (0 disables)
        #[arg(long, default_value_t = text::DEFAULT_SNAP_STEP)]
        quantize: f64,

        /// Log and skip statements that fail instead of aborting the batch
        #[arg(long)]
        keep_going: bool,
    },

    /// Parse one decoded statement and print transactions as JSON
    Parse {
        /// Statement template
        #[arg(long, value_enum)]
        kind: Kind,

        /// Decoded statement file
        file: PathBuf,

        /// Coordinate snap step for jittery decoders (0 disables)
        #[arg(long, default_value_t = text::DEFAULT_SNAP_STEP)]
        quantize: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Debit,
    Credit,
}

impl From<Kind> for StatementKind {
    fn from(kind: Kind) -> StatementKind {
        match kind {
            Kind::Debit => StatementKind::BankAccount,
            Kind::Credit => StatementKind::CreditCard,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Import {
            kind,
            dir,
            out,
            quantize,
            keep_going,
        } => {
            import(kind.into(), &dir, out.as_deref(), quantize, keep_going).await?;
        }

        Command::Parse {
            kind,
            file,
            quantize,
        } => {
            let txns = parse_file(&file, kind.into(), quantize).await?;
            println!("{}", serde_json::to_string_pretty(&txns)?);
        }
    }

    Ok(())
}

async fn parse_file(path: &Path, kind: StatementKind, quantize: f64) -> Result<Vec<Transaction>> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .with_context(|| format!("bad file name: {}", path.display()))?;
    let period = StatementPeriod::from_file_name(name)?;

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;

    let mut pages = decode::load_pages(&json)?;
    text::quantize(&mut pages, quantize);

    parsers::parse_statement(kind, &pages, &period)
}

async fn import(
    kind: StatementKind,
    dir: &Path,
    out: Option<&Path>,
    quantize: f64,
    keep_going: bool,
) -> Result<()> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("read {}", dir.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        bail!("no decoded statements in {}", dir.display());
    }

    let writer: Box<dyn Write> = match out {
        Some(path) => {
            Box::new(File::create(path).with_context(|| format!("create {}", path.display()))?)
        }
        None => Box::new(std::io::stdout()),
    };
    let mut output = csv::Writer::from_writer(writer);
    output.write_record(["date", "amount", "description", "statement"])?;

    let mut failed = 0usize;
    for path in &files {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        eprintln!("load statement {name}");

        let txns = match parse_file(path, kind, quantize).await {
            Ok(txns) => txns,
            Err(err) if keep_going => {
                eprintln!("  failed: {err:#}");
                failed += 1;
                continue;
            }
            Err(err) => return Err(err.context(format!("statement {name}"))),
        };

        eprintln!("  {} transactions", txns.len());
        for t in &txns {
            let date = t
                .date
                .to_naive()
                .with_context(|| format!("impossible date {} in {name}", t.date))?;
            output.write_record([
                date.to_string(),
                t.value.save(),
                t.description.clone(),
                name.clone(),
            ])?;
        }
    }

    output.flush()?;

    if failed > 0 {
        bail!("{failed} of {} statements failed", files.len());
    }
    Ok(())
}
