use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use patent_grants::config::Config;
use patent_grants::filter::AllowList;
use patent_grants::logging;
use patent_grants::metrics::ExtractionMetrics;
use patent_grants::output;
use patent_grants::{Pipeline, SourceFormat};

#[derive(Parser)]
#[command(name = "patent-grants")]
#[command(about = "Normalize bulk USPTO patent-grant files into canonical JSON records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file (defaults to $PATENT_GRANTS_CONFIG, then ./patent_grants.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one extracted bulk member file and write its records to stdout
    Parse {
        /// Path to the decompressed member (ipg*.xml, pg0*.xml, pftaps*.txt)
        file: PathBuf,
        /// Override the format inferred from the file name: variant-a, variant-b, line-tagged
        #[arg(long)]
        format: Option<SourceFormat>,
        /// Keep only patent numbers listed in this file (one per line)
        #[arg(long)]
        allow_list: Option<PathBuf>,
    },
    /// Print the format each member name resolves to
    Detect {
        names: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let _guard = logging::init_logging(&config.logging).context("initializing logging")?;
    ExtractionMetrics::describe();

    match cli.command {
        Commands::Parse {
            file,
            format,
            allow_list,
        } => run_parse(&config, &file, format, allow_list.as_deref()),
        Commands::Detect { names } => {
            for name in names {
                match SourceFormat::from_member_name(&name) {
                    Ok(format) => println!("{}\t{}", name, format),
                    Err(e) => println!("{}\t{}", name, e),
                }
            }
            Ok(())
        }
    }
}

fn run_parse(
    config: &Config,
    file: &Path,
    format: Option<SourceFormat>,
    allow_list: Option<&Path>,
) -> anyhow::Result<()> {
    let format = match format {
        Some(f) => f,
        None => SourceFormat::from_member_name(&file.to_string_lossy())
            .context("cannot infer format from file name; pass --format")?,
    };

    let span = tracing::info_span!("Parsing file", file = %file.display(), format = %format);
    let _enter = span.enter();

    // Older bulk files are not guaranteed to be valid UTF-8
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let raw = String::from_utf8_lossy(&bytes);

    let result = Pipeline::run(&raw, format);
    let total = result.records.len();
    let records = match allow_list {
        Some(path) => AllowList::load(path)
            .with_context(|| format!("loading allow-list {}", path.display()))?
            .retain(result.records),
        None => result.records,
    };

    let stdout = io::stdout();
    output::write_records(BufWriter::new(stdout.lock()), &records, config.output.pretty)
        .context("writing records")?;

    info!(
        "Wrote {} of {} records (chunks={} abandoned={})",
        records.len(),
        total,
        result.total_chunks,
        result.abandoned
    );
    Ok(())
}
