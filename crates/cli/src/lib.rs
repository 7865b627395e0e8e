use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use codeunit_batch::{BatchConfig, BatchDriver, FileOutcome};
use codeunit_segmenter::Segmenter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "codeunit")]
#[command(
    about = "Split JavaScript/TypeScript sources into line-addressable code units",
    long_about = "With one path, segments that file and prints its units as JSON.\n\
                  With two paths, segments every source file under INPUT and writes\n\
                  one JSON file per source into OUTPUT, mirroring the directory layout."
)]
#[command(version)]
pub struct Cli {
    /// Source file (single-file mode) or input directory (batch mode)
    pub input: PathBuf,

    /// Output directory; switches to batch mode
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    pub quiet: bool,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads for batch mode
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Log every top-level node that produced no unit
    #[arg(long)]
    pub report_dropped: bool,

    /// Segment files with syntax errors instead of failing them
    #[arg(long)]
    pub lenient: bool,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Print batch statistics when done
    #[arg(long)]
    pub summary: bool,
}

/// Parse arguments and run the requested mode
pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = load_config(&cli)?;
    match &cli.output {
        None => run_single(&cli, config),
        Some(output) => run_batch(&cli, output, config),
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Config file (if any) with command-line overrides applied
pub fn load_config(cli: &Cli) -> Result<BatchConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => BatchConfig::default(),
    };

    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
    }
    if cli.report_dropped {
        config.segmenter.report_dropped = true;
    }
    if cli.lenient {
        config.segmenter.strict_parse = false;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<BatchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn run_single(cli: &Cli, config: BatchConfig) -> Result<()> {
    let path = cli
        .input
        .canonicalize()
        .with_context(|| format!("Invalid source path: {}", cli.input.display()))?;
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", cli.input.display());
    }

    let segmenter = Segmenter::new(config.segmenter)?;
    let segmentation = segmenter.segment_file(&path)?;
    log::debug!("{}: {}", path.display(), segmentation.stats);

    let json = if cli.compact {
        serde_json::to_string(&segmentation.units)?
    } else {
        serde_json::to_string_pretty(&segmentation.units)?
    };
    print_stdout(&json)
}

fn run_batch(cli: &Cli, output: &Path, config: BatchConfig) -> Result<()> {
    let driver = BatchDriver::new(&cli.input, output, config)?;

    let report = driver
        .run(|outcome| match outcome {
            FileOutcome::Written { .. } => println!("{outcome}"),
            FileOutcome::Empty { source } => log::debug!("No units in {}", source.display()),
            FileOutcome::Failed { .. } => eprintln!("{outcome}"),
        })
        .with_context(|| format!("Batch run failed for {}", cli.input.display()))?;

    println!("Segmentation complete for directory: {}", cli.input.display());
    if cli.summary {
        println!("{report}");
    }
    Ok(())
}
