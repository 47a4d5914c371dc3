use clap::{Parser, ValueEnum};
use depsniff_core::{
    build_skeleton, format_output, install_manifest, DependencyScanner, Dialect, OutputFormat,
    ScanConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "depsniff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inventory and classify source dependencies with license lookup")]
#[command(long_about = "Scans a file or directory tree for imported modules and included \
    headers, classifies each reference (standard library, third-party, local, unknown), and \
    cross-references a CSV license table for known packages. Supports Python (.py), Jupyter \
    notebooks (.ipynb), and C/C++ sources (.c, .cpp, .h, .hpp).\n\n\
    Besides the report, the scan derives an install manifest (one package per line) and, when \
    compiled sources are present, a Makefile skeleton.")]
pub struct Args {
    /// File or directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Report)]
    pub format: OutputFormatArg,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// License table CSV (defaults to licenses.csv beside the scan root)
    #[arg(long)]
    pub licenses: Option<PathBuf>,

    /// Only scan a specific dialect
    #[arg(long, value_enum)]
    pub dialect: Option<DialectFilter>,

    /// Additional ignore patterns (gitignore style)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Ignore file path (defaults to .gitignore)
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Include node_modules / .venv in scan
    #[arg(long)]
    pub include_deps: bool,

    /// Also write the install manifest to a file
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Also write the Makefile skeleton to a file
    #[arg(long)]
    pub makefile: Option<PathBuf>,

    /// Show verbose progress
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Report,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Report => OutputFormat::Report,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
pub enum DialectFilter {
    Python,
    Notebook,
    Header,
}

impl From<DialectFilter> for Dialect {
    fn from(arg: DialectFilter) -> Self {
        match arg {
            DialectFilter::Python => Dialect::Python,
            DialectFilter::Notebook => Dialect::Notebook,
            DialectFilter::Header => Dialect::Header,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build config
    let mut config = ScanConfig::new(args.path.clone())
        .with_ignore_patterns(args.ignore.clone())
        .with_include_deps(args.include_deps);

    if let Some(dialect) = args.dialect {
        config = config.with_dialect_filter(vec![dialect.into()]);
    }

    if let Some(ignore_file) = args.ignore_file {
        config = config.with_ignore_file(ignore_file);
    }

    if let Some(licenses) = args.licenses {
        config = config.with_license_table(licenses);
    }

    // Show progress if verbose
    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning...");
        Some(pb)
    } else {
        None
    };

    // Create scanner and run
    let scanner = DependencyScanner::new(config)?;
    let aggregate = scanner.scan()?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files ({} references)",
            aggregate.stats.total_files, aggregate.stats.total_tokens
        ));
    }

    let output = format_output(&aggregate, args.format.into())?;

    // Write output
    if let Some(path) = args.output {
        fs::write(&path, &output)?;
        if args.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{}", output);
    }

    // Artifact files on request
    if let Some(path) = args.manifest {
        match install_manifest(&aggregate) {
            Some(manifest) => {
                fs::write(&path, manifest)?;
                if args.verbose {
                    eprintln!("Manifest written to: {}", path.display());
                }
            }
            None => eprintln!("No third-party packages found; manifest not written"),
        }
    }

    if let Some(path) = args.makefile {
        match build_skeleton(&aggregate) {
            Some(makefile) => {
                fs::write(&path, makefile)?;
                if args.verbose {
                    eprintln!("Makefile written to: {}", path.display());
                }
            }
            None => eprintln!("No compiled sources found; Makefile not written"),
        }
    }

    Ok(())
}
