// src/cli.rs
use std::io::Write;
use std::path::{ Path, PathBuf };

use clap::{ ArgAction, Parser, Subcommand, ValueEnum };
use color_eyre::eyre::{ eyre, Result, WrapErr };

use crate::{
    config::{
        consts::{ DEFAULT_OUT_DIR, DEFAULT_PROFILE },
        AppOptions, Decoding, ExportFormat, FormatProfile, JoinKey,
    },
    consolidate::JoinMode,
    core::format::{ area, money },
    csv,
    file,
    logger::FileLogger,
    lookup::{ self, LookupKey, PropertySheet },
    portfolio,
    progress::Progress,
    runner::{ self, Session },
    store,
};

#[derive(Parser, Debug)]
#[command(name = "cinta", version)]
#[command(about = "Read R1/R2 cadastral tapes: parse, join, summarise and export")]
pub struct Cli {
    /// Built-in offset profile
    #[arg(long, global = true, default_value = DEFAULT_PROFILE)]
    profile: String,

    /// Offset profile from a TOML file (overrides --profile)
    #[arg(long, global = true)]
    profile_file: Option<PathBuf>,

    /// Identifier used to match R2 rows to R1 rows
    #[arg(long, global = true, value_enum, default_value_t = KeyArg::FullCode)]
    join_key: KeyArg,

    /// Decode input as ISO-8859-1 instead of lossy UTF-8
    #[arg(long, global = true)]
    latin1: bool,

    /// Parse files on worker threads
    #[arg(long, global = true)]
    parallel: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// -v info, -vv debug
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Counts, per-file report and notices
    Summary {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print a table to stdout
    Table {
        /// Print a raw table instead of the consolidated one
        #[arg(long, value_enum)]
        raw: Option<RawArg>,
        #[arg(long, value_enum, default_value_t = DelimArg::Csv)]
        format: DelimArg,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Distinct owners with count and totals
    Owners {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// One owner's properties, optionally written to a file
    Portfolio {
        #[arg(long, required_unless_present = "all", conflicts_with = "all")]
        owner: Option<String>,
        /// Write one file per owner
        #[arg(long)]
        all: bool,
        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Property sheet for one code or search label
    Lookup {
        #[arg(long, required_unless_present = "label", conflicts_with = "label")]
        code: Option<String>,
        /// `<reference> | <owner>`
        #[arg(long)]
        label: Option<String>,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Write the consolidated report
    Export {
        /// File or directory (trailing `/`)
        #[arg(short, long)]
        out: Option<String>,
        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,
        /// Add the raw R1/R2 tables
        #[arg(long)]
        include_raw: bool,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KeyArg { FullCode, Reference }

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RawArg { R1, R2 }

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DelimArg { Csv, Tsv }

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg { Xlsx, Csv, Tsv }

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv  => ExportFormat::Csv,
            FormatArg::Tsv  => ExportFormat::Tsv,
        }
    }
}

/* ---------------- Progress on stderr ---------------- */

#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, name: &str, records: usize) {
        self.done += 1;
        eprintln!("[{}/{}] {name}: {records} record(s)", self.done, self.total);
    }
    fn item_skipped(&mut self, name: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {name}: ignored", self.done, self.total);
    }
}

/* ---------------- Entry ---------------- */

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    match &cli.log_file {
        Some(path) => {
            FileLogger::open(path, level)
                .wrap_err_with(|| format!("could not open log file {}", path.display()))?
                .install()?;
        }
        None => {
            let default = level.as_str().to_ascii_lowercase();
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
        }
    }
    Ok(())
}

fn app_options(cli: &Cli) -> Result<AppOptions> {
    let mut opts = AppOptions::default();
    opts.ingest.profile = match &cli.profile_file {
        Some(path) => FormatProfile::load(path)?,
        None => FormatProfile::builtin(&cli.profile)?,
    };
    opts.ingest.decoding = if cli.latin1 { Decoding::Latin1 } else { Decoding::Utf8Lossy };
    opts.ingest.parallel = cli.parallel;
    opts.join.key = match cli.join_key {
        KeyArg::FullCode  => JoinKey::FullCode,
        KeyArg::Reference => JoinKey::Reference,
    };
    Ok(opts)
}

fn load(files: &[PathBuf], opts: &AppOptions) -> Result<Session> {
    let sources = runner::load_paths(files)?;
    let mut progress = CliProgress::default();
    Ok(runner::run(&sources, opts, Some(&mut progress)))
}

fn print_notices(session: &Session) {
    for n in session.notices() {
        eprintln!("warning: {n}");
    }
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;
    let mut opts = app_options(&cli)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Summary { files } => {
            let session = load(&files, &opts)?;
            let b = &session.batch;
            let c = &session.consolidated;
            for f in &b.files {
                let kind = f.kind.map(|k| k.label()).unwrap_or("--");
                writeln!(out, "{kind}  {}  lines={} records={} blank={} skipped={}",
                    f.name, f.lines, f.records, f.blank, f.skipped)?;
            }
            writeln!(out, "R1 records: {}", b.properties.len())?;
            writeln!(out, "R2 records: {}", b.details.len())?;
            let mode = match c.mode {
                JoinMode::Joined => "joined",
                JoinMode::PropertyOnly => "R1 only",
            };
            writeln!(out, "Consolidated rows: {} ({mode}, key {:?}, {} matched)", c.len(), c.key, c.matched())?;
            writeln!(out, "Owners: {}", portfolio::owner_names(c).len())?;
            print_notices(&session);
        }

        Command::Table { raw, format, files } => {
            let session = load(&files, &opts)?;
            let ds = match raw {
                Some(RawArg::R1) => store::properties_table(&session.batch.properties),
                Some(RawArg::R2) => store::details_table(&session.batch.details),
                None => store::consolidated_display_table(&session.consolidated),
            };
            let sep = match format { DelimArg::Csv => ',', DelimArg::Tsv => '\t' };
            csv::write_dataset(&mut out, &ds, sep)?;
            print_notices(&session);
        }

        Command::Owners { files } => {
            let session = load(&files, &opts)?;
            for s in portfolio::owner_summaries(&session.consolidated) {
                writeln!(out, "{}\t{}\t{}\t{}", s.owner, s.count, money(s.total_assessed_value), area(s.total_land_area, 0))?;
            }
        }

        Command::Portfolio { owner, all, out: dir, format, files } => {
            let session = load(&files, &opts)?;
            let c = &session.consolidated;
            let format = ExportFormat::from(format);

            if all {
                let dir = dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
                let views = portfolio::owner_names(c).into_iter().map(|n| portfolio::portfolio(c, n));
                let written = file::write_owner_portfolios(&dir, views, format)?;
                writeln!(out, "{} file(s) written to {}", written.len(), dir.display())?;
                return Ok(());
            }

            let owner = owner.ok_or_else(|| eyre!("--owner is required without --all"))?;
            let p = portfolio::portfolio(c, &owner);
            writeln!(out, "Owner: {}", p.owner)?;
            writeln!(out, "Properties: {}", p.count())?;
            writeln!(out, "Total assessed value: {}", money(p.total_assessed_value()))?;
            writeln!(out, "Total land area: {}", area(p.total_land_area(), 0))?;
            if p.is_empty() {
                eprintln!("warning: no properties for owner '{owner}' (names must match exactly)");
            } else {
                writeln!(out)?;
                csv::write_dataset(&mut out, &p.to_dataset(), ',')?;
            }
            if let Some(dir) = dir {
                let path = file::write_owner_portfolio(&dir, &p, format)?;
                writeln!(out, "Saved: {}", path.display())?;
            }
        }

        Command::Lookup { code, label, files } => {
            let session = load(&files, &opts)?;
            let key = match (&code, &label) {
                (Some(code), _) => LookupKey::FullCode(code),
                (None, Some(label)) => LookupKey::Label(label),
                (None, None) => return Err(eyre!("give --code or --label")),
            };
            let hit = lookup::find(&session.consolidated, key)
                .ok_or_else(|| eyre!("no property matches {key:?}"))?;
            write!(out, "{}", PropertySheet::new(&hit.property))?;
            if let Some(d) = &hit.detail {
                writeln!(out, "R2  {}  {}", d.additional_code, d.variable_data)?;
            }
        }

        Command::Export { out: out_path, format, include_raw, files } => {
            opts.export.format = format.into();
            opts.export.include_raw = include_raw;
            if let Some(p) = out_path {
                opts.export.set_path(&dir_hint(&p));
            }
            let session = load(&files, &opts)?;
            print_notices(&session);
            for path in session.export_to_disk(&opts)? {
                writeln!(out, "Saved: {}", path.display())?;
            }
        }
    }
    Ok(())
}

/// An existing directory given without a trailing separator is still a directory.
fn dir_hint(p: &str) -> String {
    if Path::new(p).is_dir() && !file::looks_like_dir_hint(Path::new(p)) {
        join!(p, "/")
    } else {
        s!(p)
    }
}
