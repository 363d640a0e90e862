use clap::{Parser, Subcommand};
use elogv::{SectionFilter, Severity, Stage, Viewer};
use elogv_core::config::{resolve_elog_dir, Config};
use elogv_core::settings::JsonSettings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "elogv", about = "elogv — review Portage elog messages")]
struct Cli {
    /// Write debug logs to $TMPDIR/elogv-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Elog directory (overrides config and $PORT_LOGDIR).
    #[arg(long, short = 'p', value_name = "DIR")]
    elog_dir: Option<PathBuf>,

    /// File holding the read/important flags.
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Fail when any elog cannot be decoded instead of skipping it.
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List elogs with their severity and flags.
    List,
    /// Print one elog as HTML and mark it read.
    Show {
        filename: String,
        /// Only render these classes (comma-separated).
        #[arg(long, value_delimiter = ',')]
        class: Vec<Severity>,
        /// Only render these stages (comma-separated).
        #[arg(long, value_delimiter = ',')]
        stage: Vec<Stage>,
    },
    /// Mark elogs read.
    Read { filenames: Vec<String> },
    /// Mark elogs unread.
    Unread { filenames: Vec<String> },
    /// Flag elogs as important.
    Important { filenames: Vec<String> },
    /// Clear the important flag.
    Unimportant { filenames: Vec<String> },
    /// Delete elog files.
    Delete { filenames: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::defaults()
    });
    let root = cli
        .elog_dir
        .as_deref()
        .map(resolve_elog_dir)
        .unwrap_or_else(|| config.elog_dir());
    let mut settings = JsonSettings::open(cli.state.unwrap_or_else(|| config.state_path()))?;

    let mut viewer = Viewer::open(&root, &settings)?;
    let report = viewer.refresh();
    if cli.strict {
        if let Some(e) = report.errors.into_iter().next() {
            return Err(e.into());
        }
    }

    match cli.command {
        Command::List => list(&viewer),
        Command::Show {
            filename,
            class,
            stage,
        } => {
            let mut filter = SectionFilter::default();
            if !class.is_empty() {
                filter = filter.classes(class);
            }
            if !stage.is_empty() {
                filter = filter.stages(stage);
            }
            viewer.set_filter(filter);
            match viewer.select(Some(&filename)) {
                Some(html) => print!("{html}"),
                None => anyhow::bail!("no such elog: {filename}"),
            }
        }
        Command::Read { filenames } => for_each(&filenames, |f| viewer.set_read(f, true)),
        Command::Unread { filenames } => for_each(&filenames, |f| viewer.set_read(f, false)),
        Command::Important { filenames } => {
            for_each(&filenames, |f| viewer.set_important(f, true))
        }
        Command::Unimportant { filenames } => {
            for_each(&filenames, |f| viewer.set_important(f, false))
        }
        Command::Delete { filenames } => {
            for filename in &filenames {
                if let Err(e) = viewer.delete(filename) {
                    eprintln!("{e}");
                }
            }
        }
    }

    viewer.close(&mut settings)
}

fn list(viewer: &Viewer) {
    for row in viewer.rows() {
        println!(
            "{}{} {:<5} {} {}/{}  {}",
            if row.read { ' ' } else { 'N' },
            if row.important { '*' } else { ' ' },
            row.severity,
            row.timestamp.format("%Y-%m-%d %H:%M:%S"),
            row.category,
            row.package,
            row.filename,
        );
    }
    println!(
        "{} of {} unread, {} important",
        viewer.unread_count(),
        viewer.records().len(),
        viewer.important_count()
    );
}

fn for_each(filenames: &[String], mut apply: impl FnMut(&str) -> bool) {
    for filename in filenames {
        if !apply(filename) {
            eprintln!("no such elog: {filename}");
        }
    }
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    if debug {
        let path = std::env::temp_dir().join("elogv-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %path.display(), "elogv debug log started");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}
