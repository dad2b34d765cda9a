use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{CatalogSource, Clock, ProgressStore, StudySession, load_catalog};
use study_core::model::{Catalog, Completion};
use ui::vm::completion_label;
use ui::{App, InstallPrompt, UiApp, UnavailableInstallPrompt, build_app_context};

const EMBEDDED_CATALOG: &str = include_str!("../assets/catalog.json");
const MEMORY_DB_URL: &str = "sqlite::memory:";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    catalog: Arc<Catalog>,
    store: ProgressStore,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn progress_store(&self) -> ProgressStore {
        self.store.clone()
    }

    fn clock(&self) -> Clock {
        Clock::default_clock()
    }

    fn install_prompt(&self) -> Arc<dyn InstallPrompt> {
        Arc::new(UnavailableInstallPrompt)
    }
}

struct Args {
    db_url: String,
    catalog: CatalogSource,
    log_filter: Option<String>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--db <sqlite_url>] [--catalog <path>] [--memory] [--log <filter>]");
    eprintln!("  cargo run -p app -- progress [--db <sqlite_url>] [--catalog <path>] [--log <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://study.sqlite3");
    eprintln!("  --catalog <built-in catalog>");
    eprintln!("  --log info");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_DB_URL, STUDY_CATALOG, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("STUDY_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://study.sqlite3".into(), normalize_sqlite_url);
        let mut catalog = std::env::var("STUDY_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or(CatalogSource::Embedded(EMBEDDED_CATALOG), |value| {
                CatalogSource::File(PathBuf::from(value))
            });
        let mut log_filter = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--memory" => db_url = MEMORY_DB_URL.to_string(),
                "--catalog" => {
                    catalog = CatalogSource::File(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--log" => log_filter = Some(require_value(args, "--log")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            catalog,
            log_filter,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == MEMORY_DB_URL || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_logging(filter: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    }
    // A second init (tests, embedding) is harmless.
    let _ = builder.try_init();
}

fn open_store(db_url: &str) -> Result<ProgressStore, Box<dyn std::error::Error>> {
    if db_url == MEMORY_DB_URL {
        log::info!("progress kept in memory for this run");
        return Ok(ProgressStore::in_memory());
    }
    prepare_sqlite_file(db_url)?;
    log::info!("progress database: {db_url}");
    Ok(ProgressStore::sqlite(db_url))
}

fn completion_line(indent: usize, name: &str, completion: Completion) -> String {
    format!(
        "{:indent$}{name}  {}/{}  {}",
        "",
        completion.reviewed,
        completion.total,
        completion_label(completion.status())
    )
}

async fn print_progress(catalog: Arc<Catalog>, store: ProgressStore) {
    let session = StudySession::load(catalog, store, Clock::default_clock()).await;

    for domain in session.catalog().domains() {
        println!(
            "{}",
            completion_line(0, domain.name(), session.domain_completion(domain))
        );
        for task in domain.tasks() {
            println!(
                "{}",
                completion_line(4, task.name(), session.task_completion(task))
            );
        }
    }

    let stats = session.stats();
    let overall = session.catalog_completion();
    println!();
    println!(
        "Reviewed cards: {}/{}  Grades: {} ({} correct, {} incorrect, {}% accuracy)",
        overall.reviewed,
        overall.total,
        stats.total,
        stats.correct,
        stats.incorrect,
        stats.accuracy_percent()
    );
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_logging(parsed.log_filter.as_deref());

    let catalog = Arc::new(load_catalog(&parsed.catalog)?);
    let store = open_store(&parsed.db_url)?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { catalog, store });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Exam Study")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => {
            print_progress(catalog, store).await;
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = Catalog::from_json_str(EMBEDDED_CATALOG).expect("embedded catalog");
        assert_eq!(catalog.domains().len(), 4);
        assert!(catalog.card_count() > 0);
    }

    #[test]
    fn progress_lines_use_catalog_completion_labels() {
        let partial = Completion {
            reviewed: 1,
            total: 3,
        };
        assert_eq!(
            completion_line(4, "Secure access", partial),
            "    Secure access  1/3  33% done"
        );
        assert_eq!(
            completion_line(0, "Empty", Completion::default()),
            "Empty  0/0  Coming soon"
        );
    }

    #[test]
    fn memory_flag_selects_in_memory_store() {
        let args = parse(&["--memory"]).unwrap();
        assert_eq!(args.db_url, MEMORY_DB_URL);
    }

    #[test]
    fn relative_db_paths_become_absolute() {
        let url = normalize_sqlite_url("data/study.sqlite3".to_string());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/study.sqlite3"), "{url}");
    }

    #[test]
    fn missing_flag_values_are_reported() {
        assert!(matches!(
            parse(&["--catalog"]),
            Err(ArgsError::MissingValue { flag: "--catalog" })
        ));
        assert!(matches!(parse(&["--bogus"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn catalog_flag_reads_from_file() {
        let args = parse(&["--catalog", "/tmp/catalog.json", "--log", "debug"]).unwrap();
        assert_eq!(
            args.catalog,
            CatalogSource::File(PathBuf::from("/tmp/catalog.json"))
        );
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
    }
}
