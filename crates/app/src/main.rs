mod args;

use std::fmt;

use playbook_core::i18n::Locale;
use services::PlaybookServices;
use tracing_subscriber::EnvFilter;

use args::{Args, ArgsError, Command, Env, print_usage};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = Args::parse(std::env::args().skip(1), &Env::from_process()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if parsed.command == Command::Help {
        print_usage();
        return Ok(());
    }

    // Open + migrate SQLite at startup; services stay unaware of file paths.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = PlaybookServices::new_sqlite(&parsed.db_url, parsed.default_locale).await?;
    if let Some(locale) = parsed.locale {
        services.locale().set_active(locale).await;
    }
    tracing::debug!(db = %parsed.db_url, locale = %services.locale().active(), "services ready");

    match parsed.command {
        Command::Sections => {
            for section in services.lessons().sections() {
                println!("{:>3}  {}  ({})", section.number, section.caption, section.id);
            }
        }
        Command::Lesson { section, slug } => {
            let Some(page) = services.lessons().lesson_page(&section, &slug) else {
                println!("{}", services.locale().t("errors.lesson_not_found", &[]));
                return Ok(());
            };
            let locale = services.locale();
            let mark = if page.completed {
                locale.t("nav.completed", &[])
            } else {
                locale.t("nav.complete", &[])
            };
            println!("{} {}  [{}/{}]", page.ordinal, page.title, page.position, page.total);
            println!("{} {}", page.section_number, page.section_title);
            if !page.description.is_empty() {
                println!();
                println!("{}", page.description);
            }
            println!();
            println!("  {mark}");
            if let Some(prev) = page.prev {
                println!("  {}: {prev}", locale.t("nav.prev", &[]));
            }
            if let Some(next) = page.next {
                println!("  {}: {next}", locale.t("nav.next", &[]));
            }
        }
        Command::Next { section, slug } => {
            print_optional(services.curriculum().next_lesson(&section, &slug));
        }
        Command::Prev { section, slug } => {
            print_optional(services.curriculum().prev_lesson(&section, &slug));
        }
        Command::Complete { section, slug } => {
            let next = services.lessons().complete(&section, &slug).await?;
            println!("{}", services.locale().t("nav.completed", &[]));
            print_optional(next);
        }
        Command::Progress => {
            println!("{}", services.lessons().progress_caption());
            if let Some(resume) = services.lessons().resume_point() {
                println!("{}: {resume}", services.locale().t("nav.next", &[]));
            }
        }
        Command::Translate { path, params } => {
            let params: Vec<&dyn fmt::Display> =
                params.iter().map(|param| param as &dyn fmt::Display).collect();
            println!("{}", services.locale().t(&path, &params));
        }
        Command::Locale { tag: None } => {
            let active = services.locale().active();
            for locale in Locale::all() {
                let marker = if locale == active { "*" } else { " " };
                println!("{marker} {}  {}", locale.code(), locale.label());
            }
        }
        Command::Locale { tag: Some(tag) } => {
            let locale = services.locale().set_active_tag(&tag).await?;
            println!("{}", locale.label());
        }
        Command::Help => print_usage(),
    }

    Ok(())
}

fn print_optional(value: Option<impl fmt::Display>) {
    match value {
        Some(value) => println!("{value}"),
        None => println!("-"),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

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
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
