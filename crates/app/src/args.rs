use std::fmt;

use playbook_core::i18n::Locale;

pub const DEFAULT_DB_URL: &str = "sqlite://playbook.sqlite3";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingCommand,
    UnknownCommand(String),
    MissingValue { flag: &'static str },
    InvalidDbUrl { raw: String },
    InvalidLocale { raw: String },
    WrongArity { command: &'static str, usage: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingCommand => write!(f, "a command is required"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLocale { raw } => write!(f, "unsupported locale: {raw}"),
            ArgsError::WrongArity { command, usage } => {
                write!(f, "usage: playbook {command} {usage}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sections,
    Lesson { section: String, slug: String },
    Next { section: String, slug: String },
    Prev { section: String, slug: String },
    Complete { section: String, slug: String },
    Progress,
    Translate { path: String, params: Vec<String> },
    Locale { tag: Option<String> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub db_url: String,
    /// Locale to switch to before running the command.
    pub locale: Option<Locale>,
    /// Locale used when no preference has been stored yet.
    pub default_locale: Locale,
}

/// Values read from the environment, kept separate so parsing stays testable.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub db_url: Option<String>,
    pub locale: Option<String>,
    pub lang: Option<String>,
}

impl Env {
    pub fn from_process() -> Self {
        Self {
            db_url: std::env::var("PLAYBOOK_DB_URL").ok(),
            locale: std::env::var("PLAYBOOK_LOCALE").ok(),
            lang: std::env::var("LANG").ok(),
        }
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  playbook <command> [--db <sqlite_url>] [--locale <tag>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  sections                   list sections with completion");
    eprintln!("  lesson <section> <slug>    show a lesson page");
    eprintln!("  next <section> <slug>      print the following lesson");
    eprintln!("  prev <section> <slug>      print the preceding lesson");
    eprintln!("  complete <section> <slug>  mark a lesson complete");
    eprintln!("  progress                   print overall progress");
    eprintln!("  t <path> [params...]       resolve a translation key");
    eprintln!("  locale [<tag>]             show or switch the active locale");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PLAYBOOK_DB_URL, PLAYBOOK_LOCALE (default locale), LANG, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_locale(raw: &str) -> Result<Locale, ArgsError> {
    Locale::from_lang_tag(raw).ok_or_else(|| ArgsError::InvalidLocale {
        raw: raw.to_string(),
    })
}

fn pair(
    mut rest: Vec<String>,
    command: &'static str,
) -> Result<(String, String), ArgsError> {
    if rest.len() != 2 {
        return Err(ArgsError::WrongArity {
            command,
            usage: "<section> <slug>",
        });
    }
    let slug = rest.pop().unwrap_or_default();
    let section = rest.pop().unwrap_or_default();
    Ok((section, slug))
}

fn none(rest: &[String], command: &'static str) -> Result<(), ArgsError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ArgsError::WrongArity { command, usage: "" })
    }
}

impl Args {
    pub fn parse(argv: impl IntoIterator<Item = String>, env: &Env) -> Result<Self, ArgsError> {
        let mut db_url = env
            .db_url
            .clone()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.to_string());
        let env_locale = env
            .locale
            .as_deref()
            .filter(|value| !value.trim().is_empty());
        let default_locale = match env_locale {
            Some(raw) => parse_locale(raw)?,
            None => env
                .lang
                .as_deref()
                .and_then(Locale::from_lang_tag)
                .unwrap_or_default(),
        };
        let mut locale = None;
        let mut positional = Vec::new();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--locale" => {
                    let value = require_value(&mut args, "--locale")?;
                    locale = Some(parse_locale(&value)?);
                }
                "--help" | "-h" => {
                    positional.clear();
                    positional.push("help".to_string());
                    break;
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let name = positional.next().ok_or(ArgsError::MissingCommand)?;
        let rest: Vec<String> = positional.collect();
        let command = match name.as_str() {
            "sections" => none(&rest, "sections").map(|()| Command::Sections)?,
            "progress" => none(&rest, "progress").map(|()| Command::Progress)?,
            "help" => Command::Help,
            "lesson" => {
                let (section, slug) = pair(rest, "lesson")?;
                Command::Lesson { section, slug }
            }
            "next" => {
                let (section, slug) = pair(rest, "next")?;
                Command::Next { section, slug }
            }
            "prev" => {
                let (section, slug) = pair(rest, "prev")?;
                Command::Prev { section, slug }
            }
            "complete" => {
                let (section, slug) = pair(rest, "complete")?;
                Command::Complete { section, slug }
            }
            "t" => {
                let mut rest = rest.into_iter();
                let path = rest.next().ok_or(ArgsError::WrongArity {
                    command: "t",
                    usage: "<path> [params...]",
                })?;
                Command::Translate {
                    path,
                    params: rest.collect(),
                }
            }
            "locale" => {
                if rest.len() > 1 {
                    return Err(ArgsError::WrongArity {
                        command: "locale",
                        usage: "[<tag>]",
                    });
                }
                Command::Locale {
                    tag: rest.into_iter().next(),
                }
            }
            _ => return Err(ArgsError::UnknownCommand(name)),
        };

        Ok(Self {
            command,
            db_url: normalize_sqlite_url(db_url),
            locale,
            default_locale,
        })
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
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
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
