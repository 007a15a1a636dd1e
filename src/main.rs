mod app;
mod button;
mod help;
mod mouse;
mod picker;
mod theme;
use crate::app::App;
use crate::mouse::MouseCapture;
use crate::picker::{DatePickerState, LeapRule};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime, macros::format_description};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        leap_rule: LeapRule,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut leap_rule = LeapRule::Quadrennial;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('g') | Arg::Long("gregorian") => leap_rule = LeapRule::Gregorian,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, format_description!("[year]-[month]-[day]")) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            leap_rule,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                leap_rule,
                log_file,
            } => {
                if let Some(path) = log_file {
                    init_logging(&path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut picker = DatePickerState::new(today).leap_rule(leap_rule);
                if let Some(date) = date {
                    picker = picker.start_date(date);
                }
                let value = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let _capture =
                        MouseCapture::enable().context("failed to enable mouse reporting")?;
                    App::new(picker)
                        .run(terminal)
                        .context("error while running date picker")
                })?;
                if !value.is_empty() {
                    println!("{value}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datepick [<options>] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a popup calendar and print it");
                println!();
                println!("Options:");
                println!("  -g, --gregorian   Use the full Gregorian leap year rule");
                println!("  --log-file <PATH> Write log messages to the given file");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// The terminal belongs to the UI, so log records only go to a file
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    log::debug!("Logging to {}", path.display());
    Ok(())
}
