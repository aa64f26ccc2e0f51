use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use diary::{Config, DiaryEntry, DiarySource, FixtureSource, Month};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read entries from a JSON file instead of the server.
    #[arg(long, global = true, conflicts_with = "offline")]
    fixtures: Option<PathBuf>,

    /// Read the built-in sample entries instead of the server.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List entries, oldest first.
    List {
        /// Only list entries in this month (YYYY-MM).
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Show the entry for a date (YYYY-MM-DD).
    Show { date: NaiveDate },
    /// Show the latest entry in a month (YYYY-MM).
    Recent { month: Month },
    /// Write the entry for a date, replacing any existing one.
    Write {
        date: NaiveDate,
        /// How the day felt.
        #[arg(short, long, allow_negative_numbers = true)]
        emotion: i32,
        #[arg(required = true)]
        content: Vec<String>,
    },
    /// Delete the entry for a date.
    Delete { date: NaiveDate },
}

fn print(entries: &[DiaryEntry]) {
    println!("{}", tabled::Table::new(entries));
}

fn fixtures(cli: &Cli) -> Result<Option<FixtureSource>> {
    if let Some(path) = &cli.fixtures {
        let file = std::fs::File::open(path).with_context(|| format!("Open {path:?}"))?;
        let fixtures = FixtureSource::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Loading fixtures from {path:?}"))?;
        return Ok(Some(fixtures));
    }
    if cli.offline {
        return Ok(Some(FixtureSource::builtin()?));
    }
    Ok(None)
}

fn config() -> Result<Config> {
    let config = Config::load()?;
    log::debug!("Using diary server {}", config.url);
    Ok(config)
}

fn read(source: &dyn DiarySource, command: &Command) -> Result<()> {
    match command {
        Command::List { month } => {
            let mut entries = source.list_by_month(*month)?;
            entries.sort_by_key(|e| e.date);
            print(&entries);
        }
        Command::Show { date } => match source.get_by_date(*date)? {
            Some(entry) => print(&[entry]),
            None => eprintln!("No entry for {date}"),
        },
        Command::Recent { month } => match source.most_recent_in_month(*month)? {
            Some(entry) => print(&[entry]),
            None => eprintln!("No entries in {month}"),
        },
        Command::Write { .. } | Command::Delete { .. } => bail!("Not a read command"),
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Write {
            date,
            emotion,
            content,
        } => {
            if fixtures(&cli)?.is_some() {
                bail!("Fixtures are read-only");
            }
            let entry = DiaryEntry::new(*date, content.join(" "), *emotion);
            let saved = config()?.repository().save(entry)?;
            print(&[saved]);
        }
        Command::Delete { date } => {
            if fixtures(&cli)?.is_some() {
                bail!("Fixtures are read-only");
            }
            config()?.repository().delete(*date)?;
        }
        command => match fixtures(&cli)? {
            Some(fixtures) => read(&fixtures, command)?,
            None => read(&config()?.source(), command)?,
        },
    }
    Ok(())
}
