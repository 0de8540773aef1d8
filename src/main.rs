use serial_timeline::{
    catalog::Catalog,
    cli::Cli,
    config::Config,
    logging::{self, LogLevel},
    models::TimelineData,
    report,
    timeline::Timeline,
    validate::validate,
    width::WidthMode,
};

use clap::Parser;
use eyre::Result;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(LogLevel::from_flags(cli.verbose, cli.debug));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logging::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path.clone())?,
        None => Config::new()?,
    };
    logging::debug(format!("configuration: {}", config.filepath().display()));

    if cli.list {
        let catalog = Catalog::load_dir(&config.titles_dir())?;
        for key in catalog.keys() {
            println!("{key}");
        }
        return Ok(());
    }

    let timeline = load_timeline(cli.dataset.as_deref(), &config)?;

    if cli.check {
        let issues = validate(timeline.data());
        for issue in &issues {
            println!("{issue}");
        }
        if !issues.is_empty() {
            return Err(eyre::eyre!("{} issue(s) found in {}", issues.len(), timeline.title()));
        }
        println!("{}: ok", timeline.title());
        return Ok(());
    }

    let rows = match cli.dates {
        Some(choice) => {
            let grouping = choice.unwrap_or(config.settings.date_grouping);
            report::date_rows(&timeline, grouping, &config.settings.color_stops)?
        }
        None => {
            let mode = if cli.unbounded {
                WidthMode::Unbounded
            } else {
                config.settings.width_mode()
            };
            report::width_rows(&timeline, cli.layout, cli.index, mode)?
        }
    };
    for row in rows {
        println!("{row}");
    }

    Ok(())
}

/// A dataset argument is a JSON file if one exists at that path, otherwise a
/// title key looked up in the titles directory.
fn load_timeline(dataset: Option<&str>, config: &Config) -> Result<Timeline> {
    if let Some(arg) = dataset {
        let path = Path::new(arg);
        if path.is_file() {
            logging::info(format!("loading {}", path.display()));
            return Ok(Timeline::new(TimelineData::from_path(path)?));
        }
    }

    let catalog = Catalog::load_dir(&config.titles_dir())?;
    let timeline = match dataset {
        Some(key) => catalog.get(key)?,
        None => catalog.selected(&config.settings)?,
    };
    Ok(timeline.clone())
}
