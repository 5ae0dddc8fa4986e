use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use clap::Parser;
use engine::{EngineError, Manager};

use crate::{
    cli::{Cli, Command, ExportArgs},
    dispatch::Outcome,
    error::{AppError, Result},
    settings::Settings,
};

mod cli;
mod dispatch;
mod error;
mod export;
mod render;
mod settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(cli.config.as_deref(), cli.context.clone()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!(
            "budgee={level},engine={level}",
            level = settings.level
        ))
        .init();

    match run(cli.command.unwrap_or(Command::Summary), &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    let context = settings.context.as_path();
    match command {
        Command::Init => init(context),
        Command::Export(args) => export_csv(&open(context)?, args),
        command => {
            let mut manager = open(context)?;
            let today = chrono::Local::now().date_naive();
            let mut stdout = io::stdout().lock();
            if dispatch::execute(&mut manager, command, today, &mut stdout)? == Outcome::Changed {
                manager.save(context)?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Loads the context, starting from an empty one when the file does not
/// exist yet.
fn open(context: &Path) -> Result<Manager> {
    match Manager::load(context) {
        Ok(manager) => Ok(manager),
        Err(EngineError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            tracing::info!("no context at {}, starting empty", context.display());
            Ok(Manager::new())
        }
        Err(err) => Err(err.into()),
    }
}

fn init(context: &Path) -> Result<()> {
    if context.exists() {
        return Err(AppError::Usage(format!(
            "context already exists: {}",
            context.display()
        )));
    }
    Manager::new().save(context)?;
    println!("created context: {}", context.display());
    Ok(())
}

fn export_csv(manager: &Manager, args: ExportArgs) -> Result<()> {
    let rows = match &args.output {
        Some(path) => export::write_csv(manager, fs::File::create(path)?)?,
        None => export::write_csv(manager, io::stdout().lock())?,
    };
    tracing::info!("exported {rows} transaction(s)");
    Ok(())
}
