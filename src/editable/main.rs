use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use editable::{
    BasicContext, Configuration, EditableError, EditableHelper, JsonRecord, Options, Result,
};
use log::{LevelFilter, debug};
use std::path::{Path, PathBuf};

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

/// Warnings by default, debug with `--verbose`; `RUST_LOG` still wins.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_dir = config_dir(cli.config)?;
    let config = Configuration::load(&config_dir)?;
    debug!("configuration loaded from {}", config_dir.display());

    match cli.command {
        Commands::Render {
            record,
            attribute,
            options,
            readonly,
            url,
        } => handle_render(&config, &record, &attribute, options.as_deref(), readonly, url),
        Commands::Resolve {
            record,
            attribute,
            options,
        } => handle_resolve(&config, &record, &attribute, options.as_deref()),
    }
}

fn config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => ProjectDirs::from("com", "editable", "editable")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| EditableError::Config("could not determine config directory".into())),
    }
}

fn parse_options(raw: Option<&str>) -> Result<Options> {
    match raw {
        Some(text) => Options::from_json(text),
        None => Ok(Options::new()),
    }
}

fn handle_render(
    config: &Configuration,
    record: &Path,
    attribute: &str,
    options: Option<&str>,
    readonly: bool,
    url: Option<String>,
) -> Result<()> {
    let record = JsonRecord::load(record)?;
    let options = parse_options(options)?;

    let mut context = if readonly {
        BasicContext::read_only()
    } else {
        BasicContext::default()
    };
    if let Some(url) = url {
        context = context.with_url(url);
    }

    let helper = EditableHelper::new(config, context)?;
    println!("{}", helper.editable(&record, attribute, options)?);
    Ok(())
}

fn handle_resolve(
    config: &Configuration,
    record: &Path,
    attribute: &str,
    options: Option<&str>,
) -> Result<()> {
    let record = JsonRecord::load(record)?;
    let options = parse_options(options)?;

    let helper = EditableHelper::new(config, BasicContext::default())?;
    let resolution = helper.resolve(&record, attribute, options)?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}
