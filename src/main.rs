//! rdfconv command line interface.
mod cli;
mod serve;
mod watch;

use crate::cli::Cli;
use clap::Parser;
use log::LevelFilter;
use rdfconv::{Config, Converter, Error};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

/// Options shared by every conversion of a run.
pub struct Options {
    pub config: Config,
    pub languages: Vec<String>,
    pub index_html: bool,
}

/// Logs go to `log_file` if given, else to stdout, or to stderr when stdout carries JSON.
fn init_logging(verbose: bool, log_file: Option<&Path>, json: bool) -> std::io::Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env().format(|buf, record| {
        writeln!(
            buf,
            "{} {} {} {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or_default(),
            record.args()
        )
    });
    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if json => {
            builder.target(env_logger::Target::Stderr);
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }
    builder.init();
    Ok(())
}

/// Converts a single file. Language mismatches are logged and the file skipped.
pub fn run(input: &Path, output: &Path, options: &Options) -> Result<(), Error> {
    log::info!("Converting {}", input.display());
    let mut converter = Converter::new(&options.languages, options.config.clone());
    let result = converter.load_file(input).and_then(|()| converter.output_html(output, options.index_html));
    match result {
        Ok(pages) => {
            log::info!("Finished converting {}, {} page(s) written", input.display(), pages.len());
            Ok(())
        }
        Err(Error::Language(e)) => {
            log::error!("Skipped file {}: {}", input.display(), e);
            Err(e.into())
        }
        Err(e) => Err(e),
    }
}

fn print_json(input: &Path, options: &Options) -> Result<(), Error> {
    let mut converter = Converter::new(&options.languages, options.config.clone());
    converter.load_file(input)?;
    let mut pages = BTreeMap::new();
    for language in converter.output_languages() {
        let nodes = converter.nodes(&language);
        pages.insert(language, nodes);
    }
    println!("{}", serde_json::to_string_pretty(&pages)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref(), cli.json) {
        eprintln!("error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = match Config::new(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.local_ns.extend(cli.local_ns.iter().cloned());
    config.resolve_labels |= cli.resolve_labels;
    config.skip_links |= cli.skip_links;
    let options = Options { config, languages: cli.languages.clone(), index_html: cli.index_html };

    if cli.watch {
        watch::watch(&cli.dcat_files, &cli.output, &options);
        return ExitCode::SUCCESS;
    }

    let mut failed = false;
    for input in &cli.dcat_files {
        let result = if cli.json { print_json(input, &options) } else { run(input, &cli.output, &options) };
        match result {
            Ok(()) => {}
            // already logged by run
            Err(Error::Language(_)) if !cli.json => failed = true,
            Err(e) => {
                log::error!("{e}");
                failed = true;
            }
        }
    }

    if cli.create_index {
        if let Err(e) = rdfconv::converter::write_page_index(&cli.output) {
            log::error!("{e}");
            failed = true;
        }
    }

    if let Some(port) = cli.serve {
        if let Err(e) = serve::serve(cli.output.clone(), port) {
            log::error!("Web server failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
