// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use env_logger::{Env, Target};
use founderdash_app::AppState;
use founderdash_app::storage;
use founderdash_store::Store;
use founderdash_tui::{AppRuntime, Pages};
use log::info;
use runtime::StoreRuntime;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `founderdash --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    init_logging(&config)?;

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or FOUNDERDASH_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    info!("opened store at {}", db_path.display());

    if options.reset {
        storage::reset(&store)?;
        println!("cleared saved records in {}", db_path.display());
        return Ok(());
    }

    if options.check_only {
        let entries = store.entries()?;
        if entries.is_empty() {
            println!("no saved records yet; seed data loads on first launch");
        }
        for entry in entries {
            println!("{:<24} {:>8} bytes  {}", entry.key, entry.bytes, entry.updated_at);
        }
        return Ok(());
    }

    let mut state = AppState {
        active_tab: config.start_tab(),
        ..AppState::default()
    };

    let mut runtime = StoreRuntime::new(&store);
    let pages = Pages::load(runtime.storage(), config.page_size());
    founderdash_tui::run_app(&mut state, &mut runtime, pages)
}

/// The terminal belongs to the UI, so log lines go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let log_path = config.log_path()?;
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| {
            format!(
                "open log file {} -- set [log].file to a writable path",
                log_path.display()
            )
        })?;

    let level = config.log_level();
    // A logger installed earlier in the process wins.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    reset: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        reset: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--reset" => {
                options.reset = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.demo && options.reset {
        return Err(anyhow::anyhow!(
            "--reset clears a saved database; drop --demo, which never writes one"
        ));
    }

    Ok(options)
}

fn print_help() {
    println!("founderdash");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Launch with seed data only (in-memory)");
    println!("  --check                  Validate config + DB and list saved records");
    println!("  --reset                  Clear saved records so seed data loads again");
    println!("  --help                   Show this help");
}
