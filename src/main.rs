//! Twister lane CLI
//!
//! Entry point for the `twister-args` command-line tool.

use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::process;
use twister_lane::{logging, prepare, write_testsuite_extra_conf, EffectiveConfig};

#[derive(Parser)]
#[command(name = "twister-args")]
#[command(about = "Assemble CMake configure arguments for test-suite builds", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the -D definitions for a suite build
    Assemble {
        #[command(flatten)]
        overrides: Overrides,

        /// Print a JSON array instead of one definition per line
        #[arg(long)]
        json: bool,

        /// Print the full cmake command line
        #[arg(long, conflicts_with = "json")]
        command: bool,

        /// Do not write the extra config fragment
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the extra Kconfig fragment for a build directory
    ExtraConf {
        /// Build directory
        #[arg(long, short = 'b')]
        build_dir: PathBuf,

        /// CONFIG_<NAME>=<value> entries
        #[arg(required = true)]
        configs: Vec<String>,
    },

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Config layers and per-invocation overrides
#[derive(clap::Args)]
struct Overrides {
    /// Path to repo config file (default: .twister/lane.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Skip the host config (~/.config/twister/lane.toml)
    #[arg(long)]
    no_host_config: bool,

    /// Build directory
    #[arg(long, short = 'b')]
    build_dir: Option<PathBuf>,

    /// Source directory
    #[arg(long, short = 's')]
    source_dir: Option<PathBuf>,

    /// CMake generator
    #[arg(long, short = 'G')]
    generator: Option<String>,

    /// Base argument (KEY=VALUE or flag)
    #[arg(long = "extra-arg", short = 'x')]
    extra_args: Vec<String>,

    /// Extra Kconfig fragment for CONF_FILE
    #[arg(long = "conf-file")]
    extra_conf_files: Vec<String>,

    /// Extra Kconfig overlay for OVERLAY_CONFIG
    #[arg(long = "overlay-config")]
    extra_overlay_confs: Vec<String>,

    /// Extra devicetree overlay for DTC_OVERLAY_FILE
    #[arg(long = "dtc-overlay")]
    extra_dtc_overlay_files: Vec<String>,

    /// Extra CMake definition, emitted first
    #[arg(long = "cmake-def", short = 'D')]
    cmake_extra_args: Vec<String>,

    /// CONFIG_<NAME>=<value> written to the extra fragment
    #[arg(long = "extra-config")]
    extra_configs: Vec<String>,

    /// Handler argument
    #[arg(long = "handler-arg")]
    handler_args: Vec<String>,

    /// Mark the handler ready
    #[arg(long)]
    handler_ready: bool,
}

impl Overrides {
    /// CLI layer: only flags actually given, so config-file lists survive
    fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(dir) = &self.build_dir {
            map.insert("build_dir".into(), Value::from(dir.to_string_lossy().to_string()));
        }
        if let Some(dir) = &self.source_dir {
            map.insert("source_dir".into(), Value::from(dir.to_string_lossy().to_string()));
        }
        if let Some(generator) = &self.generator {
            map.insert("generator".into(), Value::from(generator.clone()));
        }
        for (key, list) in [
            ("extra_args", &self.extra_args),
            ("extra_conf_files", &self.extra_conf_files),
            ("extra_overlay_confs", &self.extra_overlay_confs),
            ("extra_dtc_overlay_files", &self.extra_dtc_overlay_files),
            ("cmake_extra_args", &self.cmake_extra_args),
            ("extra_configs", &self.extra_configs),
        ] {
            if !list.is_empty() {
                map.insert(key.into(), Value::from(list.clone()));
            }
        }

        let mut handler = Map::new();
        if !self.handler_args.is_empty() {
            handler.insert("args".into(), Value::from(self.handler_args.clone()));
        }
        if self.handler_ready {
            handler.insert("ready".into(), Value::Bool(true));
        }
        if !handler.is_empty() {
            map.insert("handler".into(), Value::Object(handler));
        }
        Value::Object(map)
    }

    fn load(&self) -> EffectiveConfig {
        let host = if self.no_host_config {
            None
        } else {
            EffectiveConfig::default_host_path()
        };
        let repo = self
            .config
            .clone()
            .unwrap_or_else(EffectiveConfig::default_repo_path);

        match EffectiveConfig::build(host.as_deref(), Some(repo.as_path()), Some(self.to_value())) {
            Ok(config) => config,
            Err(e) => fail(e),
        }
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            overrides,
            json,
            command,
            dry_run,
        } => {
            run_assemble(&overrides, json, command, dry_run);
        }
        Commands::ExtraConf { build_dir, configs } => {
            run_extra_conf(build_dir, configs);
        }
        Commands::Config { overrides } => {
            run_config(&overrides);
        }
    }
}

fn run_assemble(overrides: &Overrides, json: bool, command: bool, dry_run: bool) {
    let config = overrides.load();
    let invocation = prepare(config.settings(), dry_run).unwrap_or_else(|e| fail(e));

    if command {
        println!("{}", invocation);
    } else if json {
        match serde_json::to_string_pretty(&invocation.definitions) {
            Ok(out) => println!("{}", out),
            Err(e) => fail(e),
        }
    } else {
        for definition in &invocation.definitions {
            println!("{}", definition);
        }
    }
}

fn run_extra_conf(build_dir: PathBuf, configs: Vec<String>) {
    match write_testsuite_extra_conf(&build_dir, &configs) {
        Ok(Some(path)) => println!("{}", path.display()),
        Ok(None) => {}
        Err(e) => fail(e),
    }
}

fn run_config(overrides: &Overrides) {
    let config = overrides.load();
    match config.to_json() {
        Ok(out) => println!("{}", out),
        Err(e) => fail(e),
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", e);
    process::exit(1);
}
