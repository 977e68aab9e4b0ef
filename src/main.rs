use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dom_i18n::core::{
    localize_document, print_error_message, print_info_message, LocalizeOptions,
};
use dom_i18n::env::{generate_env_docs, EnvConfig};
use dom_i18n::sync::FileStore;
use dom_i18n::translation::error::log_error;
use dom_i18n::translation::{Locale, LocalizerConfig, TranslationError};

const DEFAULT_PREFS_FILE: &str = "prefs.json";

#[derive(Parser, Debug)]
#[command(
    name = "dom-i18n",
    version,
    about = "Localize the UI text of an HTML page in place"
)]
struct Cli {
    /// HTML file to localize ("-" for stdin)
    #[arg(required_unless_present = "env_help")]
    input: Option<String>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Preference file (JSON)
    #[arg(short, long)]
    prefs: Option<PathBuf>,

    /// Force the locale for this run without persisting it
    #[arg(short, long, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Click the language toggle once after startup
    #[arg(short, long)]
    toggle: bool,

    /// Localizer configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input charset
    #[arg(short, long)]
    encoding: Option<String>,

    /// Viewport width used to place the toggle
    #[arg(short, long)]
    width: Option<u32>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    env_help: bool,
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    Locale::from_code(value)
        .ok_or_else(|| format!("unknown locale '{}', use one of: {}", value, Locale::CODES.join(", ")))
}

fn main() {
    let cli = Cli::parse();

    if cli.env_help {
        print_info_message(&generate_env_docs());
        return;
    }

    let env_config = match EnvConfig::from_env() {
        Ok(env_config) => env_config,
        Err(e) => {
            print_error_message(&e.to_string());
            process::exit(1);
        }
    };

    let log_level = cli.log_level.clone().unwrap_or_else(|| env_config.log_level.clone());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
    for warning in &env_config.warnings {
        tracing::warn!("{}，已忽略", warning);
    }

    if let Err(e) = run(cli, env_config) {
        log_error(&e);
        print_error_message(&format!("Error: {}", e));
        process::exit(1);
    }
}

fn run(cli: Cli, env_config: EnvConfig) -> Result<(), TranslationError> {
    let config = match cli.config.or(env_config.config_path) {
        Some(path) => LocalizerConfig::load(path)?,
        None => LocalizerConfig::discover()?,
    };

    let prefs_path = cli
        .prefs
        .or(env_config.prefs_path)
        .or_else(default_prefs_path)
        .ok_or_else(|| TranslationError::Config("cannot locate a preference file".to_string()))?;
    let store = FileStore::open(&prefs_path)?;

    let input = cli.input.unwrap_or_else(|| "-".to_string());
    let input_data = read_input(&input)?;

    let options = LocalizeOptions {
        encoding: cli.encoding,
        locale: cli.locale.or(env_config.locale),
        toggle: cli.toggle,
        viewport_width: cli.width,
    };
    let localized = localize_document(&input_data, config, store, &options)?;
    tracing::info!(
        locale = %localized.locale,
        written = localized.report.nodes_written,
        prefs = %prefs_path.display(),
        "本地化完成"
    );

    match cli.output {
        Some(output) if output.as_os_str() != "-" => {
            fs::write(&output, &localized.data)?;
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&localized.data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn default_prefs_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dom-i18n")
        .map(|dirs| dirs.config_dir().join(DEFAULT_PREFS_FILE))
}

fn read_input(input: &str) -> io::Result<Vec<u8>> {
    if input == "-" {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        let expanded = shellexpand::tilde(input);
        fs::read(&*expanded)
    }
}
