// UI layer: dispatches each subcommand, runs the interactive `init` prompts
// with `dialoguer`, shows spinners during network calls and prints colored
// results. All decisions are made by the library modules; this file only
// collects input and reports outcomes.

use crate::api::{http_client, Endpoints, PasteClient};
use crate::cli::{Cli, Commands};
use crate::config::{ConfigStore, InitAnswers, DEFAULT_EXPIRATION, DEFAULT_VISIBILITY};
use crate::error::PasteError;
use crate::paste::{ContentSource, PasteOptions, PasteUploader};
use crate::update::{UpdateChecker, UpdateOutcome};
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run one invocation of the CLI against the default config location.
pub fn run(cli: Cli) -> Result<()> {
    let endpoints = cli.endpoints();
    match cli.command {
        Commands::Init {
            api_key,
            private,
            expire,
        } => handle_init(&ConfigStore::default_location()?, api_key, private, expire),
        Commands::Up {
            file,
            text,
            title,
            private,
            expire,
        } => {
            let source = ContentSource::resolve(file, text)?;
            let options = PasteOptions {
                title,
                private,
                expire,
            };
            handle_upload(&ConfigStore::default_location()?, &endpoints, &source, &options)
        }
        Commands::ShowConfig => handle_show_config(&ConfigStore::default_location()?),
        Commands::Update => handle_update(&endpoints),
        Commands::Help => {
            print_usage();
            Ok(())
        }
    }
}

/// Prompt for whatever was not given on the command line, validate, save.
pub fn handle_init(
    store: &ConfigStore,
    api_key: Option<String>,
    private: Option<String>,
    expire: Option<String>,
) -> Result<()> {
    println!("=== pasteup init ===");
    let answers = InitAnswers {
        api_key: match api_key {
            Some(key) => key,
            None => Input::new().with_prompt("Pastebin API key").interact_text()?,
        },
        visibility: match private {
            Some(v) => v,
            None => Input::new()
                .with_prompt("Default visibility (0 = public, 1 = unlisted, 2 = private)")
                .default(DEFAULT_VISIBILITY.to_string())
                .interact_text()?,
        },
        expire: match expire {
            Some(e) => e,
            None => Input::new()
                .with_prompt("Default expiration (e.g. N, 10M, 1H, 1D)")
                .default(DEFAULT_EXPIRATION.to_string())
                .interact_text()?,
        },
    };

    let config = answers.validate()?;
    store
        .save(&config)
        .with_context(|| format!("Failed to write {}", store.path().display()))?;
    println!("{}", format!("✔ Config saved to {}", store.path().display()).green());
    Ok(())
}

/// Upload one paste and print its URL.
pub fn handle_upload(
    store: &ConfigStore,
    endpoints: &Endpoints,
    source: &ContentSource,
    options: &PasteOptions,
) -> Result<()> {
    let client = PasteClient::new(http_client()?, endpoints.paste_api.clone());
    let uploader = PasteUploader::new(store.clone(), client);

    let spinner = spinner("Uploading...");
    let result = uploader.upload(source, options);
    spinner.finish_and_clear();

    let url = result?;
    println!("{}", "✔ Paste created:".green());
    println!("{}", url);
    Ok(())
}

/// Print the stored configuration as pretty JSON.
pub fn handle_show_config(store: &ConfigStore) -> Result<()> {
    let config = store.load()?;
    let pretty = serde_json::to_string_pretty(&config).context("Serializing config")?;
    println!("{}", pretty);
    Ok(())
}

/// Check the release manifest and replace the running executable if a
/// newer release is published.
pub fn handle_update(endpoints: &Endpoints) -> Result<()> {
    let target = std::env::current_exe().context("Locating the running executable")?;
    let checker = UpdateChecker::new(
        http_client()?,
        endpoints.release_manifest.clone(),
        endpoints.release_artifact.clone(),
        target,
    );

    println!("Checking for updates...");
    let spinner = spinner("Contacting release server...");
    let result = checker.check_and_update(VERSION);
    spinner.finish_and_clear();

    match result? {
        UpdateOutcome::UpToDate { version } => {
            println!("{}", format!("✔ You already have the latest version ({}).", version).green());
        }
        UpdateOutcome::Updated { from, to, backup } => {
            println!("{}", format!("New version installed: {} (you had {})", to, from).yellow());
            println!("Backup saved as {}", backup.display());
            println!("{}", "✔ Updated successfully! Restart the tool to use the new version.".green());
        }
    }
    Ok(())
}

/// Static usage text for the `help` command.
pub fn print_usage() {
    println!("{}", "pasteup - Pastebin CLI uploader".cyan().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  pasteup [COMMAND] [OPTIONS]");
    println!();
    println!("{}", "Commands:".yellow());
    println!("  init         Configure API key and defaults");
    println!("  up           Upload text or file to Pastebin (alias: upload)");
    println!("  show-config  Show current saved configuration");
    println!("  update       Check for a new release and install it");
    println!("  help         Show this help message");
    println!();
    println!("{}", "Upload Options:".yellow());
    println!("  --file, -f      Path to a file to upload");
    println!("  --text, -t      Inline text to upload");
    println!("  --title         Title of the paste (optional)");
    println!("  --private       0 = public, 1 = unlisted, 2 = private");
    println!("  --expire        Expiration time (10M, 1H, 1D, N, etc.)");
    println!();
    println!("{}", "Examples:".yellow());
    println!("  pasteup init");
    println!("  pasteup up -t \"Hello world\" --title MyPaste");
    println!("  pasteup up -f script.py --private 0");
    println!();
    println!("{}", "Documentation:".yellow());
    println!("  https://pastebin.com/doc_api");
}

/// Print a failed invocation on stderr. A missing config gets a hint on how
/// to create one.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{}", format!("✘ {:#}", err).red());
    if let Some(PasteError::ConfigMissing { .. }) = err.downcast_ref::<PasteError>() {
        eprintln!("{}", "Run `pasteup init` first.".yellow());
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
