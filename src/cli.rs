// Command-line definition: subcommands, their flags and the hidden endpoint
// overrides used to point the client at another server.

use crate::api::{Endpoints, PASTE_API_URL, RELEASE_ARTIFACT_URL, RELEASE_MANIFEST_URL};
use crate::config::EXPIRATIONS;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pasteup",
    version,
    about = "Upload text or files to Pastebin",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Paste API endpoint
    #[arg(long, global = true, hide = true, env = "PASTEUP_API_URL", default_value = PASTE_API_URL)]
    pub api_url: String,

    /// Release manifest used by `update`
    #[arg(long, global = true, hide = true, env = "PASTEUP_MANIFEST_URL", default_value = RELEASE_MANIFEST_URL)]
    pub manifest_url: String,

    /// Release artifact downloaded by `update`
    #[arg(long, global = true, hide = true, env = "PASTEUP_ARTIFACT_URL", default_value = RELEASE_ARTIFACT_URL)]
    pub artifact_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            paste_api: self.api_url.clone(),
            release_manifest: self.manifest_url.clone(),
            release_artifact: self.artifact_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure API key and defaults
    Init {
        /// Pastebin developer API key (prompted when omitted)
        #[arg(long)]
        api_key: Option<String>,
        /// Default visibility: 0 = public, 1 = unlisted, 2 = private
        #[arg(long)]
        private: Option<String>,
        /// Default expiration: N, 10M, 1H, 1D, 1W, 2W, 1M, 6M, 1Y
        #[arg(long)]
        expire: Option<String>,
    },
    /// Upload text or a file to Pastebin
    #[command(alias = "upload")]
    Up {
        /// Path to a file to upload
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Inline text to upload
        #[arg(short, long)]
        text: Option<String>,
        /// Title of the paste
        #[arg(long)]
        title: Option<String>,
        /// 0 = public, 1 = unlisted, 2 = private
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
        private: Option<u8>,
        /// Expiration time (N, 10M, 1H, 1D, ...)
        #[arg(long, value_parser = PossibleValuesParser::new(EXPIRATIONS.iter().copied()))]
        expire: Option<String>,
    },
    /// Show current saved configuration
    ShowConfig,
    /// Check for a newer release and install it
    Update,
    /// Show usage
    Help,
}
