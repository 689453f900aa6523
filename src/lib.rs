// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) parses arguments and hands them to `ui::run`.
//
// Module responsibilities:
// - `config`: the persisted user defaults and `init` validation.
// - `paste`: resolves content and per-call overrides into a request.
// - `api`: HTTP interactions with the paste service and endpoint set.
// - `update`: release manifest lookup and verified self-update.
// - `cli`: command-line definition.
// - `ui`: command dispatch, prompts and terminal output.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod paste;
pub mod ui;
pub mod update;

pub use error::{PasteError, Result};
