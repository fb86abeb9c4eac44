//! Settings are read from a TOML file, `settings/dev.toml` or
//! `settings/release.toml` unless `--settings` names another.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
