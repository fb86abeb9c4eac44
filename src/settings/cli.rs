use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Per-user login session limit service")]
pub struct Cli {
    /// Path to a settings file; defaults to the build profile's file.
    #[arg(long)]
    pub settings: Option<String>,
}
