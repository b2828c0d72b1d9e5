use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,
    /// Create the config file if it does not exist or is broken.
    #[arg(long)]
    pub create_config: bool,
    /// Magnet link or bare content hash to ensure a session for at startup (repeatable).
    #[arg(long = "magnet")]
    pub magnets: Vec<String>,
}
