//! core command line arguments
use clap::Parser;

/// cmd line args
#[derive(Parser, Default, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// set release environment
    #[arg(
        short,
        long,
        help = "Set release environment (dev, prod)",
        default_value = "dev"
    )]
    pub release_env: String,
    /// Token expiration in minutes
    #[arg(
        short,
        long,
        help = "Set the token expiration limit in minutes.",
        default_value = "60"
    )]
    pub token_timeout: i64,
    /// Application port
    #[arg(long, help = "Set app port", default_value = "7000")]
    pub port: u16,
    /// Auth port
    #[arg(long, help = "Set app auth port", default_value = "7043")]
    pub auth_port: u16,
    /// Social integrations port
    #[arg(
        long,
        help = "Set app social integrations port",
        default_value = "7044"
    )]
    pub social_port: u16,
    /// Resource api host consumed by the client module
    #[arg(
        long,
        help = "Set the resource api host",
        default_value = "http://localhost:7000"
    )]
    pub api_host: String,
    /// Remove all disputes from db on app startup
    #[arg(
        long,
        help = "this will clear disputes from the database",
        default_value = "false"
    )]
    pub clear_disputes: bool,
    /// Rotate the token signing key on app startup
    #[arg(
        long,
        help = "this will invalidate all outstanding auth tokens",
        default_value = "false"
    )]
    pub revoke_tokens: bool,
}
