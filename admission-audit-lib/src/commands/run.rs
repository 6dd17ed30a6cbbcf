//! Command dispatch logic for admission-audit

use super::{CheckArgs, InitArgs, ValidateArgs, check_requests, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "admission-audit", author, version, long_about = None)]
#[command(about = "Evaluate Kubernetes admission requests against CEL policy rules")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: AuditSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuditSubcommand {
    /// Evaluate admission request files and decide report eligibility
    Check(Box<CheckArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        AuditSubcommand::Check(check_args) => check_requests(host, check_args).await,
        AuditSubcommand::Init(init_args) => init_config(host, init_args),
        AuditSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
