//! Command-line interface definitions for Energy Digest.
//!
//! Every option can be set with a flag or an environment variable. The email
//! settings are only read when `--send-email` is given.

use clap::Parser;

/// Command-line arguments for the digest run.
///
/// # Examples
///
/// ```sh
/// # Print this month's digest so far
/// energy_digest
///
/// # Whole-month window, also written as JSON
/// energy_digest --full-month --json-output-dir ./digests
///
/// # Email the digest
/// EMAIL_SENDER=me@example.com EMAIL_RECEIVER=team@example.com EMAIL_PASSWORD=... \
///     energy_digest --send-email
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Email the digest as HTML instead of only printing it
    #[arg(short, long, env = "SEND_EMAIL")]
    pub send_email: bool,

    /// Cover the whole current month instead of month-to-date
    #[arg(short, long)]
    pub full_month: bool,

    /// Also write the digest as JSON into this directory
    #[arg(short, long, env = "JSON_OUTPUT_DIR")]
    pub json_output_dir: Option<String>,

    /// Sender address
    #[arg(long, env = "EMAIL_SENDER")]
    pub email_sender: Option<String>,

    /// Receiver address
    #[arg(long, env = "EMAIL_RECEIVER")]
    pub email_receiver: Option<String>,

    /// SMTP credential for the sender
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    pub email_password: Option<String>,
}
