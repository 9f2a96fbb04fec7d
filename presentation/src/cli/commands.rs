//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for live-reply
#[derive(Parser, Debug)]
#[command(name = "live-reply")]
#[command(author, version, about = "Stream an AI answer into a live chat message")]
#[command(long_about = r#"
live-reply streams a completion into a single chat message, editing it in
place as fragments arrive and replacing it with the finished answer.

Without --channel the message is drawn in the terminal. With --channel the
message is posted to Slack (or --ts names an existing one) and edited there.

Configuration files are loaded from (in priority order):
1. LIVE_REPLY_<SECTION>__<KEY>             Environment overrides
2. --config <path>                         Explicit config file
3. ./live-reply.toml                       Project-level config
4. ~/.config/live-reply/config.toml        Global config

Example:
  live-reply "Explain *ownership* in one paragraph"
  live-reply --answer-file answer.md --delay-ms 80 "ignored prompt"
  live-reply --channel C0123 --write "Deployment finished."
"#)]
pub struct Cli {
    /// The user's message (echoed back unless --answer-file is given)
    pub prompt: Option<String>,

    /// Replay the answer from this file instead of echoing the prompt
    #[arg(long, value_name = "PATH")]
    pub answer_file: Option<PathBuf>,

    /// Pause between replayed fragments, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 40)]
    pub delay_ms: u64,

    /// Render the answer in one write instead of streaming it
    #[arg(long)]
    pub write: bool,

    /// Slack channel to render into
    #[arg(long, value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// Timestamp of an existing Slack message to edit
    #[arg(long, value_name = "TS", requires = "channel")]
    pub ts: Option<String>,

    /// Bot user id substituted into the system prompt
    #[arg(long, value_name = "USER", default_value = "U0LIVEREPLY")]
    pub bot_user_id: String,

    /// User the answer is addressed to
    #[arg(long, value_name = "USER", default_value = "local")]
    pub author: String,

    /// Session deadline in seconds (overrides config)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Pass markup through untranslated
    #[arg(long)]
    pub no_translate: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the final answer
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_slack_target() {
        let cli = Cli::try_parse_from([
            "live-reply",
            "--channel",
            "C0123",
            "--ts",
            "1700000000.000100",
            "-vv",
            "hello",
        ])
        .unwrap();
        assert_eq!(cli.channel.as_deref(), Some("C0123"));
        assert_eq!(cli.ts.as_deref(), Some("1700000000.000100"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.prompt.as_deref(), Some("hello"));
        assert_eq!(cli.delay_ms, 40);
    }

    #[test]
    fn test_ts_requires_channel() {
        let result = Cli::try_parse_from(["live-reply", "--ts", "1700000000.000100", "hi"]);
        assert!(result.is_err());
    }
}
