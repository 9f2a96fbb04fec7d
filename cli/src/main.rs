//! CLI entrypoint for live-reply
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use reply_application::{
    ConversationLogger, LiveMessageSink, NoConversationLogger, StreamConfig, StreamReplyInput,
    StreamReplyUseCase, WriteAnswerUseCase, invoke_completion,
};
use reply_domain::{DEFAULT_SYSTEM_TEXT, LiveMessage, Transcript, build_system_text};
use reply_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, ReplayProvider, SlackMessageSink,
};
use reply_presentation::{Cli, ConsoleMessageSink};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_logging(&cli, &file_config);
    info!("Starting live-reply");

    let issues = file_config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            warn!("Configuration issue: {}", issue);
        }
        bail!("Invalid configuration: {}", issues[0]);
    }

    let mut config = file_config.stream.to_stream_config();
    if let Some(seconds) = cli.timeout {
        config = config.with_timeout_seconds(seconds);
    }
    if cli.no_translate {
        config = config.with_translate_markdown(false);
    }

    let Some(prompt) = cli.prompt.as_deref() else {
        bail!("A prompt is required. See --help.");
    };

    // === Dependency Injection ===
    let (sink, message) = build_sink(&cli, &file_config, &config).await?;
    let logger = build_conversation_logger(&file_config);

    let template = file_config
        .system_prompt
        .as_deref()
        .unwrap_or(DEFAULT_SYSTEM_TEXT);
    let mut transcript = Transcript::with_system(build_system_text(
        template,
        &cli.bot_user_id,
        config.translate_markdown,
    ));
    transcript.push_user(prompt, config.translate_markdown);

    let input = StreamReplyInput::new(message, cli.author.clone());

    if cli.write {
        let answer = match &cli.answer_file {
            Some(path) => read_answer(path)?,
            None => prompt.to_string(),
        };
        let use_case = WriteAnswerUseCase::new(sink, config).with_conversation_logger(logger);
        use_case.execute(input, &mut transcript, &answer).await?;
        return Ok(());
    }

    let provider = match &cli.answer_file {
        Some(path) => ReplayProvider::with_answer(read_answer(path)?),
        None => ReplayProvider::echo(),
    }
    .with_delay(Duration::from_millis(cli.delay_ms));

    let model = file_config.model.to_selector();
    let source = invoke_completion(&provider, transcript.turns(), &model).await;

    let use_case = StreamReplyUseCase::new(sink, config).with_conversation_logger(logger);
    let output = use_case.execute(input, &mut transcript, source).await?;

    info!(
        "Session closed: {:?}, {} updates dispatched ({} failed)",
        output.outcome, output.updates.dispatched, output.updates.failed
    );
    if !output.outcome.is_completed() {
        warn!("Answer did not complete: {:?}", output.outcome);
    }

    Ok(())
}

/// Initialize logging based on verbosity level or configured filter
fn init_logging(cli: &Cli, file_config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match cli.verbose {
        0 => match file_config.logging.level.as_deref() {
            Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
            None => EnvFilter::new("warn"),
        },
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_dir {
        Some(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(log_dir, "live-reply.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false)
                .init();
            Some(guard)
        }
        None => {
            // Keep stdout free for the rendered message
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}

async fn build_sink(
    cli: &Cli,
    file_config: &FileConfig,
    config: &StreamConfig,
) -> Result<(Arc<dyn LiveMessageSink>, LiveMessage)> {
    let Some(channel) = &cli.channel else {
        let sink: Arc<dyn LiveMessageSink> =
            Arc::new(ConsoleMessageSink::new(config.working_marker.clone()).quiet(cli.quiet));
        return Ok((sink, LiveMessage::new("console", "1")));
    };

    let Some(token) = file_config.slack.token() else {
        bail!("slack.bot_token is required when --channel is set");
    };
    let sink = SlackMessageSink::new(file_config.slack.api_base.clone(), token)
        .with_max_retries(file_config.slack.max_retries)
        .with_request_timeout(file_config.slack.request_timeout());

    let ts = match &cli.ts {
        Some(ts) => ts.clone(),
        None => sink
            .post_message(channel, config.working_marker.trim_start())
            .await
            .context("Failed to post the placeholder message")?,
    };
    info!("Rendering into Slack message {} in {}", ts, channel);

    let sink: Arc<dyn LiveMessageSink> = Arc::new(sink);
    Ok((sink, LiveMessage::new(channel.clone(), ts)))
}

fn build_conversation_logger(file_config: &FileConfig) -> Arc<dyn ConversationLogger> {
    file_config
        .logging
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::new)
        .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
        .unwrap_or_else(|| Arc::new(NoConversationLogger))
}

fn read_answer(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answer file {}", path.display()))
}
