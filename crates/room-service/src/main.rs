//! Room Service
//!
//! Runs a fixed conversation through the room and prints the transcript.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment
//! 2. Initialize tracing (logs go to stderr; room output goes to stdout)
//! 3. Spawn the room actor
//! 4. Register Alice, Bob and Carol
//! 5. Alice broadcasts, Bob messages Alice directly, Carol broadcasts
//! 6. Print the transcript and stop the actor
//!
//! Any error is logged and the process exits non-zero.

#![warn(clippy::pedantic)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use room_service::config::{Config, LogFormat, TranscriptFormat};
use room_service::{
    ConsoleParticipant, Member, NotificationSink, Room, RoomActor, RoomActorHandle, StdoutSink,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    init_tracing(
        config
            .as_ref()
            .map_or(LogFormat::Text, |config| config.log_format),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Room service failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let json = format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "room_service=info".into()),
        )
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(config: &Config) -> anyhow::Result<()> {
    info!(
        room = %config.room_name,
        allow_self_direct = config.allow_self_direct,
        mailbox_capacity = config.mailbox_capacity,
        "Configuration loaded successfully"
    );

    let sink: Arc<dyn NotificationSink> = Arc::new(StdoutSink);
    let room = Room::from_config(config, Arc::clone(&sink));
    let cancel_token = CancellationToken::new();
    let (handle, task) = RoomActor::spawn(room, config.mailbox_capacity, cancel_token.clone());

    let result = converse(&handle, &sink, config.transcript_format).await;

    cancel_token.cancel();
    task.await.context("room actor task failed")?;

    result?;
    sink.notify("");
    sink.notify("--- Chat finished ---");

    info!("Room service finished");
    Ok(())
}

async fn join(
    handle: &RoomActorHandle,
    sink: &Arc<dyn NotificationSink>,
    name: &str,
) -> anyhow::Result<Member> {
    Member::join(
        handle,
        Box::new(ConsoleParticipant::new(name, Arc::clone(sink))),
    )
    .await
    .with_context(|| format!("failed to register {name}"))
}

async fn converse(
    handle: &RoomActorHandle,
    sink: &Arc<dyn NotificationSink>,
    format: TranscriptFormat,
) -> anyhow::Result<()> {
    let alice = join(handle, sink, "Alice").await?;
    let bob = join(handle, sink, "Bob").await?;
    let carol = join(handle, sink, "Carol").await?;

    alice
        .send_broadcast("Hola a todos!")
        .await
        .context("Alice broadcast failed")?;
    bob.send_direct("Hola Alice, ¿cómo estás?", &alice)
        .await
        .context("Bob direct message failed")?;
    carol
        .send_broadcast("Hola grupo!")
        .await
        .context("Carol broadcast failed")?;

    let transcript = handle
        .transcript()
        .await
        .context("failed to fetch transcript")?;

    match format {
        TranscriptFormat::Text => {
            sink.notify("");
            for line in transcript.render_text().lines() {
                sink.notify(line);
            }
        }
        TranscriptFormat::Json => {
            sink.notify(
                &transcript
                    .to_json()
                    .context("failed to serialize transcript")?,
            );
        }
    }

    Ok(())
}
