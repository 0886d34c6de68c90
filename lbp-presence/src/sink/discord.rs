//! Discord Rich Presence sink using discord-sdk

use std::num::NonZeroU32;
use std::time::Duration;

use discord_sdk::{
    Discord, Subscriptions,
    activity::{ActivityBuilder, Assets, PartyPrivacy},
    wheel::{UserState, Wheel},
};
use tokio::sync::mpsc;

use super::PresenceSink;
use crate::presence::PresencePayload;

/// Timeout for waiting for Discord handshake
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

enum Command {
    Publish(Box<PresencePayload>),
    Close,
}

/// Owns the channel to the background task holding the Discord connection.
pub struct DiscordSink {
    tx: mpsc::UnboundedSender<Command>,
}

impl DiscordSink {
    /// Spawn the background task that connects to the local Discord client.
    /// Payloads published before the handshake finishes are queued.
    pub fn connect(app_id: i64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(Self::run_discord_task(app_id, rx));
        Self { tx }
    }

    async fn run_discord_task(app_id: i64, mut rx: mpsc::UnboundedReceiver<Command>) {
        let connection = match Connection::open(app_id).await {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!("Rich Presence disabled: {}", e);
                return;
            }
        };

        while let Some(command) = rx.recv().await {
            match command {
                Command::Publish(payload) => {
                    if let Err(e) = connection.discord.update_activity(activity(&payload)).await {
                        tracing::debug!("Activity update rejected: {:?}", e);
                    } else {
                        tracing::debug!("Presence sent to Discord");
                    }
                }
                Command::Close => {
                    if let Err(e) = connection.discord.clear_activity().await {
                        tracing::debug!("Activity clear rejected: {:?}", e);
                    }
                    break;
                }
            }
        }

        connection.close().await;
    }
}

#[derive(Debug, thiserror::Error)]
enum HandshakeError {
    #[error("no Discord client to talk to ({0})")]
    Unavailable(discord_sdk::Error),
    #[error("Discord hung up before the handshake finished")]
    Closed,
    #[error("Discord refused the connection ({0})")]
    Refused(String),
    #[error("Discord did not answer within {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// An RPC connection that completed its handshake.
struct Connection {
    discord: Discord,
    // keeps the event spokes alive for the handler
    _wheel: Wheel,
}

impl Connection {
    async fn open(app_id: i64) -> Result<Self, HandshakeError> {
        let (wheel, handler) = Wheel::new(Box::new(|err| {
            tracing::warn!("Discord RPC error: {:?}", err);
        }));
        let mut user_state = wheel.user();

        let discord = Discord::new(app_id, Subscriptions::ACTIVITY, Box::new(handler))
            .map_err(HandshakeError::Unavailable)?;
        tracing::info!(app_id, "Waiting for the Discord handshake");

        tokio::time::timeout(HANDSHAKE_TIMEOUT, user_state.0.changed())
            .await
            .map_err(|_| HandshakeError::TimedOut(HANDSHAKE_TIMEOUT))?
            .map_err(|_| HandshakeError::Closed)?;

        let username = match &*user_state.0.borrow() {
            UserState::Connected(user) => user.username.clone(),
            UserState::Disconnected(err) => return Err(HandshakeError::Refused(err.to_string())),
        };
        tracing::info!("Rich Presence connected as {}", username);

        Ok(Self {
            discord,
            _wheel: wheel,
        })
    }

    async fn close(self) {
        self.discord.disconnect().await;
        tracing::info!("Rich Presence disconnected");
    }
}

/// Image key and hover text for one asset slot. Nothing is shown without an
/// image, and an empty caption is left out.
fn asset(image: &str, text: &str) -> Option<(String, Option<String>)> {
    if image.is_empty() {
        return None;
    }
    Some((image.to_string(), Some(text.to_string()).filter(|t| !t.is_empty())))
}

fn activity(payload: &PresencePayload) -> ActivityBuilder {
    let mut assets = Assets::default();
    if let Some((image, text)) = asset(&payload.large_image, &payload.large_text) {
        assets = assets.large(image, text);
    }
    if let Some((image, text)) = asset(&payload.small_image, &payload.small_text) {
        assets = assets.small(image, text);
    }

    // a zero size means no room, which Discord cannot display
    ActivityBuilder::new()
        .details(payload.details.clone())
        .state(payload.state.clone())
        .assets(assets)
        .start_timestamp(payload.start)
        .party(
            payload.party.id.clone(),
            NonZeroU32::new(payload.party.size),
            NonZeroU32::new(payload.party.max),
            PartyPrivacy::Private,
        )
}

impl PresenceSink for DiscordSink {
    fn name(&self) -> &'static str {
        "Discord"
    }

    fn publish(&self, payload: &PresencePayload) {
        let _ = self.tx.send(Command::Publish(Box::new(payload.clone())));
    }

    fn close(&self) {
        let _ = self.tx.send(Command::Close);
    }
}
