mod discord;

pub use discord::DiscordSink;

use crate::presence::PresencePayload;

/// Somewhere a presence payload can be broadcast to.
pub trait PresenceSink: Send + Sync {
    /// Returns the name of this sink (for logging)
    fn name(&self) -> &'static str;

    /// Show `payload`. Delivery happens in the background.
    fn publish(&self, payload: &PresencePayload);

    /// Clear the presence and release the connection. Publishing afterwards
    /// does nothing.
    fn close(&self);
}
