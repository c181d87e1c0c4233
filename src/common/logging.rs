use std::sync::Arc;

use serenity::all::GuildId;
use tracing::{error, info};

use crate::{
    giveaway::announcer::Announcer,
    models::message::{GiveawayMessage, MessageKey},
    store::{log_channels::LogChannelStore, templates::MessageTemplates},
};

pub const LOG_PREFIX: &str = "[Giveaway Log]";

/// Human readable giveaway events. Everything goes to tracing; guilds with a
/// log channel also get a copy there.
pub struct EventLog {
    log_channels: Arc<LogChannelStore>,
    templates: Arc<MessageTemplates>,
    announcer: Arc<dyn Announcer>,
}

impl EventLog {
    pub fn new(
        log_channels: Arc<LogChannelStore>,
        templates: Arc<MessageTemplates>,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        EventLog {
            log_channels,
            templates,
            announcer,
        }
    }

    pub async fn log(
        &self,
        guild_id: Option<GuildId>,
        key: MessageKey,
        placeholders: &[(&str, String)],
    ) {
        let text = self.templates.render(guild_id, key, placeholders);
        info!("{LOG_PREFIX} {text}");

        let Some(channel_id) = guild_id.and_then(|guild_id| self.log_channels.get(guild_id)) else {
            return;
        };
        let message = GiveawayMessage::text(format!("{LOG_PREFIX} {text}")).quiet();
        if let Err(err) = self.announcer.send_message(channel_id, &message).await {
            error!(
                "Attempted to send a log message to channel {channel_id}, but failed with error: {err}"
            );
        }
    }
}
