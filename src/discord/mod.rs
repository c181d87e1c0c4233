use std::sync::Arc;

use serenity::{
    all::{ChannelId, GuildId, MessageId, ReactionType, RoleId, Timestamp, UserId},
    builder::{CreateAllowedMentions, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage},
    http::Http,
};
use tracing::{debug, warn};

use crate::{
    error::PlatformError,
    giveaway::announcer::{Announcer, MemberInfoProvider},
    models::{
        giveaway::{Entrant, ENTRY_REACTION},
        message::{GiveawayEmbed, GiveawayMessage},
    },
};

const REACTION_PAGE_SIZE: u8 = 100;

/// Discord, reached through serenity's HTTP client.
pub struct SerenityAnnouncer {
    http: Arc<Http>,
}

impl SerenityAnnouncer {
    pub fn new(http: Arc<Http>) -> Self {
        SerenityAnnouncer { http }
    }
}

fn build_embed(embed: &GiveawayEmbed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .color(embed.color);
    if let Some(image_url) = &embed.image_url {
        builder = builder.image(image_url);
    }
    if let Some(thumbnail_url) = &embed.thumbnail_url {
        builder = builder.thumbnail(thumbnail_url);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(timestamp) = embed
        .timestamp_ms
        .and_then(|millis| Timestamp::from_unix_timestamp(millis / 1000).ok())
    {
        builder = builder.timestamp(timestamp);
    }
    builder
}

fn build_message(message: &GiveawayMessage) -> CreateMessage {
    let mut builder = CreateMessage::new();
    if let Some(content) = &message.content {
        builder = builder.content(content);
    }
    if let Some(embed) = &message.embed {
        builder = builder.embed(build_embed(embed));
    }
    if message.quiet {
        builder = builder.allowed_mentions(CreateAllowedMentions::new());
    }
    builder
}

fn entry_reaction() -> ReactionType {
    ReactionType::Unicode(ENTRY_REACTION.to_string())
}

#[async_trait::async_trait]
impl Announcer for SerenityAnnouncer {
    async fn send_entry_message(
        &self,
        channel_id: ChannelId,
        message: &GiveawayMessage,
    ) -> Result<MessageId, PlatformError> {
        let posted = channel_id
            .send_message(&self.http, build_message(message))
            .await?;
        posted.react(&self.http, entry_reaction()).await?;
        debug!("Posted entry message {} in channel {channel_id}", posted.id);
        Ok(posted.id)
    }

    async fn fetch_reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction: &str,
    ) -> Result<Vec<Entrant>, PlatformError> {
        let reaction = ReactionType::Unicode(reaction.to_string());
        let mut entrants = vec![];
        let mut after: Option<UserId> = None;

        loop {
            let page = channel_id
                .reaction_users(
                    &self.http,
                    message_id,
                    reaction.clone(),
                    Some(REACTION_PAGE_SIZE),
                    after,
                )
                .await?;
            let page_len = page.len();
            after = page.last().map(|user| user.id);
            entrants.extend(page.into_iter().map(|user| Entrant {
                user_id: user.id,
                bot: user.bot,
            }));

            if page_len < usize::from(REACTION_PAGE_SIZE) {
                break;
            }
        }

        debug!(
            "Fetched {} reactors for message {message_id} in channel {channel_id}",
            entrants.len()
        );
        Ok(entrants)
    }

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message: &GiveawayMessage,
    ) -> Result<(), PlatformError> {
        let mut edit = EditMessage::new();
        if let Some(content) = &message.content {
            edit = edit.content(content);
        }
        if let Some(embed) = &message.embed {
            edit = edit.embed(build_embed(embed));
        }
        channel_id.edit_message(&self.http, message_id, edit).await?;
        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &GiveawayMessage,
    ) -> Result<(), PlatformError> {
        channel_id
            .send_message(&self.http, build_message(message))
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MemberInfoProvider for SerenityAnnouncer {
    async fn join_timestamp(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<i64>, PlatformError> {
        let member = guild_id.member(&self.http, user_id).await?;
        Ok(member
            .joined_at
            .map(|joined| joined.unix_timestamp() * 1000))
    }

    async fn account_creation_timestamp(&self, user_id: UserId) -> Result<i64, PlatformError> {
        Ok(user_id.created_at().unix_timestamp() * 1000)
    }

    async fn has_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<bool, PlatformError> {
        let member = guild_id.member(&self.http, user_id).await?;
        Ok(member.roles.contains(&role_id))
    }

    async fn role_exists(&self, guild_id: GuildId, role_id: RoleId) -> Result<bool, PlatformError> {
        match guild_id.roles(&self.http).await {
            Ok(roles) => Ok(roles.contains_key(&role_id)),
            Err(err) => {
                warn!("Could not fetch the roles of guild {guild_id}. Failed with error: {err}");
                Err(err.into())
            }
        }
    }
}

