use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};

use crate::{
    error::PlatformError,
    models::{giveaway::Entrant, message::GiveawayMessage},
};

/// The chat platform as seen by the giveaway lifecycle.
#[async_trait::async_trait]
pub trait Announcer: Send + Sync {
    /// Posts the entry message, adds the entry reaction and returns the id
    /// of the posted message.
    async fn send_entry_message(
        &self,
        channel_id: ChannelId,
        message: &GiveawayMessage,
    ) -> Result<MessageId, PlatformError>;

    /// Everyone who reacted with `reaction`. Empty if nobody did.
    async fn fetch_reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        reaction: &str,
    ) -> Result<Vec<Entrant>, PlatformError>;

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message: &GiveawayMessage,
    ) -> Result<(), PlatformError>;

    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: &GiveawayMessage,
    ) -> Result<(), PlatformError>;
}

/// Member data needed by the eligibility rules.
#[async_trait::async_trait]
pub trait MemberInfoProvider: Send + Sync {
    /// `None` when the member exists but the join time is unknown.
    async fn join_timestamp(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Option<i64>, PlatformError>;

    async fn account_creation_timestamp(&self, user_id: UserId) -> Result<i64, PlatformError>;

    async fn has_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<bool, PlatformError>;

    async fn role_exists(&self, guild_id: GuildId, role_id: RoleId) -> Result<bool, PlatformError>;
}
