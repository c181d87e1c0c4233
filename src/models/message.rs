use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// A rendered message, independent of the chat platform that delivers it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiveawayMessage {
    pub content: Option<String>,
    pub embed: Option<GiveawayEmbed>,
    /// Delivered without pinging anyone it mentions.
    pub quiet: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiveawayEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<String>,
    pub timestamp_ms: Option<i64>,
}

impl GiveawayMessage {
    pub fn text(content: impl Into<String>) -> Self {
        GiveawayMessage {
            content: Some(content.into()),
            embed: None,
            quiet: false,
        }
    }

    pub fn embed(embed: GiveawayEmbed) -> Self {
        GiveawayMessage {
            content: None,
            embed: Some(embed),
            quiet: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

/// Every piece of user facing text. Guilds may override any of them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKey {
    GiveawayStartEmbedTitle,
    GiveawayEnterPrompt,
    GiveawayEmbedTimeRemaining,
    GiveawayEmbedWinnersCount,
    GiveawayEmbedHostedBy,
    GiveawayEmbedReqRole,
    GiveawayEmbedReqRolesAll,
    GiveawayEmbedBlacklistRoles,
    GiveawayEmbedMinServerAge,
    GiveawayEmbedMinAccountAge,
    GiveawayFooterEndsAt,
    GiveawayFooterEndedAt,
    GiveawayFooterId,
    GiveawayEndedPrompt,
    GiveawayEndedEmbedTitle,
    GiveawayWinnerAnnouncementMsg,
    GiveawayWinnerAnnouncementEmbedDesc,
    GiveawayEndedNoEntriesMsg,
    GiveawayRerolledEmbedTitle,
    GiveawayRerolledWinnerAnnouncementMsg,
    GiveawayRerolledWinnerAnnouncementEmbedDesc,
    GiveawayScheduledFailPrefix,
    ErrorEndingGiveawayGeneric,
    GiveawayCreatedEphemeral,
    GiveawayScheduledEphemeral,
    GiveawayEndingEphemeral,
    GiveawayRerolledSuccessEphemeral,
    GiveawayEditedSuccess,
    InfoNoChangesMade,
    WarnGiveawayEditedEmbedFail,
    ErrorInvalidStartTime,
    ErrorInvalidDuration,
    ErrorWinnersCount,
    ErrorInvalidExtensionDuration,
    ErrorExtensionExpired,
    ErrorInvalidColor,
    ErrorGiveawayNotFound,
    ErrorGiveawayAlreadyEnded,
    ErrorGiveawayScheduled,
    ErrorGiveawayNotEndedYet,
    ErrorNoValidEntrantsForReroll,
    ErrorPlatform,
    ErrorNoPermissionToCreateGiveaway,
    ErrorPermissionManageGuild,
    ErrorInvalidLogChannelType,
    LogChannelSet,
    LogChannelCleared,
    CreatorRoleAdded,
    CreatorRoleAlreadyExists,
    CreatorRoleRemoved,
    CreatorRoleNotFoundForRemove,
    CreatorRolesList,
    CreatorRolesListEmpty,
    LogBotReady,
    LogBotJoinedGuild,
    LogGiveawayStartAttempt,
    LogGiveawayStarted,
    LogGiveawayScheduleAttempt,
    LogGiveawayScheduled,
    LogScheduledGiveawayStarted,
    LogScheduledGiveawayInitError,
    LogGiveawayEnded,
    LogEndGiveawayNoValidEntrants,
    LogEndGiveawayError,
    LogGiveawayEditAttempt,
    LogGiveawayEditSuccess,
    LogGiveawayEditEmbedFail,
    LogValidationRoleNotFound,
    LogRerollAttempt,
    LogRerollSuccess,
    LogRerollFailed,
    LogGiveawayRerolledWinners,
    LogRerollGiveawayNoValidEntrants,
    LogRerollGiveawayError,
    LogManualEndAttempt,
    LogManualEndSuccess,
    LogChannelSetLog,
    LogChannelClearedLog,
    LogCreatorRoleAddSuccess,
    LogCreatorRoleAddFailExists,
    LogCreatorRoleRemoveSuccess,
    LogCreatorRoleRemoveFailNotFound,
    LogCreatorRolesViewed,
    LogSlashCommandError,
}

impl MessageKey {
    #[allow(clippy::too_many_lines)]
    pub fn default_text(self) -> &'static str {
        match self {
            MessageKey::GiveawayStartEmbedTitle => "🎉 Giveaway 🎉",
            MessageKey::GiveawayEnterPrompt => "React with 🎁 to enter!",
            MessageKey::GiveawayEmbedTimeRemaining => "\nTime remaining: <t:{end_timestamp}:R>",
            MessageKey::GiveawayEmbedWinnersCount => "\nWinners: {winners_count}",
            MessageKey::GiveawayEmbedHostedBy => "\nHosted by: <@{host_id}>",
            MessageKey::GiveawayEmbedReqRole => "\nRequired role: <@&{role_id}>",
            MessageKey::GiveawayEmbedReqRolesAll => "\nMust have ALL roles: {role_mentions}",
            MessageKey::GiveawayEmbedBlacklistRoles => "\nMust NOT have roles: {role_mentions}",
            MessageKey::GiveawayEmbedMinServerAge => "\nMin. server membership: {duration}",
            MessageKey::GiveawayEmbedMinAccountAge => "\nMin. account age: {duration}",
            MessageKey::GiveawayFooterEndsAt => "Ends at",
            MessageKey::GiveawayFooterEndedAt => "Ended at",
            MessageKey::GiveawayFooterId => "Giveaway ID: {message_id}",
            MessageKey::GiveawayEndedPrompt => "This giveaway has ended.",
            MessageKey::GiveawayEndedEmbedTitle => "🎉 Giveaway Ended 🎉",
            MessageKey::GiveawayWinnerAnnouncementMsg => {
                "Congratulations {winner_mentions}! You won **{prize}**!"
            }
            MessageKey::GiveawayWinnerAnnouncementEmbedDesc => {
                "**{prize}**\nWinner{s_plural}: {winner_mentions}\nHosted by: <@{host_id}>"
            }
            MessageKey::GiveawayEndedNoEntriesMsg => {
                "The giveaway for **{prize}** has ended, but there were no valid entrants."
            }
            MessageKey::GiveawayRerolledEmbedTitle => "🎉 Giveaway Rerolled 🎉",
            MessageKey::GiveawayRerolledWinnerAnnouncementMsg => {
                "🎉 New winner{s_plural} for **{prize}**: {winner_mentions}!"
            }
            MessageKey::GiveawayRerolledWinnerAnnouncementEmbedDesc => {
                "**{prize}**\nNew winner{s_plural}: {winner_mentions}\nHosted by: <@{host_id}>"
            }
            MessageKey::GiveawayScheduledFailPrefix => "[FAILED TO START] ",
            MessageKey::ErrorEndingGiveawayGeneric => {
                "Something went wrong while ending the giveaway for **{prize}** (ID: {message_id}). An administrator can reroll it once the problem is fixed."
            }
            MessageKey::GiveawayCreatedEphemeral => "Giveaway for **{prize}** has started!",
            MessageKey::GiveawayScheduledEphemeral => {
                "Giveaway for **{prize}** scheduled to start <t:{start_timestamp}:R> and run for {duration}."
            }
            MessageKey::GiveawayEndingEphemeral => "Ending the giveaway now...",
            MessageKey::GiveawayRerolledSuccessEphemeral => {
                "Giveaway rerolled. New winners: {winner_mentions}"
            }
            MessageKey::GiveawayEditedSuccess => "Giveaway updated ({changes}).",
            MessageKey::InfoNoChangesMade => "No changes were made to the giveaway.",
            MessageKey::WarnGiveawayEditedEmbedFail => {
                "The giveaway was updated, but its message could not be refreshed."
            }
            MessageKey::ErrorInvalidStartTime => {
                "Invalid start time. Use a format like 10m, 1h or 1d2h."
            }
            MessageKey::ErrorInvalidDuration => {
                "Invalid duration. Use a format like 10m, 1h or 1d2h."
            }
            MessageKey::ErrorWinnersCount => "A giveaway needs at least one winner.",
            MessageKey::ErrorInvalidExtensionDuration => {
                "Invalid extension. Use a positive duration like 30m or 1h."
            }
            MessageKey::ErrorExtensionExpired => {
                "The extended end time would already be in the past."
            }
            MessageKey::ErrorInvalidColor => "Invalid colour. Use a hex colour like #FF5757.",
            MessageKey::ErrorGiveawayNotFound => "That giveaway could not be found.",
            MessageKey::ErrorGiveawayAlreadyEnded => "That giveaway has already ended.",
            MessageKey::ErrorGiveawayScheduled => {
                "That giveaway is scheduled and has not started yet."
            }
            MessageKey::ErrorGiveawayNotEndedYet => "That giveaway has not ended yet.",
            MessageKey::ErrorNoValidEntrantsForReroll => {
                "There are no valid entrants to reroll **{prize}**."
            }
            MessageKey::ErrorPlatform => "Discord could not complete the request: {error_message}",
            MessageKey::ErrorNoPermissionToCreateGiveaway => {
                "You do not have permission to create giveaways in this server."
            }
            MessageKey::ErrorPermissionManageGuild => {
                "You need the Manage Server permission to do this."
            }
            MessageKey::ErrorInvalidLogChannelType => "The log channel must be a text channel.",
            MessageKey::LogChannelSet => "Giveaway events will now be logged to {log_channel}.",
            MessageKey::LogChannelCleared => "The giveaway log channel has been cleared.",
            MessageKey::CreatorRoleAdded => "<@&{role_id}> can now create giveaways.",
            MessageKey::CreatorRoleAlreadyExists => "<@&{role_id}> can already create giveaways.",
            MessageKey::CreatorRoleRemoved => "<@&{role_id}> can no longer create giveaways.",
            MessageKey::CreatorRoleNotFoundForRemove => "<@&{role_id}> is not a creator role.",
            MessageKey::CreatorRolesList => "Roles allowed to create giveaways:\n{role_list}",
            MessageKey::CreatorRolesListEmpty => {
                "No creator roles are set. Only server managers can create giveaways."
            }
            MessageKey::LogBotReady => "Bot is ready with {giveaway_count} giveaways loaded.",
            MessageKey::LogBotJoinedGuild => "Joined guild {guild_name}.",
            MessageKey::LogGiveawayStartAttempt => {
                "<@{user_id}> is starting a giveaway for **{prize}** ({winners_count} winners, duration {duration})."
            }
            MessageKey::LogGiveawayStarted => {
                "<@{host_id}> started a giveaway for **{prize}** (ID: {message_id}), ending <t:{end_timestamp}:F>."
            }
            MessageKey::LogGiveawayScheduleAttempt => {
                "<@{user_id}> is scheduling a giveaway for **{prize}** to start in {start_in} and run for {duration}."
            }
            MessageKey::LogGiveawayScheduled => {
                "<@{host_id}> scheduled a giveaway for **{prize}** (schedule ID: {schedule_id}) starting <t:{start_timestamp}:F>."
            }
            MessageKey::LogScheduledGiveawayStarted => {
                "Scheduled giveaway {schedule_id} for **{prize}** started (ID: {message_id})."
            }
            MessageKey::LogScheduledGiveawayInitError => {
                "Scheduled giveaway {schedule_id} for **{prize}** could not start: {error_message}"
            }
            MessageKey::LogGiveawayEnded => {
                "Giveaway for **{prize}** (ID: {message_id}) ended. Winners: {winner_mentions}"
            }
            MessageKey::LogEndGiveawayNoValidEntrants => {
                "Giveaway for **{prize}** (ID: {message_id}) ended without valid entrants."
            }
            MessageKey::LogEndGiveawayError => {
                "Ending giveaway {message_id} failed: {error_message}"
            }
            MessageKey::LogGiveawayEditAttempt => {
                "<@{user_id}> is editing giveaway {message_id}: {requested}"
            }
            MessageKey::LogGiveawayEditSuccess => {
                "Giveaway {message_id} was edited: {changes}"
            }
            MessageKey::LogGiveawayEditEmbedFail => {
                "Giveaway {message_id} was edited but its message could not be updated: {error_message}"
            }
            MessageKey::LogValidationRoleNotFound => {
                "Required role {role_id} of giveaway {message_id} no longer exists. The role check was skipped while {context} it."
            }
            MessageKey::LogRerollAttempt => {
                "<@{user_id}> is rerolling giveaway {message_id} for {winners_count} winners."
            }
            MessageKey::LogRerollSuccess => {
                "<@{user_id}> rerolled the giveaway for **{prize}** (ID: {message_id}). New winners: {winner_mentions}"
            }
            MessageKey::LogRerollFailed => {
                "<@{user_id}> could not reroll giveaway {message_id}: {reason}"
            }
            MessageKey::LogGiveawayRerolledWinners => {
                "Giveaway for **{prize}** (ID: {message_id}) rerolled. Winners: {winner_mentions}"
            }
            MessageKey::LogRerollGiveawayNoValidEntrants => {
                "Reroll of giveaway {message_id} found no valid entrants."
            }
            MessageKey::LogRerollGiveawayError => {
                "Rerolling giveaway {message_id} failed: {error_message}"
            }
            MessageKey::LogManualEndAttempt => {
                "<@{user_id}> asked to end giveaway {message_id}."
            }
            MessageKey::LogManualEndSuccess => {
                "<@{user_id}> ended the giveaway for **{prize}** (ID: {message_id})."
            }
            MessageKey::LogChannelSetLog => "<@{user_id}> set the log channel to <#{channel_id}>.",
            MessageKey::LogChannelClearedLog => "<@{user_id}> cleared the log channel.",
            MessageKey::LogCreatorRoleAddSuccess => {
                "<@{user_id}> allowed <@&{role_id}> to create giveaways."
            }
            MessageKey::LogCreatorRoleAddFailExists => {
                "<@{user_id}> tried to add <@&{role_id}>, but it is already a creator role."
            }
            MessageKey::LogCreatorRoleRemoveSuccess => {
                "<@{user_id}> removed <@&{role_id}> from the creator roles."
            }
            MessageKey::LogCreatorRoleRemoveFailNotFound => {
                "<@{user_id}> tried to remove <@&{role_id}>, but it is not a creator role."
            }
            MessageKey::LogCreatorRolesViewed => "<@{user_id}> viewed the creator roles: {role_list}",
            MessageKey::LogSlashCommandError => {
                "/{command} by <@{user_id}> failed: {error_message}"
            }
        }
    }
}
