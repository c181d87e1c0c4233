use serenity::all::{MessageId, RoleId};

use crate::{
    common::duration::format_duration,
    models::{
        giveaway::{Entrant, GiveawayRecord, ENDED_GIVEAWAY_COLOR},
        message::{GiveawayEmbed, GiveawayMessage, MessageKey},
    },
    store::templates::MessageTemplates,
};

fn role_mentions(roles: &[RoleId]) -> String {
    roles
        .iter()
        .map(|role| format!("<@&{role}>"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn winner_mentions(winners: &[Entrant]) -> String {
    winners
        .iter()
        .map(Entrant::mention)
        .collect::<Vec<_>>()
        .join(", ")
}

fn plural(count: usize) -> String {
    if count > 1 { "s" } else { "" }.to_string()
}

/// The body shared by the live and the edited entry message.
fn entry_description(templates: &MessageTemplates, record: &GiveawayRecord) -> String {
    let guild = Some(record.guild_id);
    let rules = &record.rules;

    let mut description = format!("**{}**\n\n", record.prize);
    description += &templates.render(guild, MessageKey::GiveawayEnterPrompt, &[]);
    description += &templates.render(
        guild,
        MessageKey::GiveawayEmbedTimeRemaining,
        &[("end_timestamp", (record.end_time / 1000).to_string())],
    );
    description += &templates.render(
        guild,
        MessageKey::GiveawayEmbedWinnersCount,
        &[("winners_count", record.winners_count.to_string())],
    );
    description += &templates.render(
        guild,
        MessageKey::GiveawayEmbedHostedBy,
        &[("host_id", record.host_id.to_string())],
    );

    if let Some(role_id) = rules.required_role {
        description += &templates.render(
            guild,
            MessageKey::GiveawayEmbedReqRole,
            &[("role_id", role_id.to_string())],
        );
    }
    if !rules.required_roles_all.is_empty() {
        description += &templates.render(
            guild,
            MessageKey::GiveawayEmbedReqRolesAll,
            &[("role_mentions", role_mentions(&rules.required_roles_all))],
        );
    }
    if !rules.blacklisted_roles.is_empty() {
        description += &templates.render(
            guild,
            MessageKey::GiveawayEmbedBlacklistRoles,
            &[("role_mentions", role_mentions(&rules.blacklisted_roles))],
        );
    }
    if let Some(duration) = rules.min_server_duration_ms.filter(|ms| *ms > 0) {
        description += &templates.render(
            guild,
            MessageKey::GiveawayEmbedMinServerAge,
            &[("duration", format_duration(duration, true))],
        );
    }
    if let Some(duration) = rules.min_account_duration_ms.filter(|ms| *ms > 0) {
        description += &templates.render(
            guild,
            MessageKey::GiveawayEmbedMinAccountAge,
            &[("duration", format_duration(duration, true))],
        );
    }

    description
}

pub fn entry_message(templates: &MessageTemplates, record: &GiveawayRecord) -> GiveawayMessage {
    let guild = Some(record.guild_id);
    GiveawayMessage::embed(GiveawayEmbed {
        title: templates.render(guild, MessageKey::GiveawayStartEmbedTitle, &[]),
        description: entry_description(templates, record),
        color: record.embed_color,
        image_url: record.image_url.clone(),
        thumbnail_url: None,
        footer: Some(templates.render(guild, MessageKey::GiveawayFooterEndsAt, &[])),
        timestamp_ms: Some(record.end_time),
    })
}

/// The entry message once the giveaway is over: the prompt and countdown
/// are replaced by the ended notice.
pub fn ended_entry_message(
    templates: &MessageTemplates,
    record: &GiveawayRecord,
    ended_at_ms: i64,
) -> GiveawayMessage {
    let guild = Some(record.guild_id);
    let enter_prompt = templates.render(guild, MessageKey::GiveawayEnterPrompt, &[]);
    let ended_prompt = templates.render(guild, MessageKey::GiveawayEndedPrompt, &[]);
    let countdown = templates.render(
        guild,
        MessageKey::GiveawayEmbedTimeRemaining,
        &[("end_timestamp", (record.end_time / 1000).to_string())],
    );

    let description = entry_description(templates, record)
        .replace(&countdown, "")
        .replace(&enter_prompt, &ended_prompt);

    GiveawayMessage::embed(GiveawayEmbed {
        title: templates.render(guild, MessageKey::GiveawayStartEmbedTitle, &[]),
        description,
        color: ENDED_GIVEAWAY_COLOR,
        image_url: record.image_url.clone(),
        thumbnail_url: None,
        footer: Some(templates.render(guild, MessageKey::GiveawayFooterEndedAt, &[])),
        timestamp_ms: Some(ended_at_ms),
    })
}

fn announcement(
    templates: &MessageTemplates,
    record: &GiveawayRecord,
    entry_id: MessageId,
    winners: &[Entrant],
    keys: (MessageKey, MessageKey, MessageKey),
    now_ms: i64,
) -> GiveawayMessage {
    let guild = Some(record.guild_id);
    let (title, description, content) = keys;
    let placeholders = [
        ("prize", record.prize.clone()),
        ("winner_mentions", winner_mentions(winners)),
        ("host_id", record.host_id.to_string()),
        ("s_plural", plural(winners.len())),
        ("message_id", entry_id.to_string()),
    ];

    GiveawayMessage::embed(GiveawayEmbed {
        title: templates.render(guild, title, &placeholders),
        description: templates.render(guild, description, &placeholders),
        color: record.embed_color,
        image_url: None,
        thumbnail_url: record.image_url.clone(),
        footer: Some(templates.render(guild, MessageKey::GiveawayFooterId, &placeholders)),
        timestamp_ms: Some(now_ms),
    })
    .with_content(templates.render(guild, content, &placeholders))
}

pub fn winner_announcement(
    templates: &MessageTemplates,
    record: &GiveawayRecord,
    entry_id: MessageId,
    winners: &[Entrant],
    now_ms: i64,
) -> GiveawayMessage {
    announcement(
        templates,
        record,
        entry_id,
        winners,
        (
            MessageKey::GiveawayEndedEmbedTitle,
            MessageKey::GiveawayWinnerAnnouncementEmbedDesc,
            MessageKey::GiveawayWinnerAnnouncementMsg,
        ),
        now_ms,
    )
}

pub fn reroll_announcement(
    templates: &MessageTemplates,
    record: &GiveawayRecord,
    entry_id: MessageId,
    winners: &[Entrant],
    now_ms: i64,
) -> GiveawayMessage {
    announcement(
        templates,
        record,
        entry_id,
        winners,
        (
            MessageKey::GiveawayRerolledEmbedTitle,
            MessageKey::GiveawayRerolledWinnerAnnouncementEmbedDesc,
            MessageKey::GiveawayRerolledWinnerAnnouncementMsg,
        ),
        now_ms,
    )
}

pub fn no_entries_notice(templates: &MessageTemplates, record: &GiveawayRecord) -> GiveawayMessage {
    GiveawayMessage::text(templates.render(
        Some(record.guild_id),
        MessageKey::GiveawayEndedNoEntriesMsg,
        &[("prize", record.prize.clone())],
    ))
}

pub fn end_failure_notice(
    templates: &MessageTemplates,
    record: &GiveawayRecord,
    entry_id: MessageId,
) -> GiveawayMessage {
    GiveawayMessage::text(templates.render(
        Some(record.guild_id),
        MessageKey::ErrorEndingGiveawayGeneric,
        &[
            ("prize", record.prize.clone()),
            ("message_id", entry_id.to_string()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use serenity::all::{ChannelId, GuildId, UserId};

    use super::*;
    use crate::models::giveaway::{EligibilityRules, Phase};

    fn record() -> GiveawayRecord {
        GiveawayRecord {
            id: "giveaway_1".to_string(),
            phase: Phase::Active {
                entry_id: MessageId::new(50),
            },
            guild_id: GuildId::new(1),
            channel_id: ChannelId::new(2),
            prize: "Keyboard".to_string(),
            winners_count: 2,
            host_id: UserId::new(3),
            start_time: 0,
            end_time: 7_200_000,
            duration_ms: 7_200_000,
            rules: EligibilityRules {
                required_role: Some(RoleId::new(10)),
                blacklisted_roles: vec![RoleId::new(11), RoleId::new(12)],
                min_account_duration_ms: Some(86_400_000),
                ..Default::default()
            },
            image_url: Some("https://example.com/prize.png".to_string()),
            embed_color: 0x123456,
        }
    }

    #[test]
    fn test_entry_message_lists_rules() {
        let templates = MessageTemplates::in_memory();
        let message = entry_message(&templates, &record());
        let embed = message.embed.unwrap();

        assert!(embed.description.starts_with("**Keyboard**"));
        assert!(embed.description.contains("<t:7200:R>"));
        assert!(embed.description.contains("Required role: <@&10>"));
        assert!(embed.description.contains("<@&11>, <@&12>"));
        assert!(embed.description.contains("Min. account age: 1d"));
        assert!(!embed.description.contains("Min. server membership"));
        assert_eq!(embed.color, 0x123456);
        assert_eq!(embed.image_url.as_deref(), Some("https://example.com/prize.png"));
    }

    #[test]
    fn test_ended_message_drops_the_countdown() {
        let templates = MessageTemplates::in_memory();
        let embed = ended_entry_message(&templates, &record(), 9_000_000)
            .embed
            .unwrap();

        assert!(!embed.description.contains("Time remaining"));
        assert!(!embed.description.contains("React with"));
        assert!(embed.description.contains("This giveaway has ended."));
        assert_eq!(embed.color, ENDED_GIVEAWAY_COLOR);
    }

    #[test]
    fn test_winner_announcement_mentions_everyone() {
        let templates = MessageTemplates::in_memory();
        let winners = vec![
            Entrant {
                user_id: UserId::new(7),
                bot: false,
            },
            Entrant {
                user_id: UserId::new(8),
                bot: false,
            },
        ];
        let message = winner_announcement(&templates, &record(), MessageId::new(50), &winners, 0);

        assert_eq!(
            message.content.as_deref(),
            Some("Congratulations <@7>, <@8>! You won **Keyboard**!")
        );
        let embed = message.embed.unwrap();
        assert!(embed.description.contains("Winners: <@7>, <@8>"));
        assert_eq!(embed.footer.as_deref(), Some("Giveaway ID: 50"));
    }
}
