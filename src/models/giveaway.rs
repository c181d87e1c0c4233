use serde_derive::{Deserialize, Serialize};
use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};

pub const DEFAULT_GIVEAWAY_COLOR: u32 = 0xFF5757;
pub const ENDED_GIVEAWAY_COLOR: u32 = 0x2F3136;
pub const ENTRY_REACTION: &str = "🎁";

/// Where a giveaway is in its lifecycle. Only the fields valid for a phase
/// are carried by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for its start time; the record id doubles as the schedule id.
    Scheduled,
    Active {
        entry_id: MessageId,
    },
    /// `entry_id` is `None` when a scheduled giveaway was abandoned before
    /// its entry message could be posted.
    Ended {
        entry_id: Option<MessageId>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRules {
    #[serde(default)]
    pub required_role: Option<RoleId>,
    #[serde(default)]
    pub required_roles_all: Vec<RoleId>,
    #[serde(default)]
    pub blacklisted_roles: Vec<RoleId>,
    #[serde(default)]
    pub min_server_duration_ms: Option<i64>,
    #[serde(default)]
    pub min_account_duration_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveawayRecord {
    pub id: String,
    pub phase: Phase,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub prize: String,
    pub winners_count: u32,
    pub host_id: UserId,
    pub start_time: i64,
    pub end_time: i64,
    pub duration_ms: i64,
    #[serde(default)]
    pub rules: EligibilityRules,
    #[serde(default)]
    pub image_url: Option<String>,
    pub embed_color: u32,
}

impl GiveawayRecord {
    pub fn is_scheduled(&self) -> bool {
        matches!(self.phase, Phase::Scheduled)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended { .. })
    }

    pub fn entry_id(&self) -> Option<MessageId> {
        match self.phase {
            Phase::Scheduled => None,
            Phase::Active { entry_id } => Some(entry_id),
            Phase::Ended { entry_id } => entry_id,
        }
    }

    pub fn schedule_id(&self) -> Option<&str> {
        match self.phase {
            Phase::Scheduled => Some(&self.id),
            _ => None,
        }
    }
}

/// A user who reacted to an entry message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entrant {
    pub user_id: UserId,
    pub bot: bool,
}

impl Entrant {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

/// Everything needed to create a giveaway, shared by `start` and `schedule`.
#[derive(Debug, Clone)]
pub struct GiveawayParams {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub host_id: UserId,
    pub prize: String,
    pub winners_count: i64,
    pub duration_ms: i64,
    pub rules: EligibilityRules,
    pub image_url: Option<String>,
    pub embed_color: Option<u32>,
}

/// Fields left as `None` are untouched by an edit. The nested options clear
/// the value when set to `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct GiveawayChanges {
    pub prize: Option<String>,
    pub winners_count: Option<i64>,
    pub extend_by_ms: Option<i64>,
    pub required_role: Option<Option<RoleId>>,
    pub required_roles_all: Option<Vec<RoleId>>,
    pub blacklisted_roles: Option<Vec<RoleId>>,
    pub min_server_duration_ms: Option<Option<i64>>,
    pub min_account_duration_ms: Option<Option<i64>>,
    pub image_url: Option<Option<String>>,
    pub embed_color: Option<u32>,
}

impl GiveawayChanges {
    pub fn requested_fields(&self) -> Vec<&'static str> {
        [
            ("prize", self.prize.is_some()),
            ("winners_count", self.winners_count.is_some()),
            ("extend_by", self.extend_by_ms.is_some()),
            ("required_role", self.required_role.is_some()),
            ("required_roles_all", self.required_roles_all.is_some()),
            ("blacklisted_roles", self.blacklisted_roles.is_some()),
            ("min_server_duration", self.min_server_duration_ms.is_some()),
            ("min_account_duration", self.min_account_duration_ms.is_some()),
            ("image_url", self.image_url.is_some()),
            ("embed_color", self.embed_color.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, requested)| requested.then_some(name))
        .collect()
    }
}

/// Parses a comma separated list of role ids, ignoring blanks and garbage.
pub fn parse_role_list(string: &str) -> Vec<RoleId> {
    string
        .split(',')
        .map(str::trim)
        .map(|id| id.trim_start_matches("<@&").trim_end_matches('>'))
        .filter_map(|id| id.parse::<u64>().ok())
        .filter(|id| *id != 0)
        .map(RoleId::new)
        .collect()
}

/// Accepts `#RRGGBB` or `RRGGBB`.
pub fn parse_color(string: &str) -> Option<u32> {
    let hex = string.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
