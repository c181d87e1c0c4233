use std::{
    collections::HashMap,
    path::PathBuf,
    str::FromStr,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serenity::all::GuildId;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::models::message::MessageKey;

use super::json;

type CustomMessages = HashMap<GuildId, HashMap<String, String>>;

/// Message texts with per-guild overrides on top of the built-in defaults.
pub struct MessageTemplates {
    path: Option<PathBuf>,
    custom: Mutex<CustomMessages>,
}

impl MessageTemplates {
    pub fn load(path: PathBuf) -> Self {
        let custom: CustomMessages = json::load_or_default(&path, "custom messages");
        info!("Loaded custom messages for {} guilds", custom.len());
        MessageTemplates {
            path: Some(path),
            custom: Mutex::new(custom),
        }
    }

    pub fn in_memory() -> Self {
        MessageTemplates {
            path: None,
            custom: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CustomMessages> {
        self.custom.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, custom: &CustomMessages) {
        if let Some(path) = &self.path {
            json::save_logged(path, custom, "custom messages");
        }
    }

    /// The guild's text for `key` (or the default) with every `{name}`
    /// replaced by its value.
    pub fn render(
        &self,
        guild_id: Option<GuildId>,
        key: MessageKey,
        placeholders: &[(&str, String)],
    ) -> String {
        let template = guild_id
            .and_then(|guild_id| self.custom(guild_id, key.as_ref()))
            .unwrap_or_else(|| key.default_text().to_string());
        fill(&template, placeholders)
    }

    /// Same as [`render`](Self::render) for a key only known by name.
    pub fn render_named(
        &self,
        guild_id: Option<GuildId>,
        key: &str,
        placeholders: &[(&str, String)],
    ) -> String {
        match MessageKey::from_str(key) {
            Ok(key) => self.render(guild_id, key, placeholders),
            Err(_) => {
                warn!("Message key {key} not found for guild {guild_id:?}");
                format!("Missing message for key: {key}")
            }
        }
    }

    /// Every key a guild may customise, in declaration order.
    pub fn keys(&self) -> Vec<&'static str> {
        MessageKey::iter().map(|key| key.into()).collect()
    }

    pub fn default_text(&self, key: &str) -> Option<&'static str> {
        MessageKey::from_str(key).ok().map(MessageKey::default_text)
    }

    pub fn custom(&self, guild_id: GuildId, key: &str) -> Option<String> {
        self.lock()
            .get(&guild_id)
            .and_then(|messages| messages.get(key))
            .cloned()
    }

    /// Refuses keys that have no default text.
    pub fn set(&self, guild_id: GuildId, key: &str, text: String) -> bool {
        if MessageKey::from_str(key).is_err() {
            warn!("Attempted to set custom message for unknown key {key}");
            return false;
        }
        let mut custom = self.lock();
        custom
            .entry(guild_id)
            .or_default()
            .insert(key.to_string(), text);
        self.persist(&custom);
        true
    }

    /// Returns whether an override existed.
    pub fn reset(&self, guild_id: GuildId, key: &str) -> bool {
        let mut custom = self.lock();
        let Some(messages) = custom.get_mut(&guild_id) else {
            return false;
        };
        if messages.remove(key).is_none() {
            return false;
        }
        if messages.is_empty() {
            custom.remove(&guild_id);
        }
        self.persist(&custom);
        true
    }
}

fn fill(template: &str, placeholders: &[(&str, String)]) -> String {
    placeholders
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_fills_every_occurrence() {
        let templates = MessageTemplates::in_memory();
        let text = templates.render(
            None,
            MessageKey::GiveawayEndedNoEntriesMsg,
            &[("prize", "Nitro".to_string())],
        );
        assert_eq!(
            text,
            "The giveaway for **Nitro** has ended, but there were no valid entrants."
        );
        assert_eq!(fill("{a}-{a}-{b}", &[("a", "x".to_string())]), "x-x-{b}");
    }

    #[test]
    fn test_guild_override() {
        let path = json::test_path("custom-messages");
        let templates = MessageTemplates::load(path.clone());
        assert!(templates.set(GuildId::new(1), "GIVEAWAY_ENTER_PROMPT", "Click!".to_string()));
        assert!(!templates.set(GuildId::new(1), "NOPE", "x".to_string()));

        let reloaded = MessageTemplates::load(path);
        assert_eq!(
            reloaded.render(Some(GuildId::new(1)), MessageKey::GiveawayEnterPrompt, &[]),
            "Click!"
        );
        assert_eq!(
            reloaded.render(Some(GuildId::new(2)), MessageKey::GiveawayEnterPrompt, &[]),
            MessageKey::GiveawayEnterPrompt.default_text()
        );
        assert!(reloaded.reset(GuildId::new(1), "GIVEAWAY_ENTER_PROMPT"));
        assert!(!reloaded.reset(GuildId::new(1), "GIVEAWAY_ENTER_PROMPT"));
        assert_eq!(reloaded.custom(GuildId::new(1), "GIVEAWAY_ENTER_PROMPT"), None);
    }

    #[test]
    fn test_keys_and_defaults() {
        let templates = MessageTemplates::in_memory();
        let keys = templates.keys();
        assert_eq!(keys.first(), Some(&"GIVEAWAY_START_EMBED_TITLE"));
        assert!(keys.contains(&"LOG_SLASH_COMMAND_ERROR"));
        assert_eq!(
            templates.default_text("GIVEAWAY_ENDED_PROMPT"),
            Some("This giveaway has ended.")
        );
        assert_eq!(templates.default_text("NOPE"), None);
    }

    #[test]
    fn test_unknown_named_key() {
        let templates = MessageTemplates::in_memory();
        assert_eq!(
            templates.render_named(None, "NOPE", &[]),
            "Missing message for key: NOPE"
        );
    }
}
