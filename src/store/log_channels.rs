use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serenity::all::{ChannelId, GuildId};
use tracing::info;

use super::json;

/// Per-guild channel that receives giveaway event logs.
pub struct LogChannelStore {
    path: Option<PathBuf>,
    channels: Mutex<HashMap<GuildId, ChannelId>>,
}

impl LogChannelStore {
    pub fn load(path: PathBuf) -> Self {
        let channels: HashMap<GuildId, ChannelId> = json::load_or_default(&path, "log channels");
        info!("Loaded {} log channel configurations", channels.len());
        LogChannelStore {
            path: Some(path),
            channels: Mutex::new(channels),
        }
    }

    pub fn in_memory() -> Self {
        LogChannelStore {
            path: None,
            channels: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GuildId, ChannelId>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, channels: &HashMap<GuildId, ChannelId>) {
        if let Some(path) = &self.path {
            json::save_logged(path, channels, "log channels");
        }
    }

    pub fn get(&self, guild_id: GuildId) -> Option<ChannelId> {
        self.lock().get(&guild_id).copied()
    }

    pub fn set(&self, guild_id: GuildId, channel_id: ChannelId) {
        let mut channels = self.lock();
        channels.insert(guild_id, channel_id);
        self.persist(&channels);
    }

    pub fn remove(&self, guild_id: GuildId) -> bool {
        let mut channels = self.lock();
        let removed = channels.remove(&guild_id).is_some();
        if removed {
            self.persist(&channels);
        }
        removed
    }
}
