use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serenity::all::{GuildId, MessageId};
use tracing::{debug, error, info};

use crate::{error::StoreError, models::giveaway::GiveawayRecord};

use super::json;

/// The authoritative collection of giveaways. Every mutation rewrites the
/// backing file before returning, while still holding the lock, so the file
/// always matches some state memory has been in. The write is a blocking
/// `std::fs` call on whichever runtime thread holds the lock.
pub struct GiveawayStore {
    path: Option<PathBuf>,
    giveaways: Mutex<Vec<GiveawayRecord>>,
}

impl GiveawayStore {
    pub fn load(path: PathBuf) -> Self {
        let giveaways: Vec<GiveawayRecord> = json::load_or_default(&path, "giveaways");
        info!("Loaded {} giveaways", giveaways.len());
        GiveawayStore {
            path: Some(path),
            giveaways: Mutex::new(giveaways),
        }
    }

    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        GiveawayStore {
            path: None,
            giveaways: Mutex::new(vec![]),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GiveawayRecord>> {
        self.giveaways.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, giveaways: &[GiveawayRecord]) {
        if let Some(path) = &self.path {
            json::save_logged(path, giveaways, "giveaways");
        }
    }

    pub fn add(&self, record: GiveawayRecord) {
        debug!("Adding giveaway {}", record.id);
        let mut giveaways = self.lock();
        giveaways.push(record);
        self.persist(&giveaways);
    }

    /// Replaces the record with the given id. Unknown ids are logged and
    /// reported, never inserted.
    pub fn update(&self, id: &str, record: GiveawayRecord) -> Result<(), StoreError> {
        let mut giveaways = self.lock();
        let Some(existing) = giveaways.iter_mut().find(|giveaway| giveaway.id == id) else {
            error!("Attempted to update non-existent giveaway {id}");
            return Err(StoreError::UnknownRecord(id.to_string()));
        };
        *existing = record;
        self.persist(&giveaways);
        Ok(())
    }

    /// Runs `f` against the record under the store lock and persists the
    /// result. `f` returning `None` means nothing changed and nothing is
    /// written. This is the only safe way to check-then-set a record.
    pub fn modify<T, F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut GiveawayRecord) -> Option<T>,
    {
        let mut giveaways = self.lock();
        let record = giveaways.iter_mut().find(|giveaway| giveaway.id == id)?;
        let result = f(record)?;
        self.persist(&giveaways);
        Some(result)
    }

    pub fn find_by_entry_id(&self, entry_id: MessageId) -> Option<GiveawayRecord> {
        self.lock()
            .iter()
            .find(|giveaway| giveaway.entry_id() == Some(entry_id))
            .cloned()
    }

    pub fn find_by_entry_id_in_guild(
        &self,
        guild_id: GuildId,
        entry_id: MessageId,
    ) -> Option<GiveawayRecord> {
        self.find_by_entry_id(entry_id)
            .filter(|giveaway| giveaway.guild_id == guild_id)
    }

    /// Only matches giveaways that are still waiting to start.
    pub fn find_by_schedule_id(&self, schedule_id: &str) -> Option<GiveawayRecord> {
        self.lock()
            .iter()
            .find(|giveaway| giveaway.schedule_id() == Some(schedule_id))
            .cloned()
    }

    pub fn find_index_by_entry_id(&self, entry_id: MessageId) -> Option<usize> {
        self.lock()
            .iter()
            .position(|giveaway| giveaway.entry_id() == Some(entry_id))
    }

    pub fn get(&self, id: &str) -> Option<GiveawayRecord> {
        self.lock().iter().find(|giveaway| giveaway.id == id).cloned()
    }

    pub fn all(&self) -> Vec<GiveawayRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
