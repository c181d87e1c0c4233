use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serenity::all::{GuildId, RoleId};
use tracing::info;

use super::json;

/// Roles that may create giveaways without the Manage Server permission.
pub struct CreatorRoleStore {
    path: Option<PathBuf>,
    roles: Mutex<HashMap<GuildId, Vec<RoleId>>>,
}

impl CreatorRoleStore {
    pub fn load(path: PathBuf) -> Self {
        let roles: HashMap<GuildId, Vec<RoleId>> =
            json::load_or_default(&path, "giveaway creator roles");
        info!(
            "Loaded {} creator role entries",
            roles.values().map(Vec::len).sum::<usize>()
        );
        CreatorRoleStore {
            path: Some(path),
            roles: Mutex::new(roles),
        }
    }

    pub fn in_memory() -> Self {
        CreatorRoleStore {
            path: None,
            roles: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GuildId, Vec<RoleId>>> {
        self.roles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, roles: &HashMap<GuildId, Vec<RoleId>>) {
        if let Some(path) = &self.path {
            json::save_logged(path, roles, "giveaway creator roles");
        }
    }

    pub fn roles(&self, guild_id: GuildId) -> Vec<RoleId> {
        self.lock().get(&guild_id).cloned().unwrap_or_default()
    }

    /// Returns `false` if the role was already present.
    pub fn add(&self, guild_id: GuildId, role_id: RoleId) -> bool {
        let mut roles = self.lock();
        let guild_roles = roles.entry(guild_id).or_default();
        if guild_roles.contains(&role_id) {
            return false;
        }
        guild_roles.push(role_id);
        self.persist(&roles);
        true
    }

    /// Returns `false` if the role was not present.
    pub fn remove(&self, guild_id: GuildId, role_id: RoleId) -> bool {
        let mut roles = self.lock();
        let Some(guild_roles) = roles.get_mut(&guild_id) else {
            return false;
        };
        let before = guild_roles.len();
        guild_roles.retain(|role| *role != role_id);
        if guild_roles.len() == before {
            return false;
        }
        if guild_roles.is_empty() {
            roles.remove(&guild_id);
        }
        self.persist(&roles);
        true
    }
}
