use std::{env, path::PathBuf};

use crate::error::ConfigError;

/// Process configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub debug: bool,
    pub data_dir: PathBuf,
    pub giveaways_file: String,
    pub log_channels_file: String,
    pub custom_messages_file: String,
    pub creator_roles_file: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or(default.to_string())
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let discord_token =
            env::var("DISCORD_TOKEN").map_err(|_| ConfigError::Missing("DISCORD_TOKEN"))?;

        Ok(BotConfig {
            discord_token,
            debug: var_or("DEBUG", "false") == "true",
            data_dir: PathBuf::from(var_or("DATA_DIR", ".")),
            giveaways_file: var_or("GIVEAWAYS_FILE", "giveaways.json"),
            log_channels_file: var_or("LOG_CHANNELS_FILE", "logchannels.json"),
            custom_messages_file: var_or("CUSTOM_MESSAGES_FILE", "custom_messages.json"),
            creator_roles_file: var_or("CREATOR_ROLES_FILE", "giveaway_creator_roles.json"),
        })
    }

    pub fn giveaways_path(&self) -> PathBuf {
        self.data_dir.join(&self.giveaways_file)
    }

    pub fn log_channels_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_channels_file)
    }

    pub fn custom_messages_path(&self) -> PathBuf {
        self.data_dir.join(&self.custom_messages_file)
    }

    pub fn creator_roles_path(&self) -> PathBuf {
        self.data_dir.join(&self.creator_roles_file)
    }
}
