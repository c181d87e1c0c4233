#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]

use std::sync::{atomic::AtomicBool, Arc};

use serenity::{http::Http, prelude::GatewayIntents, Client};
use tracing::{error, info};

use crate::{
    common::{clock::SystemClock, logging::EventLog},
    discord::SerenityAnnouncer,
    giveaway::lifecycle::GiveawayManager,
    models::{config::BotConfig, handler::Handler},
    store::{
        creator_roles::CreatorRoleStore, giveaways::GiveawayStore,
        log_channels::LogChannelStore, templates::MessageTemplates,
    },
};

mod commands;
mod common;
mod discord;
mod error;
mod events;
mod giveaway;
mod models;
mod store;

#[tokio::main]
async fn main() {
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing_subscriber::fmt().init();
            error!("Could not read the bot configuration: {err}");
            return;
        }
    };

    let log_level = if config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Loading stored data from {}", config.data_dir.display());
    let giveaways = Arc::new(GiveawayStore::load(config.giveaways_path()));
    let log_channels = Arc::new(LogChannelStore::load(config.log_channels_path()));
    let templates = Arc::new(MessageTemplates::load(config.custom_messages_path()));
    let creator_roles = Arc::new(CreatorRoleStore::load(config.creator_roles_path()));

    let http = Arc::new(Http::new(&config.discord_token));
    let announcer = Arc::new(SerenityAnnouncer::new(Arc::clone(&http)));
    let events = Arc::new(EventLog::new(
        Arc::clone(&log_channels),
        Arc::clone(&templates),
        announcer.clone(),
    ));
    let manager = GiveawayManager::new(
        giveaways,
        announcer.clone(),
        announcer,
        Arc::clone(&templates),
        events,
        Arc::new(SystemClock),
    );

    // Discord client connection
    let handler = Handler {
        manager,
        templates,
        log_channels,
        creator_roles,
        timers_restored: Arc::new(AtomicBool::new(false)),
    };
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::GUILD_MEMBERS;
    let mut client = match Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
    {
        Ok(client) => client,
        Err(err) => {
            error!("Attempted to build the Discord client, but failed with error: {err}");
            return;
        }
    };

    if let Err(err) = client.start_autosharded().await {
        error!(
            "Attempted to start the giveaway Discord client, but failed with error: {}",
            err
        );
    }
}
