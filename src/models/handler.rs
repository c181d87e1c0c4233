use std::sync::{atomic::AtomicBool, Arc};

use crate::{
    giveaway::lifecycle::GiveawayManager,
    store::{
        creator_roles::CreatorRoleStore, log_channels::LogChannelStore,
        templates::MessageTemplates,
    },
};

#[derive(Clone)]
pub struct Handler {
    pub manager: GiveawayManager,
    pub templates: Arc<MessageTemplates>,
    pub log_channels: Arc<LogChannelStore>,
    pub creator_roles: Arc<CreatorRoleStore>,
    /// Timers are restored on the first ready event only; serenity fires
    /// ready again on every reconnect.
    pub timers_restored: Arc<AtomicBool>,
}
