use std::sync::atomic::AtomicBool;

use serenity::{
    all::{CommandInteraction, GuildId},
    builder::CreateCommand,
    prelude::Context as IncomingContext,
};

use super::{
    handler::Handler,
    permissions::Permission,
    response::{Response, ResponseResult},
};

pub struct CommandContext {
    pub ctx: IncomingContext,
    pub has_responded: AtomicBool,
    pub user_permissions: Vec<Permission>,
    pub guild_id: GuildId,
}

/// Used to answer commands that failed before a full context existed.
pub struct FailedCommandContext {
    pub ctx: IncomingContext,
}

#[async_trait::async_trait]
pub trait CommandContextReply {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult;
}

#[async_trait::async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;
    fn register(&self) -> CreateCommand;
    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
    ) -> ResponseResult;
}
