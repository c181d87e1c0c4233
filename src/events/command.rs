use std::sync::atomic::AtomicBool;

use serenity::{
    all::{CommandInteraction, GuildId, UserId},
    builder::CreateEmbed,
    prelude::Context as IncomingContext,
};
use tracing::{debug, error, warn};

use crate::{
    commands::get_command_list,
    models::{
        command::{CommandContext, CommandContextReply, FailedCommandContext},
        handler::Handler,
        message::MessageKey,
        permissions::resolve_permissions,
        response::{Response, ResponseError},
    },
};

const ERROR_COLOR: u32 = 0xFF0000;

impl Handler {
    async fn guild_owner(&self, ctx: &IncomingContext, guild_id: GuildId) -> Option<UserId> {
        if let Some(owner_id) = guild_id
            .to_guild_cached(&ctx.cache)
            .map(|guild| guild.owner_id)
        {
            return Some(owner_id);
        }
        match guild_id.to_partial_guild(&ctx.http).await {
            Ok(guild) => Some(guild.owner_id),
            Err(err) => {
                warn!("Could not get guild {guild_id} to find its owner. Failed with error: {err}");
                None
            }
        }
    }

    pub async fn on_command(&self, ctx: IncomingContext, command: CommandInteraction) {
        let start = std::time::Instant::now();

        let Some(guild_id) = command.guild_id else {
            let fail_context = FailedCommandContext { ctx };
            if let Err(err) = fail_context
                .reply(
                    &command,
                    Response::new()
                        .content("Giveaways can only be run inside servers".to_string())
                        .ephemeral(true),
                )
                .await
            {
                error!("Failed to reply to command: {:?}", err);
            }
            return;
        };

        let owner_id = self.guild_owner(&ctx, guild_id).await;
        let (member_permissions, member_roles) = match &command.member {
            Some(member) => (member.permissions, member.roles.clone()),
            None => (None, vec![]),
        };
        let user_permissions = resolve_permissions(
            owner_id == Some(command.user.id),
            member_permissions,
            &member_roles,
            &self.creator_roles.roles(guild_id),
        );

        let command_context = CommandContext {
            ctx,
            has_responded: AtomicBool::new(false),
            user_permissions,
            guild_id,
        };

        debug!("Context generated in {:?}", start.elapsed());

        for existing_command in get_command_list() {
            if existing_command.name() == command.data.name {
                if let Err(err) = existing_command
                    .router(self, &command_context, &command)
                    .await
                {
                    self.on_command_error(&command_context, &command, err).await;
                }
            }
        }

        debug!("Took {:?} to handle a command", start.elapsed());
    }

    /// Tells the user why their command failed. Only unexpected failures are
    /// written to the guild's event log.
    async fn on_command_error(
        &self,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
        err: ResponseError,
    ) {
        let message = match err {
            ResponseError::Execution(message) => {
                debug!(
                    "Command /{} by {} was refused: {message}",
                    cmd.data.name, cmd.user.id
                );
                message
            }
            ResponseError::Serenity(err) => {
                error!("Failed to handle command /{}: {:?}", cmd.data.name, err);
                let placeholders = [
                    ("command", cmd.data.name.clone()),
                    ("user_id", cmd.user.id.to_string()),
                    ("error_message", err.to_string()),
                ];
                self.manager
                    .events()
                    .log(
                        Some(ctx.guild_id),
                        MessageKey::LogSlashCommandError,
                        &placeholders,
                    )
                    .await;
                self.templates.render(
                    Some(ctx.guild_id),
                    MessageKey::ErrorPlatform,
                    &[("error_message", err.to_string())],
                )
            }
        };

        if let Err(err) = ctx
            .reply(
                cmd,
                Response::new()
                    .embed(
                        CreateEmbed::new()
                            .description(message)
                            .color(ERROR_COLOR),
                    )
                    .ephemeral(true),
            )
            .await
        {
            error!("Failed to reply to command: {:?}", err);
        }
    }
}
