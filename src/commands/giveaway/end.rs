use serenity::all::CommandInteraction;

use crate::{
    common::options::Options,
    error::PlatformError,
    giveaway::lifecycle::EndOutcome,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseResult},
    },
};

use super::{entry_id, giveaway_error};

pub async fn end(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> ResponseResult {
    let entry_id = entry_id(handler, ctx.guild_id, options)?;

    ctx.defer(cmd).await?;
    let outcome = handler
        .manager
        .request_end(ctx.guild_id, entry_id, cmd.user.id)
        .await
        .map_err(|err| giveaway_error(handler, ctx.guild_id, err))?;

    // The giveaway stays ended either way; the channel was already told.
    if let EndOutcome::Failed(reason) = outcome {
        return Err(giveaway_error(
            handler,
            ctx.guild_id,
            PlatformError::Other(reason).into(),
        ));
    }

    ctx.reply(
        cmd,
        Response::new()
            .content(handler.templates.render(
                Some(ctx.guild_id),
                MessageKey::GiveawayEndingEphemeral,
                &[("message_id", entry_id.to_string())],
            ))
            .ephemeral(true),
    )
    .await
}
