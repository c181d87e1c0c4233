use serenity::all::CommandInteraction;

use crate::{
    common::{
        duration::{format_duration, parse_duration},
        options::Options,
    },
    error::{GiveawayError, ValidationError},
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseResult},
    },
};

use super::{giveaway_error, start::giveaway_params};

pub async fn schedule(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> ResponseResult {
    let to_response = |err: GiveawayError| giveaway_error(handler, ctx.guild_id, err);

    let start_in_ms = options
        .get_string("start_in")
        .and_then(|start_in| parse_duration(&start_in))
        .ok_or(ValidationError::InvalidStartTime)
        .map_err(|err| to_response(err.into()))?;
    let params = giveaway_params(ctx, cmd, options).map_err(to_response)?;
    let duration_ms = params.duration_ms;

    let record = handler
        .manager
        .schedule(params, start_in_ms)
        .await
        .map_err(to_response)?;

    ctx.reply(
        cmd,
        Response::new()
            .content(handler.templates.render(
                Some(ctx.guild_id),
                MessageKey::GiveawayScheduledEphemeral,
                &[
                    ("prize", record.prize),
                    ("start_timestamp", (record.start_time / 1000).to_string()),
                    ("duration", format_duration(duration_ms, true)),
                    ("schedule_id", record.id),
                ],
            ))
            .ephemeral(true),
    )
    .await
}
