use serenity::all::CommandInteraction;

use crate::{
    common::options::Options,
    error::GiveawayError,
    giveaway::render::winner_mentions,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseError, ResponseResult},
    },
};

use super::{entry_id, giveaway_error};

pub async fn reroll(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> ResponseResult {
    let entry_id = entry_id(handler, ctx.guild_id, options)?;
    let winners_count = options.get_integer("winners");

    ctx.defer(cmd).await?;
    let winners = match handler
        .manager
        .reroll(ctx.guild_id, entry_id, cmd.user.id, winners_count)
        .await
    {
        Ok(winners) => winners,
        Err(GiveawayError::NoEligibleEntrants) => {
            let prize = handler
                .manager
                .store()
                .find_by_entry_id_in_guild(ctx.guild_id, entry_id)
                .map(|giveaway| giveaway.prize)
                .unwrap_or_default();
            return Err(ResponseError::Execution(handler.templates.render(
                Some(ctx.guild_id),
                MessageKey::ErrorNoValidEntrantsForReroll,
                &[("prize", prize)],
            )));
        }
        Err(err) => return Err(giveaway_error(handler, ctx.guild_id, err)),
    };

    ctx.reply(
        cmd,
        Response::new()
            .content(handler.templates.render(
                Some(ctx.guild_id),
                MessageKey::GiveawayRerolledSuccessEphemeral,
                &[("winner_mentions", winner_mentions(&winners))],
            ))
            .quiet()
            .ephemeral(true),
    )
    .await
}
