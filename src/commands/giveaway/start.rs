use serenity::all::CommandInteraction;
use tracing::debug;

use crate::{
    common::{duration::parse_duration, options::Options},
    error::{GiveawayError, ValidationError},
    models::{
        command::{CommandContext, CommandContextReply},
        giveaway::{parse_color, parse_role_list, EligibilityRules, GiveawayParams},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseResult},
    },
};

use super::giveaway_error;

/// Collects the options shared by `start` and `schedule`. Entry rules that
/// cannot be parsed are left out rather than rejected.
pub fn giveaway_params(
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> Result<GiveawayParams, GiveawayError> {
    let duration_ms = options
        .get_string("duration")
        .and_then(|duration| parse_duration(&duration))
        .ok_or(ValidationError::InvalidDuration)?;
    let embed_color = match options.get_string("embed_color") {
        Some(color) => Some(parse_color(&color).ok_or(ValidationError::InvalidColor)?),
        None => None,
    };

    let rules = EligibilityRules {
        required_role: options.get_role("required_role"),
        required_roles_all: options
            .get_string("required_roles_all")
            .map(|roles| parse_role_list(&roles))
            .unwrap_or_default(),
        blacklisted_roles: options
            .get_string("blacklisted_roles")
            .map(|roles| parse_role_list(&roles))
            .unwrap_or_default(),
        min_server_duration_ms: options
            .get_string("min_server_duration")
            .and_then(|duration| parse_duration(&duration)),
        min_account_duration_ms: options
            .get_string("min_account_duration")
            .and_then(|duration| parse_duration(&duration)),
    };

    Ok(GiveawayParams {
        guild_id: ctx.guild_id,
        channel_id: cmd.channel_id,
        host_id: cmd.user.id,
        prize: options.get_string("prize").unwrap_or_default(),
        winners_count: options.get_integer("winners").unwrap_or(0),
        duration_ms,
        rules,
        image_url: options
            .get_string("image_url")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty()),
        embed_color,
    })
}

pub async fn start(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> ResponseResult {
    let params = giveaway_params(ctx, cmd, options)
        .map_err(|err| giveaway_error(handler, ctx.guild_id, err))?;
    debug!(
        "User {} is starting a giveaway for {} in guild {}",
        cmd.user.id, params.prize, ctx.guild_id
    );

    ctx.defer(cmd).await?;
    let record = handler
        .manager
        .start(params)
        .await
        .map_err(|err| giveaway_error(handler, ctx.guild_id, err))?;

    ctx.reply(
        cmd,
        Response::new()
            .content(handler.templates.render(
                Some(ctx.guild_id),
                MessageKey::GiveawayCreatedEphemeral,
                &[("prize", record.prize)],
            ))
            .ephemeral(true),
    )
    .await
}
