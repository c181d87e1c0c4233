use serenity::all::CommandInteraction;
use tracing::warn;

use crate::{
    common::{duration::parse_duration, options::Options},
    error::ValidationError,
    models::{
        command::{CommandContext, CommandContextReply},
        giveaway::{parse_color, parse_role_list, GiveawayChanges, DEFAULT_GIVEAWAY_COLOR},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseResult},
    },
};

use super::{entry_id, giveaway_error};

/// Turns the edit options into changes. Only options the user filled in
/// become changes; a `clear_*` flag wins over the matching `new_*` value.
pub fn requested_changes(options: &Options<'_>) -> Result<GiveawayChanges, ValidationError> {
    let extend_by_ms = match options.get_string("extend_duration_by") {
        Some(extension) => {
            Some(parse_duration(&extension).ok_or(ValidationError::InvalidExtension)?)
        }
        None => None,
    };

    let required_role = if options.get_boolean("clear_required_role") == Some(true) {
        Some(None)
    } else {
        options.get_role("new_required_role").map(Some)
    };

    let image_url = if options.get_boolean("clear_image_url") == Some(true) {
        Some(None)
    } else {
        options.get_string("new_image_url").map(|url| {
            let url = url.trim();
            (!url.is_empty()).then(|| url.to_string())
        })
    };

    let embed_color = if options.get_boolean("clear_embed_color") == Some(true) {
        Some(DEFAULT_GIVEAWAY_COLOR)
    } else {
        match options.get_string("new_embed_color") {
            Some(color) if color.trim().is_empty() => Some(DEFAULT_GIVEAWAY_COLOR),
            Some(color) => Some(parse_color(&color).ok_or(ValidationError::InvalidColor)?),
            None => None,
        }
    };

    Ok(GiveawayChanges {
        prize: options.get_string("new_prize"),
        winners_count: options.get_integer("new_winners"),
        extend_by_ms,
        required_role,
        required_roles_all: options
            .get_string("new_required_roles_all")
            .map(|roles| parse_role_list(&roles)),
        blacklisted_roles: options
            .get_string("new_blacklisted_roles")
            .map(|roles| parse_role_list(&roles)),
        min_server_duration_ms: options
            .get_string("new_min_server_duration")
            .map(|duration| parse_duration(&duration)),
        min_account_duration_ms: options
            .get_string("new_min_account_duration")
            .map(|duration| parse_duration(&duration)),
        image_url,
        embed_color,
    })
}

pub async fn edit(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> ResponseResult {
    let entry_id = entry_id(handler, ctx.guild_id, options)?;
    let changes = requested_changes(options)
        .map_err(|err| giveaway_error(handler, ctx.guild_id, err.into()))?;

    ctx.defer(cmd).await?;
    let outcome = handler
        .manager
        .edit(ctx.guild_id, entry_id, cmd.user.id, changes)
        .await
        .map_err(|err| giveaway_error(handler, ctx.guild_id, err))?;

    let content = if outcome.is_unchanged() {
        handler
            .templates
            .render(Some(ctx.guild_id), MessageKey::InfoNoChangesMade, &[])
    } else {
        handler.templates.render(
            Some(ctx.guild_id),
            MessageKey::GiveawayEditedSuccess,
            &[("changes", outcome.changes.join(", "))],
        )
    };
    ctx.reply(cmd, Response::new().content(content).ephemeral(true))
        .await?;

    if let Some(err) = outcome.refresh_error {
        warn!("Told user {} that giveaway {entry_id} kept its old message: {err}", cmd.user.id);
        ctx.reply(
            cmd,
            Response::new()
                .content(handler.templates.render(
                    Some(ctx.guild_id),
                    MessageKey::WarnGiveawayEditedEmbedFail,
                    &[("error_message", err)],
                ))
                .ephemeral(true),
        )
        .await?;
    }
    Ok(())
}

