use serenity::all::{ChannelType, CommandInteraction};
use tracing::info;

use crate::{
    common::options::Options,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseError, ResponseResult},
    },
};

pub async fn logchannel(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
) -> ResponseResult {
    let guild_id = ctx.guild_id;
    let user_id = cmd.user.id.to_string();

    let Some((channel_id, kind)) = options.get_channel("channel") else {
        handler.log_channels.remove(guild_id);
        info!("Log channel of guild {guild_id} cleared by {user_id}");
        ctx.reply(
            cmd,
            Response::new()
                .content(handler.templates.render(
                    Some(guild_id),
                    MessageKey::LogChannelCleared,
                    &[],
                ))
                .ephemeral(true),
        )
        .await?;
        handler
            .manager
            .events()
            .log(
                Some(guild_id),
                MessageKey::LogChannelClearedLog,
                &[("user_id", user_id)],
            )
            .await;
        return Ok(());
    };

    if kind != ChannelType::Text {
        return Err(ResponseError::Execution(handler.templates.render(
            Some(guild_id),
            MessageKey::ErrorInvalidLogChannelType,
            &[],
        )));
    }

    handler.log_channels.set(guild_id, channel_id);
    info!("Log channel of guild {guild_id} set to {channel_id} by {user_id}");
    ctx.reply(
        cmd,
        Response::new()
            .content(handler.templates.render(
                Some(guild_id),
                MessageKey::LogChannelSet,
                &[("log_channel", format!("<#{channel_id}>"))],
            ))
            .ephemeral(true),
    )
    .await?;
    handler
        .manager
        .events()
        .log(
            Some(guild_id),
            MessageKey::LogChannelSetLog,
            &[("user_id", user_id), ("channel_id", channel_id.to_string())],
        )
        .await;
    Ok(())
}
