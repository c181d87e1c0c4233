use serenity::{all::Guild, prelude::Context};
use tracing::{error, info};

use crate::{commands::get_command_list, models::handler::Handler, models::message::MessageKey};

impl Handler {
    pub async fn on_guild_create(&self, ctx: Context, guild: Guild) {
        info!("Joined new guild {} ({})", guild.name, guild.id);

        let commands = get_command_list()
            .iter()
            .map(|command| command.register())
            .collect::<Vec<_>>();
        if let Err(err) = guild.id.set_commands(&ctx.http, commands).await {
            error!(
                "Attempted to register commands for guild {}, but failed with error: {err}",
                guild.id
            );
        }

        self.manager
            .events()
            .log(
                Some(guild.id),
                MessageKey::LogBotJoinedGuild,
                &[("guild_name", guild.name.clone())],
            )
            .await;
    }
}
