use std::sync::atomic::Ordering;

use serenity::{all::Command, gateway::ActivityData, model::prelude::Ready, prelude::Context};
use tracing::{debug, error, info};

use crate::{commands::get_command_list, models::handler::Handler, models::message::MessageKey};

impl Handler {
    pub async fn on_ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected", ready.user.name);

        ctx.set_activity(Some(ActivityData::playing("/giveaway start")));

        info!("Adding current commands to slash commands list");
        let mut successful_commands = vec![];
        for command in get_command_list() {
            match Command::create_global_command(&ctx.http, command.register()).await {
                Ok(_) => successful_commands.push(command.name()),
                Err(e) => error!(
                    "Attempted to register command {} but failed with error: {}",
                    command.name(),
                    e
                ),
            }
        }
        info!(
            "Successfully registered commands: {}",
            successful_commands.join(", ")
        );

        if self.timers_restored.swap(true, Ordering::SeqCst) {
            debug!("Giveaway timers were restored by an earlier ready event");
            return;
        }
        self.manager.restore_timers().await;

        let giveaway_count = self.manager.store().len();
        self.manager
            .events()
            .log(
                None,
                MessageKey::LogBotReady,
                &[("giveaway_count", giveaway_count.to_string())],
            )
            .await;
        info!("{} is ready!", ready.user.name);
    }
}
