use serenity::{
    all::{CommandInteraction, CommandOptionType},
    builder::{CreateCommand, CreateCommandOption},
};

use crate::{
    common::options::Options,
    models::{
        command::{Command, CommandContext},
        handler::Handler,
        message::MessageKey,
        permissions::Permission,
        response::{ResponseError, ResponseResult},
    },
};

pub mod creator_role;
pub mod customize_message;

pub struct GiveawayUtilCommand;

fn key_option() -> CreateCommandOption {
    CreateCommandOption::new(
        CommandOptionType::String,
        "key",
        "The message key, see listkeys",
    )
    .required(true)
}

fn role_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Role, "role", description).required(true)
}

#[async_trait::async_trait]
impl Command for GiveawayUtilCommand {
    fn name(&self) -> &'static str {
        "giveawayutil"
    }

    fn register(&self) -> CreateCommand {
        CreateCommand::new("giveawayutil")
            .description("Giveaway bot settings")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommandGroup,
                    "customizemessage",
                    "Customise the messages the bot sends in this server",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "set",
                        "Set a custom message",
                    )
                    .add_sub_option(key_option())
                    .add_sub_option(
                        CreateCommandOption::new(
                            CommandOptionType::String,
                            "text",
                            "The new text, placeholders look like {prize}",
                        )
                        .required(true),
                    ),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "view",
                        "Preview a message",
                    )
                    .add_sub_option(key_option()),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "reset",
                        "Go back to the default message",
                    )
                    .add_sub_option(key_option()),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "listkeys",
                    "List every message key",
                )),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommandGroup,
                    "setcreatorrole",
                    "Manage the roles allowed to create giveaways",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "add",
                        "Allow a role to create giveaways",
                    )
                    .add_sub_option(role_option("The role to allow")),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "remove",
                        "Stop a role from creating giveaways",
                    )
                    .add_sub_option(role_option("The role to remove")),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "list",
                    "List the roles allowed to create giveaways",
                )),
            )
            .dm_permission(false)
    }

    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
    ) -> ResponseResult {
        if !ctx.user_permissions.contains(&Permission::GiveawayManage) {
            return Err(ResponseError::Execution(handler.templates.render(
                Some(ctx.guild_id),
                MessageKey::ErrorPermissionManageGuild,
                &[],
            )));
        }

        let options = Options::new(cmd);
        match options.subcommand_path().as_slice() {
            ["customizemessage", subcommand] => {
                customize_message::route(handler, ctx, cmd, &options, subcommand).await
            }
            ["setcreatorrole", subcommand] => {
                creator_role::route(handler, ctx, cmd, &options, subcommand).await
            }
            path => Err(ResponseError::Execution(format!(
                "Unknown subcommand {}",
                path.join(" ")
            ))),
        }
    }
}
