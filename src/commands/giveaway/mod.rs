use serenity::{
    all::{ChannelType, CommandInteraction, CommandOptionType, GuildId, MessageId},
    builder::{CreateCommand, CreateCommandOption},
};

use crate::{
    common::options::Options,
    error::{GiveawayError, IllegalState, ValidationError},
    models::{
        command::{Command, CommandContext},
        handler::Handler,
        message::MessageKey,
        permissions::Permission,
        response::{ResponseError, ResponseResult},
    },
};

pub mod edit;
pub mod end;
pub mod logchannel;
pub mod reroll;
pub mod schedule;
pub mod start;

pub struct GiveawayCommand;

fn string_option(name: &str, description: &str, required: bool) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, name, description).required(required)
}

fn message_id_option() -> CreateCommandOption {
    string_option("message_id", "The message ID of the giveaway", true)
}

/// The options shared by `start` and `schedule`.
fn with_giveaway_options(subcommand: CreateCommandOption) -> CreateCommandOption {
    subcommand
        .add_sub_option(string_option(
            "duration",
            "Duration of the giveaway (e.g. 1d, 12h, 30m)",
            true,
        ))
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::Integer, "winners", "Number of winners")
                .min_int_value(1)
                .required(true),
        )
        .add_sub_option(string_option("prize", "What are you giving away?", true))
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::Role,
                "required_role",
                "Role required to enter",
            )
            .required(false),
        )
        .add_sub_option(string_option(
            "required_roles_all",
            "Comma separated IDs of roles a user must have all of",
            false,
        ))
        .add_sub_option(string_option(
            "blacklisted_roles",
            "Comma separated IDs of roles a user must not have",
            false,
        ))
        .add_sub_option(string_option(
            "min_server_duration",
            "Minimum time in the server to enter (e.g. 7d, 1M)",
            false,
        ))
        .add_sub_option(string_option(
            "min_account_duration",
            "Minimum account age to enter (e.g. 30d, 3M)",
            false,
        ))
        .add_sub_option(string_option(
            "image_url",
            "Image URL for the giveaway embed",
            false,
        ))
        .add_sub_option(string_option(
            "embed_color",
            "Hex colour for the giveaway embed (e.g. #FF0000)",
            false,
        ))
}

fn edit_options() -> CreateCommandOption {
    let boolean = |name: &str, description: &str| {
        CreateCommandOption::new(CommandOptionType::Boolean, name, description).required(false)
    };
    CreateCommandOption::new(
        CommandOptionType::SubCommand,
        "edit",
        "Edit an active giveaway",
    )
    .add_sub_option(message_id_option())
    .add_sub_option(string_option("new_prize", "New prize", false))
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::Integer,
            "new_winners",
            "New number of winners",
        )
        .min_int_value(1)
        .required(false),
    )
    .add_sub_option(string_option(
        "extend_duration_by",
        "Extend the giveaway by this much (e.g. 30m, 1h)",
        false,
    ))
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::Role,
            "new_required_role",
            "New role required to enter",
        )
        .required(false),
    )
    .add_sub_option(boolean("clear_required_role", "Remove the required role"))
    .add_sub_option(string_option(
        "new_required_roles_all",
        "Comma separated role IDs a user must have all of, empty to clear",
        false,
    ))
    .add_sub_option(string_option(
        "new_blacklisted_roles",
        "Comma separated role IDs a user must not have, empty to clear",
        false,
    ))
    .add_sub_option(string_option(
        "new_min_server_duration",
        "New minimum time in the server, empty to clear",
        false,
    ))
    .add_sub_option(string_option(
        "new_min_account_duration",
        "New minimum account age, empty to clear",
        false,
    ))
    .add_sub_option(string_option("new_image_url", "New image URL", false))
    .add_sub_option(boolean("clear_image_url", "Remove the image"))
    .add_sub_option(string_option("new_embed_color", "New hex colour", false))
    .add_sub_option(boolean("clear_embed_color", "Use the default colour"))
}

#[async_trait::async_trait]
impl Command for GiveawayCommand {
    fn name(&self) -> &'static str {
        "giveaway"
    }

    fn register(&self) -> CreateCommand {
        CreateCommand::new("giveaway")
            .description("Giveaway commands")
            .add_option(with_giveaway_options(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "start",
                "Start a new giveaway immediately",
            )))
            .add_option(
                with_giveaway_options(
                    CreateCommandOption::new(
                        CommandOptionType::SubCommand,
                        "schedule",
                        "Schedule a giveaway to start later",
                    )
                    .add_sub_option(string_option(
                        "start_in",
                        "When the giveaway should start (e.g. 1h, 30m, 1d12h)",
                        true,
                    )),
                ),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "end",
                    "End a giveaway early",
                )
                .add_sub_option(message_id_option()),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "reroll",
                    "Draw new winners for an ended giveaway",
                )
                .add_sub_option(message_id_option())
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Integer,
                        "winners",
                        "Number of new winners (default: the original count)",
                    )
                    .min_int_value(1)
                    .required(false),
                ),
            )
            .add_option(edit_options())
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "logchannel",
                    "Set or clear the channel giveaway events are logged to",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Channel,
                        "channel",
                        "The text channel to log to, leave empty to clear",
                    )
                    .channel_types(vec![ChannelType::Text])
                    .required(false),
                ),
            )
            .dm_permission(false)
    }

    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
    ) -> ResponseResult {
        let options = Options::new(cmd);
        let Some(subcommand) = options.subcommand_path().first().copied() else {
            return Err(ResponseError::Execution(
                "This command requires a subcommand".to_string(),
            ));
        };

        let permission = match subcommand {
            "start" | "schedule" => Permission::GiveawayCreate,
            _ => Permission::GiveawayManage,
        };
        if !ctx.user_permissions.contains(&permission) {
            let key = match permission {
                Permission::GiveawayCreate => MessageKey::ErrorNoPermissionToCreateGiveaway,
                Permission::GiveawayManage => MessageKey::ErrorPermissionManageGuild,
            };
            return Err(ResponseError::Execution(handler.templates.render(
                Some(ctx.guild_id),
                key,
                &[],
            )));
        }

        match subcommand {
            "start" => start::start(handler, ctx, cmd, &options).await,
            "schedule" => schedule::schedule(handler, ctx, cmd, &options).await,
            "end" => end::end(handler, ctx, cmd, &options).await,
            "edit" => edit::edit(handler, ctx, cmd, &options).await,
            "reroll" => reroll::reroll(handler, ctx, cmd, &options).await,
            "logchannel" => logchannel::logchannel(handler, ctx, cmd, &options).await,
            _ => Err(ResponseError::Execution(format!(
                "Unknown subcommand {subcommand}"
            ))),
        }
    }
}

/// Reads the `message_id` option. Anything that is not a message id cannot
/// name a giveaway, so it is reported as not found.
fn entry_id(
    handler: &Handler,
    guild_id: GuildId,
    options: &Options<'_>,
) -> Result<MessageId, ResponseError> {
    options
        .get_string("message_id")
        .and_then(|id| id.trim().parse::<u64>().ok())
        .filter(|id| *id != 0)
        .map(MessageId::new)
        .ok_or_else(|| giveaway_error(handler, guild_id, GiveawayError::NotFound(String::new())))
}

/// The guild's text for a failed giveaway operation.
fn giveaway_error(handler: &Handler, guild_id: GuildId, err: GiveawayError) -> ResponseError {
    let (key, placeholders) = match &err {
        GiveawayError::Validation(validation) => (
            match validation {
                ValidationError::InvalidStartTime => MessageKey::ErrorInvalidStartTime,
                ValidationError::InvalidDuration => MessageKey::ErrorInvalidDuration,
                ValidationError::InvalidWinnersCount => MessageKey::ErrorWinnersCount,
                ValidationError::InvalidExtension => MessageKey::ErrorInvalidExtensionDuration,
                ValidationError::ExtensionExpired => MessageKey::ErrorExtensionExpired,
                ValidationError::InvalidColor => MessageKey::ErrorInvalidColor,
            },
            vec![],
        ),
        GiveawayError::NotFound(_) => (MessageKey::ErrorGiveawayNotFound, vec![]),
        GiveawayError::IllegalState(state) => (
            match state {
                IllegalState::AlreadyEnded => MessageKey::ErrorGiveawayAlreadyEnded,
                IllegalState::Scheduled => MessageKey::ErrorGiveawayScheduled,
                IllegalState::NotEnded => MessageKey::ErrorGiveawayNotEndedYet,
            },
            vec![],
        ),
        GiveawayError::NoEligibleEntrants => (
            MessageKey::ErrorNoValidEntrantsForReroll,
            vec![("prize", "this giveaway".to_string())],
        ),
        GiveawayError::Platform(platform) => (
            MessageKey::ErrorPlatform,
            vec![("error_message", platform.to_string())],
        ),
    };
    ResponseError::Execution(handler.templates.render(Some(guild_id), key, &placeholders))
}
