use serenity::all::{CommandInteraction, GuildId, RoleId};

use crate::{
    common::options::Options,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        message::MessageKey,
        response::{Response, ResponseError, ResponseResult},
    },
    store::creator_roles::CreatorRoleStore,
};

/// The reply for the user and the event for the guild log.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    reply: MessageKey,
    event: MessageKey,
    placeholders: Vec<(&'static str, String)>,
}

fn role_list(roles: &[RoleId]) -> String {
    roles
        .iter()
        .map(|role| format!("<@&{role}> ({role})"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply(
    creator_roles: &CreatorRoleStore,
    guild_id: GuildId,
    subcommand: &str,
    role_id: Option<RoleId>,
) -> Result<Outcome, String> {
    match subcommand {
        "add" | "remove" => {
            let role_id = role_id.ok_or_else(|| "A role is required".to_string())?;
            let placeholders = vec![("role_id", role_id.to_string())];
            let (reply, event) = match subcommand {
                "add" if creator_roles.add(guild_id, role_id) => (
                    MessageKey::CreatorRoleAdded,
                    MessageKey::LogCreatorRoleAddSuccess,
                ),
                "add" => (
                    MessageKey::CreatorRoleAlreadyExists,
                    MessageKey::LogCreatorRoleAddFailExists,
                ),
                _ if creator_roles.remove(guild_id, role_id) => (
                    MessageKey::CreatorRoleRemoved,
                    MessageKey::LogCreatorRoleRemoveSuccess,
                ),
                _ => (
                    MessageKey::CreatorRoleNotFoundForRemove,
                    MessageKey::LogCreatorRoleRemoveFailNotFound,
                ),
            };
            Ok(Outcome {
                reply,
                event,
                placeholders,
            })
        }
        "list" => {
            let roles = creator_roles.roles(guild_id);
            let (reply, listed) = if roles.is_empty() {
                (MessageKey::CreatorRolesListEmpty, "none".to_string())
            } else {
                (MessageKey::CreatorRolesList, role_list(&roles))
            };
            Ok(Outcome {
                reply,
                event: MessageKey::LogCreatorRolesViewed,
                placeholders: vec![("role_list", listed)],
            })
        }
        _ => Err(format!("Unknown subcommand {subcommand}")),
    }
}

pub async fn route(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
    subcommand: &str,
) -> ResponseResult {
    let guild_id = ctx.guild_id;
    let Outcome {
        reply,
        event,
        mut placeholders,
    } = apply(
        &handler.creator_roles,
        guild_id,
        subcommand,
        options.get_role("role"),
    )
    .map_err(ResponseError::Execution)?;

    ctx.reply(
        cmd,
        Response::new()
            .content(handler.templates.render(Some(guild_id), reply, &placeholders))
            .quiet()
            .ephemeral(true),
    )
    .await?;

    placeholders.push(("user_id", cmd.user.id.to_string()));
    handler
        .manager
        .events()
        .log(Some(guild_id), event, &placeholders)
        .await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 1;

    fn outcome(roles: &CreatorRoleStore, subcommand: &str, role: Option<u64>) -> (MessageKey, MessageKey) {
        let outcome = apply(roles, GuildId::new(GUILD), subcommand, role.map(RoleId::new)).unwrap();
        (outcome.reply, outcome.event)
    }

    #[test]
    fn test_role_list_mentions_each_role() {
        assert_eq!(
            role_list(&[RoleId::new(5), RoleId::new(6)]),
            "<@&5> (5)\n<@&6> (6)"
        );
    }

    #[test]
    fn test_every_subcommand_has_an_event() {
        let roles = CreatorRoleStore::in_memory();

        assert_eq!(
            outcome(&roles, "list", None),
            (MessageKey::CreatorRolesListEmpty, MessageKey::LogCreatorRolesViewed)
        );
        assert_eq!(
            outcome(&roles, "add", Some(5)),
            (MessageKey::CreatorRoleAdded, MessageKey::LogCreatorRoleAddSuccess)
        );
        assert_eq!(
            outcome(&roles, "add", Some(5)),
            (
                MessageKey::CreatorRoleAlreadyExists,
                MessageKey::LogCreatorRoleAddFailExists
            )
        );
        assert_eq!(
            outcome(&roles, "remove", Some(6)),
            (
                MessageKey::CreatorRoleNotFoundForRemove,
                MessageKey::LogCreatorRoleRemoveFailNotFound
            )
        );

        let listed = apply(&roles, GuildId::new(GUILD), "list", None).unwrap();
        assert_eq!(listed.reply, MessageKey::CreatorRolesList);
        assert_eq!(listed.placeholders, vec![("role_list", "<@&5> (5)".to_string())]);

        assert_eq!(
            outcome(&roles, "remove", Some(5)),
            (MessageKey::CreatorRoleRemoved, MessageKey::LogCreatorRoleRemoveSuccess)
        );
    }

    #[test]
    fn test_role_is_required_for_changes() {
        let roles = CreatorRoleStore::in_memory();
        assert!(apply(&roles, GuildId::new(GUILD), "add", None).is_err());
        assert!(apply(&roles, GuildId::new(GUILD), "purge", None).is_err());
        assert!(roles.roles(GuildId::new(GUILD)).is_empty());
    }
}
