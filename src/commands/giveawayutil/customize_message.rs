use serenity::{
    all::CommandInteraction,
    builder::{CreateEmbed, CreateEmbedFooter},
};
use tracing::info;

use crate::{
    common::options::Options,
    models::{
        command::{CommandContext, CommandContextReply},
        handler::Handler,
        response::{Response, ResponseError, ResponseResult},
    },
};

const PREVIEW_LIMIT: usize = 1000;
const KEY_LIST_LIMIT: usize = 4000;
const MAX_EMBEDS: usize = 10;

fn invalid_key(key: &str) -> ResponseError {
    ResponseError::Execution(format!(
        "Invalid message key `{key}`. Use `/giveawayutil customizemessage listkeys` to see the available keys."
    ))
}

fn truncate(text: &str) -> String {
    text.chars().take(PREVIEW_LIMIT).collect()
}

/// Example values for previews, so the text reads the way members see it.
fn example_placeholders() -> Vec<(&'static str, String)> {
    vec![
        ("prize", "Test Prize".to_string()),
        ("winner_mentions", "@Winner".to_string()),
        ("winners_count", "1".to_string()),
        ("duration", "1h".to_string()),
        ("log_channel", "#giveaway-logs".to_string()),
        ("user_id", "0".to_string()),
    ]
}

/// Splits the key list into embed descriptions that stay under the embed
/// description limit.
fn key_pages(keys: &[&str]) -> Vec<String> {
    let mut pages = vec![];
    let mut page = String::new();
    for key in keys {
        let line = format!("`{key}`\n");
        if !page.is_empty() && page.len() + line.len() > KEY_LIST_LIMIT {
            pages.push(std::mem::take(&mut page));
        }
        page.push_str(&line);
    }
    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

pub async fn route(
    handler: &Handler,
    ctx: &CommandContext,
    cmd: &CommandInteraction,
    options: &Options<'_>,
    subcommand: &str,
) -> ResponseResult {
    let guild_id = ctx.guild_id;
    let key = options.get_string("key").unwrap_or_default();

    let response = match subcommand {
        "set" => {
            let text = options.get_string("text").unwrap_or_default();
            if !handler.templates.set(guild_id, &key, text) {
                return Err(invalid_key(&key));
            }
            info!("User {} customised {key} in guild {guild_id}", cmd.user.id);
            Response::new().content(format!("Custom message for `{key}` has been set."))
        }
        "view" => {
            let Some(default_text) = handler.templates.default_text(&key) else {
                return Err(invalid_key(&key));
            };
            let custom = handler.templates.custom(guild_id, &key);
            let preview =
                handler
                    .templates
                    .render_named(Some(guild_id), &key, &example_placeholders());

            Response::new().embed(
                CreateEmbed::new()
                    .title(format!("Message Preview: {key}"))
                    .color(if custom.is_some() { 0x00FF00 } else { 0xFFFF00 })
                    .field(
                        "Current message preview",
                        format!(
                            "```{}```\n*(Placeholders filled with examples.)*",
                            truncate(&preview)
                        ),
                        false,
                    )
                    .field(
                        "Custom setting",
                        custom.map_or_else(
                            || "Not set (using default)".to_string(),
                            |custom| format!("```{}```", truncate(&custom)),
                        ),
                        false,
                    )
                    .field(
                        "Default value",
                        format!("```{}```", truncate(default_text)),
                        false,
                    ),
            )
        }
        "reset" => {
            if handler.templates.default_text(&key).is_none() {
                return Err(invalid_key(&key));
            }
            if handler.templates.reset(guild_id, &key) {
                Response::new().content(format!("Custom message for `{key}` has been reset."))
            } else {
                Response::new().content(format!(
                    "There is no custom message for `{key}`, it already uses the default."
                ))
            }
        }
        "listkeys" => {
            let pages = key_pages(&handler.templates.keys());
            let count = pages.len().min(MAX_EMBEDS);
            let embeds = pages
                .into_iter()
                .take(MAX_EMBEDS)
                .enumerate()
                .map(|(index, page)| {
                    let embed = CreateEmbed::new()
                        .title(if index == 0 {
                            "Available Message Keys"
                        } else {
                            "Available Message Keys (Cont.)"
                        })
                        .description(page)
                        .color(0x0099FF);
                    if index + 1 == count {
                        embed.footer(CreateEmbedFooter::new(
                            "Use keys with /giveawayutil customizemessage <set|view|reset>",
                        ))
                    } else {
                        embed
                    }
                })
                .collect();
            Response::new().embeds(embeds)
        }
        _ => {
            return Err(ResponseError::Execution(format!(
                "Unknown subcommand {subcommand}"
            )))
        }
    };

    ctx.reply(cmd, response.quiet().ephemeral(true)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pages_split_before_the_limit() {
        let key = "K".repeat(1000);
        let keys = vec![key.as_str(); 5];
        let pages = key_pages(&keys);
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|page| page.len() <= KEY_LIST_LIMIT));
        assert_eq!(pages.concat().matches('K').count(), 5000);
    }

    #[test]
    fn test_key_pages_of_nothing() {
        assert!(key_pages(&[]).is_empty());
    }
}
