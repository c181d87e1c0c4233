use std::sync::atomic::Ordering;

use serenity::{
    all::CommandInteraction,
    builder::{
        CreateInteractionResponse, CreateInteractionResponseFollowup,
        CreateInteractionResponseMessage,
    },
};
use tracing::{debug, error};

use crate::models::{
    command::{CommandContext, CommandContextReply, FailedCommandContext},
    response::{Response, ResponseError, ResponseResult},
};

fn response_message(response: Response) -> CreateInteractionResponseMessage {
    let mut reply = CreateInteractionResponseMessage::new();
    if let Some(content) = response.content {
        reply = reply.content(content);
    }
    if let Some(embeds) = response.embeds {
        reply = reply.embeds(embeds);
    }
    if let Some(allowed_mentions) = response.allowed_mentions {
        reply = reply.allowed_mentions(allowed_mentions);
    }
    if response.ephemeral {
        reply = reply.ephemeral(true);
    }
    reply
}

fn followup_message(response: Response) -> CreateInteractionResponseFollowup {
    let mut followup = CreateInteractionResponseFollowup::new();
    if let Some(content) = response.content {
        followup = followup.content(content);
    }
    if let Some(embeds) = response.embeds {
        followup = followup.embeds(embeds);
    }
    if let Some(allowed_mentions) = response.allowed_mentions {
        followup = followup.allowed_mentions(allowed_mentions);
    }
    if response.ephemeral {
        followup = followup.ephemeral(true);
    }
    followup
}

#[async_trait::async_trait]
impl CommandContextReply for CommandContext {
    /// The first reply answers the interaction, later ones are follow ups.
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult {
        let start = std::time::Instant::now();
        if self.has_responded.load(Ordering::Relaxed) {
            if let Err(err) = cmd
                .create_followup(&self.ctx.http, followup_message(response))
                .await
            {
                error!("Attempted to follow up on a command, failed with error: {err}");
                return Err(ResponseError::Serenity(err));
            }
        } else {
            if let Err(err) = cmd
                .create_response(
                    &self.ctx.http,
                    CreateInteractionResponse::Message(response_message(response)),
                )
                .await
            {
                error!("Attempted to create a response to a command, failed with error: {err}");
                return Err(ResponseError::Serenity(err));
            }
            self.has_responded.store(true, Ordering::Relaxed);
        }

        debug!("Took {:?} to reply to a command", start.elapsed());
        Ok(())
    }
}

impl CommandContext {
    /// Acknowledges the command privately so slow work does not outlive the
    /// interaction token. Later replies become follow ups.
    pub async fn defer(&self, cmd: &CommandInteraction) -> ResponseResult {
        if self.has_responded.load(Ordering::Relaxed) {
            return Ok(());
        }
        if let Err(err) = cmd.defer_ephemeral(&self.ctx.http).await {
            error!("Attempted to defer a command, failed with error: {err}");
            return Err(ResponseError::Serenity(err));
        }
        self.has_responded.store(true, Ordering::Relaxed);
        Ok(())
    }
}

#[async_trait::async_trait]
impl CommandContextReply for FailedCommandContext {
    async fn reply(&self, cmd: &CommandInteraction, response: Response) -> ResponseResult {
        if let Err(err) = cmd
            .create_response(
                &self.ctx.http,
                CreateInteractionResponse::Message(response_message(response)),
            )
            .await
        {
            error!("Attempted to create a response to a command, failed with error: {err}");
            return Err(ResponseError::Serenity(err));
        }
        Ok(())
    }
}
