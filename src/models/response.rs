use serenity::builder::{CreateAllowedMentions, CreateEmbed};
use thiserror::Error as ThisError;

pub struct Response {
    pub content: Option<String>,
    pub embeds: Option<Vec<CreateEmbed>>,
    pub allowed_mentions: Option<CreateAllowedMentions>,
    pub ephemeral: bool,
}

#[derive(Debug, ThisError)]
pub enum ResponseError {
    #[error("{0}")]
    Serenity(#[from] serenity::Error),
    /// A failure the user should see, already rendered for their guild.
    #[error("{0}")]
    Execution(String),
}

pub type ResponseResult = Result<(), ResponseError>;

impl Response {
    pub fn new() -> Self {
        Response {
            content: None,
            embeds: None,
            allowed_mentions: None,
            ephemeral: false,
        }
    }

    pub fn content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds = Some(vec![embed]);
        self
    }

    pub fn embeds(mut self, embeds: Vec<CreateEmbed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    /// Replies never ping the roles or users they mention.
    pub fn quiet(mut self) -> Self {
        self.allowed_mentions = Some(CreateAllowedMentions::new());
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}
