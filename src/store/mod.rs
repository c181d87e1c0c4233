pub mod creator_roles;
pub mod giveaways;
pub mod json;
pub mod log_channels;
pub mod templates;
