pub mod command;
pub mod config;
pub mod giveaway;
pub mod handler;
pub mod message;
pub mod permissions;
pub mod response;
