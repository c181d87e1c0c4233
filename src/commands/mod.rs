use crate::models::command::Command;

pub mod giveaway;
pub mod giveawayutil;

pub fn get_command_list() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(giveaway::GiveawayCommand),
        Box::new(giveawayutil::GiveawayUtilCommand),
    ]
}
