use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, ResolvedOption, ResolvedValue, RoleId,
};

#[derive(Debug, Clone)]
pub struct Options<'a> {
    pub options: Vec<ResolvedOption<'a>>,
}

fn find<'o, 'a>(options: &'o [ResolvedOption<'a>], name: &str) -> Option<&'o ResolvedValue<'a>> {
    for option in options {
        match &option.value {
            ResolvedValue::SubCommandGroup(sub_options) | ResolvedValue::SubCommand(sub_options) => {
                return find(sub_options, name);
            }
            value if option.name == name => return Some(value),
            _ => continue,
        }
    }
    None
}

impl<'a> Options<'a> {
    pub fn new(cmd: &'a CommandInteraction) -> Self {
        Options {
            options: cmd.data.options(),
        }
    }

    /// The subcommand group and subcommand names, outermost first.
    pub fn subcommand_path(&self) -> Vec<&'a str> {
        let mut path = vec![];
        let mut options = self.options.as_slice();
        while let Some(option) = options.first() {
            match &option.value {
                ResolvedValue::SubCommandGroup(sub_options)
                | ResolvedValue::SubCommand(sub_options) => {
                    path.push(option.name);
                    options = sub_options;
                }
                _ => break,
            }
        }
        path
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        match find(&self.options, name) {
            Some(ResolvedValue::String(string)) => Some((*string).to_string()),
            _ => None,
        }
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        match find(&self.options, name) {
            Some(ResolvedValue::Integer(integer)) => Some(*integer),
            _ => None,
        }
    }

    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        match find(&self.options, name) {
            Some(ResolvedValue::Boolean(boolean)) => Some(*boolean),
            _ => None,
        }
    }

    pub fn get_role(&self, name: &str) -> Option<RoleId> {
        match find(&self.options, name) {
            Some(ResolvedValue::Role(role)) => Some(role.id),
            _ => None,
        }
    }

    pub fn get_channel(&self, name: &str) -> Option<(ChannelId, ChannelType)> {
        match find(&self.options, name) {
            Some(ResolvedValue::Channel(channel)) => Some((channel.id, channel.kind)),
            _ => None,
        }
    }
}
