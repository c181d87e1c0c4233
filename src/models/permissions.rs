use serenity::all::{Permissions, RoleId};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
pub enum Permission {
    #[strum(serialize = "giveaway.create")]
    GiveawayCreate,
    #[strum(serialize = "giveaway.manage")]
    GiveawayManage,
}

/// What a member may do with giveaways. Server managers may do everything;
/// members holding a creator role may only create giveaways.
pub fn resolve_permissions(
    is_owner: bool,
    member_permissions: Option<Permissions>,
    member_roles: &[RoleId],
    creator_roles: &[RoleId],
) -> Vec<Permission> {
    let is_manager = is_owner
        || member_permissions
            .is_some_and(|permissions| permissions.administrator() || permissions.manage_guild());
    if is_manager {
        return Permission::iter().collect();
    }

    if member_roles.iter().any(|role| creator_roles.contains(role)) {
        vec![Permission::GiveawayCreate]
    } else {
        vec![]
    }
}
