use serenity::all::{GuildId, RoleId};
use tracing::{debug, warn};

use crate::models::giveaway::{EligibilityRules, Entrant};

use super::announcer::MemberInfoProvider;

/// One narrowing step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    RequiredRole(RoleId),
    RequiredRolesAll,
    BlacklistedRoles,
    MinServerDuration(i64),
    MinAccountDuration(i64),
}

impl Stage {
    fn name(self) -> &'static str {
        match self {
            Stage::RequiredRole(_) => "required_role",
            Stage::RequiredRolesAll => "required_roles_all",
            Stage::BlacklistedRoles => "blacklisted_roles",
            Stage::MinServerDuration(_) => "min_server_duration",
            Stage::MinAccountDuration(_) => "min_account_duration",
        }
    }
}

/// The entrants left after every stage ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screening {
    pub eligible: Vec<Entrant>,
    /// Set when the required role could not be found and its stage was skipped.
    pub missing_required_role: Option<RoleId>,
}

/// Applies a giveaway's rule set to a pool of entrants.
pub struct EligibilityPipeline<'a> {
    guild_id: GuildId,
    rules: &'a EligibilityRules,
    members: &'a dyn MemberInfoProvider,
    now_ms: i64,
}

impl<'a> EligibilityPipeline<'a> {
    pub fn new(
        guild_id: GuildId,
        rules: &'a EligibilityRules,
        members: &'a dyn MemberInfoProvider,
        now_ms: i64,
    ) -> Self {
        EligibilityPipeline {
            guild_id,
            rules,
            members,
            now_ms,
        }
    }

    /// Bots are always removed; every other stage only runs when its rule
    /// is set. Entrants whose data cannot be resolved are dropped.
    pub async fn filter(&self, pool: &[Entrant]) -> Screening {
        let mut eligible: Vec<Entrant> = pool.iter().filter(|entrant| !entrant.bot).cloned().collect();
        debug!(
            "Filtering {} entrants ({} after removing bots) in guild {}",
            pool.len(),
            eligible.len(),
            self.guild_id
        );

        let (stages, missing_required_role) = self.stages().await;
        for stage in stages {
            if eligible.is_empty() {
                break;
            }
            let before = eligible.len();
            let mut survivors = Vec::with_capacity(before);
            for entrant in eligible {
                if self.admits(stage, &entrant).await {
                    survivors.push(entrant);
                }
            }
            debug!(
                "Stage {} kept {} of {} entrants",
                stage.name(),
                survivors.len(),
                before
            );
            eligible = survivors;
        }

        Screening {
            eligible,
            missing_required_role,
        }
    }

    async fn stages(&self) -> (Vec<Stage>, Option<RoleId>) {
        let mut stages = vec![];
        let mut missing_required_role = None;

        // A required role that no longer exists is skipped rather than
        // excluding everyone.
        if let Some(role_id) = self.rules.required_role {
            match self.members.role_exists(self.guild_id, role_id).await {
                Ok(true) => stages.push(Stage::RequiredRole(role_id)),
                Ok(false) => {
                    warn!(
                        "Required role {role_id} was not found in guild {}, skipping the role check",
                        self.guild_id
                    );
                    missing_required_role = Some(role_id);
                }
                Err(err) => {
                    warn!(
                        "Could not look up required role {role_id} in guild {}, skipping the role check. Failed with error: {err}",
                        self.guild_id
                    );
                    missing_required_role = Some(role_id);
                }
            }
        }
        if !self.rules.required_roles_all.is_empty() {
            stages.push(Stage::RequiredRolesAll);
        }
        if !self.rules.blacklisted_roles.is_empty() {
            stages.push(Stage::BlacklistedRoles);
        }
        if let Some(duration) = self.rules.min_server_duration_ms.filter(|ms| *ms > 0) {
            stages.push(Stage::MinServerDuration(duration));
        }
        if let Some(duration) = self.rules.min_account_duration_ms.filter(|ms| *ms > 0) {
            stages.push(Stage::MinAccountDuration(duration));
        }

        (stages, missing_required_role)
    }

    async fn admits(&self, stage: Stage, entrant: &Entrant) -> bool {
        let user_id = entrant.user_id;
        let result = match stage {
            Stage::RequiredRole(role_id) => {
                self.members.has_role(self.guild_id, user_id, role_id).await
            }
            Stage::RequiredRolesAll => self.has_every_role(entrant).await,
            Stage::BlacklistedRoles => self.has_any_blacklisted_role(entrant).await.map(|hit| !hit),
            Stage::MinServerDuration(duration) => self
                .members
                .join_timestamp(self.guild_id, user_id)
                .await
                .map(|joined| joined.is_some_and(|joined| self.now_ms - joined >= duration)),
            Stage::MinAccountDuration(duration) => self
                .members
                .account_creation_timestamp(user_id)
                .await
                .map(|created| self.now_ms - created >= duration),
        };

        match result {
            Ok(admitted) => admitted,
            Err(err) => {
                warn!(
                    "Could not resolve member {user_id} for the {} check, excluding them. Failed with error: {err}",
                    stage.name()
                );
                false
            }
        }
    }

    async fn has_every_role(&self, entrant: &Entrant) -> Result<bool, crate::error::PlatformError> {
        for role_id in &self.rules.required_roles_all {
            if !self
                .members
                .has_role(self.guild_id, entrant.user_id, *role_id)
                .await?
            {
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn has_any_blacklisted_role(
        &self,
        entrant: &Entrant,
    ) -> Result<bool, crate::error::PlatformError> {
        for role_id in &self.rules.blacklisted_roles {
            if self
                .members
                .has_role(self.guild_id, entrant.user_id, *role_id)
                .await?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
