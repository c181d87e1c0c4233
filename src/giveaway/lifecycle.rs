use std::sync::Arc;

use objectid::ObjectId;
use serenity::all::{GuildId, MessageId, UserId};
use tracing::{debug, error, info, warn};

use crate::{
    common::{clock::Clock, duration::format_duration, logging::EventLog},
    error::{GiveawayError, IllegalState, PlatformError, Result, ValidationError},
    models::{
        giveaway::{
            Entrant, GiveawayChanges, GiveawayParams, GiveawayRecord, Phase,
            DEFAULT_GIVEAWAY_COLOR, ENTRY_REACTION,
        },
        message::MessageKey,
    },
    store::{giveaways::GiveawayStore, templates::MessageTemplates},
};

use super::{
    announcer::{Announcer, MemberInfoProvider},
    eligibility::EligibilityPipeline,
    render,
    render::winner_mentions,
    sampler::select_winners,
    timers::{delay_from_millis, TimerKey, TimerRegistry},
};

/// How a call to [`GiveawayManager::end_giveaway`] finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndOutcome {
    /// The giveaway was unknown or had already ended.
    Skipped,
    NoEntrants,
    Winners(Vec<Entrant>),
    /// The giveaway is ended but its results could not be announced.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub changes: Vec<String>,
    /// Set when the change was saved but the live message kept its old text.
    pub refresh_error: Option<String>,
}

impl EditOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Drives every giveaway through scheduled, active and ended.
#[derive(Clone)]
pub struct GiveawayManager {
    store: Arc<GiveawayStore>,
    timers: Arc<TimerRegistry>,
    announcer: Arc<dyn Announcer>,
    members: Arc<dyn MemberInfoProvider>,
    templates: Arc<MessageTemplates>,
    events: Arc<EventLog>,
    clock: Arc<dyn Clock>,
}

impl GiveawayManager {
    pub fn new(
        store: Arc<GiveawayStore>,
        announcer: Arc<dyn Announcer>,
        members: Arc<dyn MemberInfoProvider>,
        templates: Arc<MessageTemplates>,
        events: Arc<EventLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        GiveawayManager {
            store,
            timers: Arc::new(TimerRegistry::new()),
            announcer,
            members,
            templates,
            events,
            clock,
        }
    }

    pub fn store(&self) -> &GiveawayStore {
        &self.store
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub(super) fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub(super) fn arm_start_timer(&self, schedule_id: &str, delay_ms: i64) {
        let manager = self.clone();
        let schedule_id = schedule_id.to_string();
        self.timers.arm(
            TimerKey::Schedule(schedule_id.clone()),
            delay_from_millis(delay_ms),
            async move {
                manager.initiate_scheduled_giveaway(&schedule_id).await;
            },
        );
    }

    pub(super) fn arm_end_timer(&self, entry_id: MessageId, end_time: i64) {
        let manager = self.clone();
        self.timers.arm(
            TimerKey::Entry(entry_id),
            delay_from_millis(end_time - self.clock.now_ms()),
            async move {
                manager.end_giveaway(entry_id).await;
            },
        );
    }

    /// Creates a giveaway that posts its entry message after `start_in_ms`.
    pub async fn schedule(&self, params: GiveawayParams, start_in_ms: i64) -> Result<GiveawayRecord> {
        let placeholders = [
            ("user_id", params.host_id.to_string()),
            ("prize", params.prize.clone()),
            ("start_in", format_duration(start_in_ms, true)),
            ("duration", format_duration(params.duration_ms, true)),
        ];
        self.events
            .log(
                Some(params.guild_id),
                MessageKey::LogGiveawayScheduleAttempt,
                &placeholders,
            )
            .await;

        if start_in_ms <= 0 {
            return Err(ValidationError::InvalidStartTime.into());
        }
        let now = self.clock.now_ms();
        let start_time = now.saturating_add(start_in_ms);
        let record = new_record(
            new_record_id("scheduled", now),
            Phase::Scheduled,
            params,
            start_time,
        )?;

        self.store.add(record.clone());
        self.arm_start_timer(&record.id, start_in_ms);
        info!(
            "Scheduled giveaway {} in guild {} to start in {start_in_ms}ms",
            record.id, record.guild_id
        );

        let placeholders = [
            ("host_id", record.host_id.to_string()),
            ("prize", record.prize.clone()),
            ("schedule_id", record.id.clone()),
            ("start_timestamp", (record.start_time / 1000).to_string()),
        ];
        self.events
            .log(Some(record.guild_id), MessageKey::LogGiveawayScheduled, &placeholders)
            .await;

        Ok(record)
    }

    /// Posts the entry message for a scheduled giveaway. A giveaway whose
    /// message cannot be posted is abandoned, never retried.
    pub async fn initiate_scheduled_giveaway(&self, schedule_id: &str) {
        let schedule_key = TimerKey::Schedule(schedule_id.to_string());
        let Some(scheduled) = self.store.find_by_schedule_id(schedule_id) else {
            debug!("Scheduled giveaway {schedule_id} is no longer waiting to start");
            self.timers.disarm(&schedule_key);
            return;
        };

        // The entrants get the full duration from the moment the message is up.
        let now = self.clock.now_ms();
        let mut starting = scheduled.clone();
        starting.start_time = now;
        starting.end_time = now.saturating_add(scheduled.duration_ms);

        let message = render::entry_message(&self.templates, &starting);
        match self
            .announcer
            .send_entry_message(starting.channel_id, &message)
            .await
        {
            Ok(entry_id) => {
                let started = self.store.modify(schedule_id, |giveaway| {
                    if !giveaway.is_scheduled() {
                        return None;
                    }
                    giveaway.phase = Phase::Active { entry_id };
                    giveaway.start_time = starting.start_time;
                    giveaway.end_time = starting.end_time;
                    Some(giveaway.clone())
                });
                self.timers.disarm(&schedule_key);

                let Some(record) = started else {
                    warn!(
                        "Scheduled giveaway {schedule_id} changed while its entry message {entry_id} was being posted"
                    );
                    return;
                };
                self.arm_end_timer(entry_id, record.end_time);
                info!("Scheduled giveaway {schedule_id} started as {entry_id}");

                let placeholders = [
                    ("schedule_id", schedule_id.to_string()),
                    ("prize", record.prize.clone()),
                    ("message_id", entry_id.to_string()),
                ];
                self.events
                    .log(
                        Some(record.guild_id),
                        MessageKey::LogScheduledGiveawayStarted,
                        &placeholders,
                    )
                    .await;
            }
            Err(err) => {
                error!(
                    "Attempted to start scheduled giveaway {schedule_id}, but failed with error: {err}"
                );
                let prefix = self.templates.render(
                    Some(scheduled.guild_id),
                    MessageKey::GiveawayScheduledFailPrefix,
                    &[],
                );
                self.store.modify(schedule_id, |giveaway| {
                    if !giveaway.is_scheduled() {
                        return None;
                    }
                    giveaway.phase = Phase::Ended { entry_id: None };
                    giveaway.prize = format!("{prefix}{}", giveaway.prize);
                    Some(())
                });
                self.timers.disarm(&schedule_key);

                let placeholders = [
                    ("schedule_id", schedule_id.to_string()),
                    ("prize", scheduled.prize.clone()),
                    ("error_message", err.to_string()),
                ];
                self.events
                    .log(
                        Some(scheduled.guild_id),
                        MessageKey::LogScheduledGiveawayInitError,
                        &placeholders,
                    )
                    .await;
            }
        }
    }

    /// Posts the entry message right away. Nothing is stored if posting fails.
    pub async fn start(&self, params: GiveawayParams) -> Result<GiveawayRecord> {
        let placeholders = [
            ("user_id", params.host_id.to_string()),
            ("prize", params.prize.clone()),
            ("winners_count", params.winners_count.to_string()),
            ("duration", format_duration(params.duration_ms, true)),
        ];
        self.events
            .log(
                Some(params.guild_id),
                MessageKey::LogGiveawayStartAttempt,
                &placeholders,
            )
            .await;

        let now = self.clock.now_ms();
        let mut record = new_record(
            new_record_id("giveaway", now),
            Phase::Scheduled,
            params,
            now,
        )?;

        let message = render::entry_message(&self.templates, &record);
        let entry_id = self
            .announcer
            .send_entry_message(record.channel_id, &message)
            .await
            .map_err(|err| {
                error!(
                    "Attempted to post the entry message for giveaway {}, but failed with error: {err}",
                    record.id
                );
                err
            })?;

        record.phase = Phase::Active { entry_id };
        self.store.add(record.clone());
        self.arm_end_timer(entry_id, record.end_time);
        info!(
            "Started giveaway {} as {entry_id} in guild {}",
            record.id, record.guild_id
        );

        let placeholders = [
            ("host_id", record.host_id.to_string()),
            ("prize", record.prize.clone()),
            ("message_id", entry_id.to_string()),
            ("end_timestamp", (record.end_time / 1000).to_string()),
        ];
        self.events
            .log(Some(record.guild_id), MessageKey::LogGiveawayStarted, &placeholders)
            .await;

        Ok(record)
    }

    /// Applies the fields set in `changes` to an active giveaway. The end
    /// time can only move later.
    pub async fn edit(
        &self,
        guild_id: GuildId,
        entry_id: MessageId,
        user_id: UserId,
        changes: GiveawayChanges,
    ) -> Result<EditOutcome> {
        let requested = changes.requested_fields();
        let placeholders = [
            ("user_id", user_id.to_string()),
            ("message_id", entry_id.to_string()),
            (
                "requested",
                if requested.is_empty() {
                    "no changes".to_string()
                } else {
                    requested.join(", ")
                },
            ),
        ];
        self.events
            .log(Some(guild_id), MessageKey::LogGiveawayEditAttempt, &placeholders)
            .await;

        let current = self.find_in_guild(guild_id, entry_id)?;
        ensure_active(&current)?;
        validate_changes(&changes, &current, self.clock.now_ms())?;

        let mut preview = current.clone();
        let changed = apply_changes(&mut preview, &changes);
        if changed.is_empty() {
            debug!("Edit of giveaway {entry_id} changed nothing");
            return Ok(EditOutcome::default());
        }

        let updated = self
            .store
            .modify(&current.id, |giveaway| {
                if !giveaway.is_active() {
                    return None;
                }
                apply_changes(giveaway, &changes);
                Some(giveaway.clone())
            })
            .ok_or(IllegalState::AlreadyEnded)?;

        if updated.end_time != current.end_time {
            self.arm_end_timer(entry_id, updated.end_time);
        }

        let mut outcome = EditOutcome {
            changes: changed,
            refresh_error: None,
        };
        let message = render::entry_message(&self.templates, &updated);
        if let Err(err) = self
            .announcer
            .edit_message(updated.channel_id, entry_id, &message)
            .await
        {
            warn!("Giveaway {entry_id} was edited, but its message could not be updated: {err}");
            let placeholders = [
                ("message_id", entry_id.to_string()),
                ("error_message", err.to_string()),
            ];
            self.events
                .log(Some(guild_id), MessageKey::LogGiveawayEditEmbedFail, &placeholders)
                .await;
            outcome.refresh_error = Some(err.to_string());
        }

        let placeholders = [
            ("message_id", entry_id.to_string()),
            ("changes", outcome.changes.join(", ")),
        ];
        self.events
            .log(Some(guild_id), MessageKey::LogGiveawayEditSuccess, &placeholders)
            .await;

        Ok(outcome)
    }

    /// Ends a giveaway and announces its winners. Safe to call any number of
    /// times; only the first call for a giveaway does anything.
    pub async fn end_giveaway(&self, entry_id: MessageId) -> EndOutcome {
        let Some(found) = self.store.find_by_entry_id(entry_id) else {
            debug!("No giveaway {entry_id} to end");
            return EndOutcome::Skipped;
        };

        let ended = self.store.modify(&found.id, |giveaway| {
            if !giveaway.is_active() {
                return None;
            }
            giveaway.phase = Phase::Ended {
                entry_id: Some(entry_id),
            };
            Some(giveaway.clone())
        });
        let Some(record) = ended else {
            debug!("Giveaway {entry_id} has already ended");
            return EndOutcome::Skipped;
        };
        self.timers.disarm(&TimerKey::Entry(entry_id));
        info!("Ending giveaway {entry_id} in guild {}", record.guild_id);

        match self.announce_results(&record, entry_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Attempted to end giveaway {entry_id}, but failed with error: {err}");
                let placeholders = [
                    ("message_id", entry_id.to_string()),
                    ("error_message", err.to_string()),
                ];
                self.events
                    .log(Some(record.guild_id), MessageKey::LogEndGiveawayError, &placeholders)
                    .await;

                let notice = render::end_failure_notice(&self.templates, &record, entry_id);
                if let Err(err) = self.announcer.send_message(record.channel_id, &notice).await {
                    error!(
                        "Could not tell channel {} that giveaway {entry_id} failed to end. Failed with error: {err}",
                        record.channel_id
                    );
                }
                EndOutcome::Failed(err.to_string())
            }
        }
    }

    async fn announce_results(
        &self,
        record: &GiveawayRecord,
        entry_id: MessageId,
    ) -> std::result::Result<EndOutcome, PlatformError> {
        let eligible = self.eligible_entrants(record, entry_id, "ending").await?;
        let now = self.clock.now_ms();

        let ended_message = render::ended_entry_message(&self.templates, record, now);
        if let Err(err) = self
            .announcer
            .edit_message(record.channel_id, entry_id, &ended_message)
            .await
        {
            warn!("Could not mark the message of giveaway {entry_id} as ended: {err}");
        }

        if eligible.is_empty() {
            let notice = render::no_entries_notice(&self.templates, record);
            self.announcer.send_message(record.channel_id, &notice).await?;
            info!("Giveaway {entry_id} ended without valid entrants");

            let placeholders = [
                ("prize", record.prize.clone()),
                ("message_id", entry_id.to_string()),
            ];
            self.events
                .log(
                    Some(record.guild_id),
                    MessageKey::LogEndGiveawayNoValidEntrants,
                    &placeholders,
                )
                .await;
            return Ok(EndOutcome::NoEntrants);
        }

        let winners = draw(&eligible, record.winners_count);
        let announcement =
            render::winner_announcement(&self.templates, record, entry_id, &winners, now);
        self.announcer
            .send_message(record.channel_id, &announcement)
            .await?;
        info!(
            "Giveaway {entry_id} ended with {} winners out of {} eligible entrants",
            winners.len(),
            eligible.len()
        );

        let placeholders = [
            ("prize", record.prize.clone()),
            ("message_id", entry_id.to_string()),
            ("winner_mentions", winner_mentions(&winners)),
        ];
        self.events
            .log(Some(record.guild_id), MessageKey::LogGiveawayEnded, &placeholders)
            .await;

        Ok(EndOutcome::Winners(winners))
    }

    /// Ends a giveaway on behalf of `user_id`, reporting why it cannot be
    /// ended instead of silently skipping it.
    pub async fn request_end(
        &self,
        guild_id: GuildId,
        entry_id: MessageId,
        user_id: UserId,
    ) -> Result<EndOutcome> {
        let placeholders = [
            ("user_id", user_id.to_string()),
            ("message_id", entry_id.to_string()),
        ];
        self.events
            .log(Some(guild_id), MessageKey::LogManualEndAttempt, &placeholders)
            .await;

        let record = self.find_in_guild(guild_id, entry_id)?;
        ensure_active(&record)?;

        let outcome = self.end_giveaway(entry_id).await;
        if outcome == EndOutcome::Skipped {
            return Err(IllegalState::AlreadyEnded.into());
        }

        let placeholders = [
            ("user_id", user_id.to_string()),
            ("prize", record.prize.clone()),
            ("message_id", entry_id.to_string()),
        ];
        self.events
            .log(Some(guild_id), MessageKey::LogManualEndSuccess, &placeholders)
            .await;

        Ok(outcome)
    }

    /// Draws new winners for an ended giveaway on behalf of `user_id`.
    /// Nothing about the stored giveaway changes.
    pub async fn reroll(
        &self,
        guild_id: GuildId,
        entry_id: MessageId,
        user_id: UserId,
        winners_count: Option<i64>,
    ) -> Result<Vec<Entrant>> {
        let found = self.store.find_by_entry_id_in_guild(guild_id, entry_id);
        let requested_count = winners_count
            .or_else(|| found.as_ref().map(|giveaway| i64::from(giveaway.winners_count)))
            .map_or_else(|| "N/A".to_string(), |count| count.to_string());
        let placeholders = [
            ("user_id", user_id.to_string()),
            ("message_id", entry_id.to_string()),
            ("winners_count", requested_count),
        ];
        self.events
            .log(Some(guild_id), MessageKey::LogRerollAttempt, &placeholders)
            .await;

        match self.reroll_checked(guild_id, entry_id, winners_count).await {
            Ok((record, winners)) => {
                let placeholders = [
                    ("user_id", user_id.to_string()),
                    ("prize", record.prize.clone()),
                    ("message_id", entry_id.to_string()),
                    ("winner_mentions", winner_mentions(&winners)),
                ];
                self.events
                    .log(Some(guild_id), MessageKey::LogRerollSuccess, &placeholders)
                    .await;
                Ok(winners)
            }
            Err(err) => {
                let placeholders = [
                    ("user_id", user_id.to_string()),
                    ("message_id", entry_id.to_string()),
                    ("reason", err.to_string()),
                ];
                self.events
                    .log(Some(guild_id), MessageKey::LogRerollFailed, &placeholders)
                    .await;
                Err(err)
            }
        }
    }

    async fn reroll_checked(
        &self,
        guild_id: GuildId,
        entry_id: MessageId,
        winners_count: Option<i64>,
    ) -> Result<(GiveawayRecord, Vec<Entrant>)> {
        let record = self.find_in_guild(guild_id, entry_id)?;
        match record.phase {
            Phase::Scheduled => return Err(IllegalState::Scheduled.into()),
            Phase::Active { .. } => return Err(IllegalState::NotEnded.into()),
            Phase::Ended { .. } => {}
        }
        let count = match winners_count {
            Some(count) => parse_winners_count(count)?,
            None => record.winners_count,
        };

        match self.reroll_winners(&record, entry_id, count).await {
            Ok(winners) => Ok((record, winners)),
            Err(GiveawayError::NoEligibleEntrants) => {
                let placeholders = [("message_id", entry_id.to_string())];
                self.events
                    .log(
                        Some(guild_id),
                        MessageKey::LogRerollGiveawayNoValidEntrants,
                        &placeholders,
                    )
                    .await;
                Err(GiveawayError::NoEligibleEntrants)
            }
            Err(err) => {
                error!("Attempted to reroll giveaway {entry_id}, but failed with error: {err}");
                let placeholders = [
                    ("message_id", entry_id.to_string()),
                    ("error_message", err.to_string()),
                ];
                self.events
                    .log(Some(guild_id), MessageKey::LogRerollGiveawayError, &placeholders)
                    .await;
                Err(err)
            }
        }
    }

    async fn reroll_winners(
        &self,
        record: &GiveawayRecord,
        entry_id: MessageId,
        count: u32,
    ) -> Result<Vec<Entrant>> {
        let eligible = self.eligible_entrants(record, entry_id, "rerolling").await?;
        if eligible.is_empty() {
            return Err(GiveawayError::NoEligibleEntrants);
        }

        let winners = draw(&eligible, count);
        let announcement = render::reroll_announcement(
            &self.templates,
            record,
            entry_id,
            &winners,
            self.clock.now_ms(),
        );
        self.announcer
            .send_message(record.channel_id, &announcement)
            .await?;
        info!("Rerolled giveaway {entry_id}, {} new winners", winners.len());

        let placeholders = [
            ("prize", record.prize.clone()),
            ("message_id", entry_id.to_string()),
            ("winner_mentions", winner_mentions(&winners)),
        ];
        self.events
            .log(
                Some(record.guild_id),
                MessageKey::LogGiveawayRerolledWinners,
                &placeholders,
            )
            .await;

        Ok(winners)
    }

    async fn eligible_entrants(
        &self,
        record: &GiveawayRecord,
        entry_id: MessageId,
        context: &str,
    ) -> std::result::Result<Vec<Entrant>, PlatformError> {
        let reactors = self
            .announcer
            .fetch_reactors(record.channel_id, entry_id, ENTRY_REACTION)
            .await?;
        let pipeline = EligibilityPipeline::new(
            record.guild_id,
            &record.rules,
            self.members.as_ref(),
            self.clock.now_ms(),
        );
        let screening = pipeline.filter(&reactors).await;

        if let Some(role_id) = screening.missing_required_role {
            let placeholders = [
                ("role_id", role_id.to_string()),
                ("message_id", entry_id.to_string()),
                ("context", context.to_string()),
            ];
            self.events
                .log(
                    Some(record.guild_id),
                    MessageKey::LogValidationRoleNotFound,
                    &placeholders,
                )
                .await;
        }
        Ok(screening.eligible)
    }

    fn find_in_guild(&self, guild_id: GuildId, entry_id: MessageId) -> Result<GiveawayRecord> {
        self.store
            .find_by_entry_id_in_guild(guild_id, entry_id)
            .ok_or_else(|| GiveawayError::NotFound(entry_id.to_string()))
    }
}

fn draw(eligible: &[Entrant], count: u32) -> Vec<Entrant> {
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    select_winners(eligible, count, &mut rand::thread_rng())
}

fn new_record_id(prefix: &str, now_ms: i64) -> String {
    match ObjectId::new() {
        Ok(id) => format!("{prefix}_{id}"),
        Err(err) => {
            warn!("Could not generate an object id, falling back to a random id: {err:?}");
            format!("{prefix}_{now_ms}_{:08x}", rand::random::<u32>())
        }
    }
}

fn parse_winners_count(count: i64) -> std::result::Result<u32, ValidationError> {
    u32::try_from(count)
        .ok()
        .filter(|count| *count >= 1)
        .ok_or(ValidationError::InvalidWinnersCount)
}

fn new_record(
    id: String,
    phase: Phase,
    params: GiveawayParams,
    start_time: i64,
) -> Result<GiveawayRecord> {
    if params.duration_ms <= 0 {
        return Err(ValidationError::InvalidDuration.into());
    }
    let winners_count = parse_winners_count(params.winners_count)?;

    Ok(GiveawayRecord {
        id,
        phase,
        guild_id: params.guild_id,
        channel_id: params.channel_id,
        prize: params.prize,
        winners_count,
        host_id: params.host_id,
        start_time,
        end_time: start_time.saturating_add(params.duration_ms),
        duration_ms: params.duration_ms,
        rules: params.rules,
        image_url: params.image_url,
        embed_color: params.embed_color.unwrap_or(DEFAULT_GIVEAWAY_COLOR),
    })
}

fn ensure_active(record: &GiveawayRecord) -> std::result::Result<(), IllegalState> {
    match record.phase {
        Phase::Active { .. } => Ok(()),
        Phase::Scheduled => Err(IllegalState::Scheduled),
        Phase::Ended { .. } => Err(IllegalState::AlreadyEnded),
    }
}

fn validate_changes(
    changes: &GiveawayChanges,
    record: &GiveawayRecord,
    now_ms: i64,
) -> std::result::Result<(), ValidationError> {
    if let Some(count) = changes.winners_count {
        parse_winners_count(count)?;
    }
    if let Some(extend_by) = changes.extend_by_ms {
        if extend_by <= 0 {
            return Err(ValidationError::InvalidExtension);
        }
        if record.end_time.saturating_add(extend_by) <= now_ms {
            return Err(ValidationError::ExtensionExpired);
        }
    }
    Ok(())
}

/// Writes the requested changes into `record` and names the fields that
/// actually changed. Expects `changes` to be validated.
fn apply_changes(record: &mut GiveawayRecord, changes: &GiveawayChanges) -> Vec<String> {
    fn set<T: PartialEq + Clone>(
        field: &mut T,
        value: &Option<T>,
        name: &str,
        changed: &mut Vec<String>,
    ) {
        if let Some(value) = value {
            if field != value {
                *field = value.clone();
                changed.push(name.to_string());
            }
        }
    }

    let mut changed = vec![];
    set(&mut record.prize, &changes.prize, "prize", &mut changed);
    if let Some(count) = changes
        .winners_count
        .and_then(|count| parse_winners_count(count).ok())
    {
        set(&mut record.winners_count, &Some(count), "winners_count", &mut changed);
    }
    if let Some(extend_by) = changes.extend_by_ms {
        record.end_time = record.end_time.saturating_add(extend_by);
        record.duration_ms = record.duration_ms.saturating_add(extend_by);
        changed.push(format!("end_time (extended by {extend_by}ms)"));
    }

    let rules = &mut record.rules;
    set(&mut rules.required_role, &changes.required_role, "required_role", &mut changed);
    set(
        &mut rules.required_roles_all,
        &changes.required_roles_all,
        "required_roles_all",
        &mut changed,
    );
    set(
        &mut rules.blacklisted_roles,
        &changes.blacklisted_roles,
        "blacklisted_roles",
        &mut changed,
    );
    set(
        &mut rules.min_server_duration_ms,
        &changes.min_server_duration_ms,
        "min_server_duration",
        &mut changed,
    );
    set(
        &mut rules.min_account_duration_ms,
        &changes.min_account_duration_ms,
        "min_account_duration",
        &mut changed,
    );

    set(&mut record.image_url, &changes.image_url, "image_url", &mut changed);
    set(&mut record.embed_color, &changes.embed_color, "embed_color", &mut changed);

    changed
}

#[cfg(test)]
pub(super) mod tests {
    use std::{sync::atomic::Ordering, time::Duration};

    use serenity::all::{ChannelId, RoleId};

    use super::*;
    use crate::{
        common::clock::ManualClock,
        giveaway::announcer::fake::{bot, entrant, FakeAnnouncer, FakeMembers},
        models::giveaway::EligibilityRules,
        store::log_channels::LogChannelStore,
    };

    pub const NOW: i64 = 1_700_000_000_000;
    pub const GUILD_ID: u64 = 1;
    pub const HOUR: i64 = 3_600_000;
    pub const HOST_ID: u64 = 3;
    pub const LOG_CHANNEL_ID: u64 = 900;

    pub struct Harness {
        pub manager: GiveawayManager,
        pub announcer: Arc<FakeAnnouncer>,
        pub clock: Arc<ManualClock>,
        pub store: Arc<GiveawayStore>,
        pub log_channels: Arc<LogChannelStore>,
    }

    impl Harness {
        pub fn new(members: FakeMembers) -> Self {
            Self::with_store(Arc::new(GiveawayStore::in_memory()), members)
        }

        /// A second manager over an existing store, like after a restart.
        pub fn with_store(store: Arc<GiveawayStore>, members: FakeMembers) -> Self {
            let announcer = Arc::new(FakeAnnouncer::new());
            let clock = Arc::new(ManualClock::new(NOW));
            let templates = Arc::new(MessageTemplates::in_memory());
            let log_channels = Arc::new(LogChannelStore::in_memory());
            let events = Arc::new(EventLog::new(
                log_channels.clone(),
                templates.clone(),
                announcer.clone(),
            ));
            let manager = GiveawayManager::new(
                store.clone(),
                announcer.clone(),
                Arc::new(members),
                templates,
                events,
                clock.clone(),
            );
            Harness {
                manager,
                announcer,
                clock,
                store,
                log_channels,
            }
        }

        /// Sends this guild's event log to [`LOG_CHANNEL_ID`].
        pub fn with_log_channel(self) -> Self {
            self.log_channels
                .set(GuildId::new(GUILD_ID), ChannelId::new(LOG_CHANNEL_ID));
            self
        }

        pub fn log_lines(&self) -> Vec<String> {
            self.announcer
                .sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(channel_id, _)| *channel_id == ChannelId::new(LOG_CHANNEL_ID))
                .filter_map(|(_, message)| message.content.clone())
                .collect()
        }
    }

    pub fn params(winners_count: i64, duration_ms: i64) -> GiveawayParams {
        GiveawayParams {
            guild_id: GuildId::new(GUILD_ID),
            channel_id: ChannelId::new(2),
            host_id: UserId::new(HOST_ID),
            prize: "Nitro".to_string(),
            winners_count,
            duration_ms,
            rules: EligibilityRules::default(),
            image_url: None,
            embed_color: None,
        }
    }

    fn everyone(users: &[u64]) -> FakeMembers {
        users
            .iter()
            .fold(FakeMembers::default(), |members, user| {
                members.member(*user, &[], Some(0), 0)
            })
    }

    #[tokio::test]
    async fn test_start_posts_and_arms_end_timer() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();

        let entry_id = record.entry_id().unwrap();
        assert_eq!(entry_id, MessageId::new(1000));
        assert!(record.id.starts_with("giveaway_"));
        assert_eq!(record.end_time, NOW + HOUR);
        assert_eq!(record.embed_color, DEFAULT_GIVEAWAY_COLOR);
        assert_eq!(harness.store.find_by_entry_id(entry_id), Some(record));
        assert!(harness.manager.timers().is_armed(&TimerKey::Entry(entry_id)));
    }

    #[tokio::test]
    async fn test_start_validates_before_posting() {
        let harness = Harness::new(FakeMembers::default());

        let err = harness.manager.start(params(0, HOUR)).await.unwrap_err();
        assert!(matches!(
            err,
            GiveawayError::Validation(ValidationError::InvalidWinnersCount)
        ));
        let err = harness.manager.start(params(1, 0)).await.unwrap_err();
        assert!(matches!(
            err,
            GiveawayError::Validation(ValidationError::InvalidDuration)
        ));
        assert!(harness.announcer.entry_messages.lock().unwrap().is_empty());
        assert_eq!(harness.store.len(), 0);
    }

    #[tokio::test]
    async fn test_start_failure_stores_nothing() {
        let harness = Harness::new(FakeMembers::default());
        harness.announcer.fail_sends.store(true, Ordering::SeqCst);

        let err = harness.manager.start(params(1, HOUR)).await.unwrap_err();
        assert!(matches!(err, GiveawayError::Platform(_)));
        assert_eq!(harness.store.len(), 0);
        assert_eq!(harness.manager.timers().len(), 0);
    }

    #[tokio::test]
    async fn test_schedule_then_timer_starts_it() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness.manager.schedule(params(2, HOUR), 20).await.unwrap();

        assert!(record.id.starts_with("scheduled_"));
        assert!(record.is_scheduled());
        assert_eq!(record.start_time, NOW + 20);
        assert!(harness
            .manager
            .timers()
            .is_armed(&TimerKey::Schedule(record.id.clone())));

        tokio::time::sleep(Duration::from_millis(150)).await;

        let started = harness.store.get(&record.id).unwrap();
        let entry_id = started.entry_id().unwrap();
        assert!(started.is_active());
        assert_eq!(harness.announcer.entry_messages.lock().unwrap().len(), 1);
        assert!(!harness
            .manager
            .timers()
            .is_armed(&TimerKey::Schedule(record.id.clone())));
        assert!(harness.manager.timers().is_armed(&TimerKey::Entry(entry_id)));
    }

    #[tokio::test]
    async fn test_schedule_rejects_non_positive_start() {
        let harness = Harness::new(FakeMembers::default());
        let err = harness.manager.schedule(params(1, HOUR), 0).await.unwrap_err();
        assert!(matches!(
            err,
            GiveawayError::Validation(ValidationError::InvalidStartTime)
        ));
        assert_eq!(harness.store.len(), 0);
    }

    #[tokio::test]
    async fn test_failed_scheduled_start_is_abandoned() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness
            .manager
            .schedule(params(1, HOUR), 60_000)
            .await
            .unwrap();
        harness.announcer.fail_sends.store(true, Ordering::SeqCst);

        harness.manager.initiate_scheduled_giveaway(&record.id).await;

        let abandoned = harness.store.get(&record.id).unwrap();
        assert_eq!(abandoned.phase, Phase::Ended { entry_id: None });
        assert_eq!(abandoned.prize, "[FAILED TO START] Nitro");
        assert_eq!(harness.manager.timers().len(), 0);

        // Already abandoned, so nothing is retried.
        harness.announcer.fail_sends.store(false, Ordering::SeqCst);
        harness.manager.initiate_scheduled_giveaway(&record.id).await;
        assert!(harness.announcer.entry_messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_late_start_keeps_full_duration() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness
            .manager
            .schedule(params(1, HOUR), 60_000)
            .await
            .unwrap();
        harness.clock.advance(90_000);

        harness.manager.initiate_scheduled_giveaway(&record.id).await;
        let started = harness.store.get(&record.id).unwrap();
        assert_eq!(started.start_time, NOW + 90_000);
        assert_eq!(started.end_time, NOW + 90_000 + HOUR);
    }

    #[tokio::test]
    async fn test_end_twice_announces_once() {
        let harness = Harness::new(everyone(&[1, 2, 3]));
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();
        let entry_id = record.entry_id().unwrap();
        harness
            .announcer
            .set_reactors(entry_id, vec![entrant(1), entrant(2), entrant(3)]);

        let first = harness.manager.end_giveaway(entry_id).await;
        let second = harness.manager.end_giveaway(entry_id).await;

        assert!(matches!(first, EndOutcome::Winners(ref winners) if winners.len() == 1));
        assert_eq!(second, EndOutcome::Skipped);
        assert_eq!(harness.announcer.sent.lock().unwrap().len(), 1);
        assert!(harness.store.get(&record.id).unwrap().is_ended());
        assert!(!harness.manager.timers().is_armed(&TimerKey::Entry(entry_id)));
    }

    #[tokio::test]
    async fn test_small_pool_everyone_wins() {
        let harness = Harness::new(everyone(&[1, 2, 3, 4, 5]));
        let entry_id = harness
            .manager
            .start(params(10, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        let pool: Vec<Entrant> = (1..=5).map(entrant).collect();
        harness.announcer.set_reactors(entry_id, pool.clone());

        let EndOutcome::Winners(mut winners) = harness.manager.end_giveaway(entry_id).await else {
            panic!("expected winners");
        };
        winners.sort_by_key(|winner| winner.user_id);
        assert_eq!(winners, pool);

        let edits = harness.announcer.edits.lock().unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(
            edits[0].1.embed.as_ref().unwrap().color,
            crate::models::giveaway::ENDED_GIVEAWAY_COLOR
        );
    }

    #[tokio::test]
    async fn test_no_eligible_entrants() {
        let harness = Harness::new(everyone(&[1]));
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();
        let entry_id = record.entry_id().unwrap();
        harness.announcer.set_reactors(entry_id, vec![bot(9)]);

        assert_eq!(
            harness.manager.end_giveaway(entry_id).await,
            EndOutcome::NoEntrants
        );
        assert!(harness.store.get(&record.id).unwrap().is_ended());
        assert_eq!(
            harness.announcer.sent_contents(),
            vec!["The giveaway for **Nitro** has ended, but there were no valid entrants."]
        );
    }

    #[tokio::test]
    async fn test_failed_announcement_stays_ended() {
        let harness = Harness::new(everyone(&[1]));
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();
        let entry_id = record.entry_id().unwrap();
        harness.announcer.fail_reactors.store(true, Ordering::SeqCst);

        let outcome = harness.manager.end_giveaway(entry_id).await;
        assert!(matches!(outcome, EndOutcome::Failed(_)));
        assert!(harness.store.get(&record.id).unwrap().is_ended());
        assert_eq!(harness.announcer.sent.lock().unwrap().len(), 1);
        assert_eq!(
            harness.manager.end_giveaway(entry_id).await,
            EndOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn test_request_end_reports_state() {
        let harness = Harness::new(everyone(&[1]));
        let entry_id = harness
            .manager
            .start(params(1, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        let user = UserId::new(3);

        let wrong_guild = harness
            .manager
            .request_end(GuildId::new(99), entry_id, user)
            .await;
        assert!(matches!(wrong_guild, Err(GiveawayError::NotFound(_))));

        assert_eq!(
            harness.manager.request_end(GuildId::new(GUILD_ID), entry_id, user).await.unwrap(),
            EndOutcome::NoEntrants
        );
        let again = harness.manager.request_end(GuildId::new(GUILD_ID), entry_id, user).await;
        assert!(matches!(
            again,
            Err(GiveawayError::IllegalState(IllegalState::AlreadyEnded))
        ));
    }

    #[tokio::test]
    async fn test_edit_refuses_shortening() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness.manager.start(params(1, 1000)).await.unwrap();
        let entry_id = record.entry_id().unwrap();

        let changes = GiveawayChanges {
            extend_by_ms: Some(-500),
            ..Default::default()
        };
        let err = harness
            .manager
            .edit(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), changes)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GiveawayError::Validation(ValidationError::InvalidExtension)
        ));
        assert_eq!(harness.store.get(&record.id).unwrap().end_time, NOW + 1000);
    }

    #[tokio::test]
    async fn test_edit_refuses_expired_extension() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness.manager.start(params(1, 1000)).await.unwrap();
        harness.clock.advance(5000);

        let changes = GiveawayChanges {
            extend_by_ms: Some(1000),
            ..Default::default()
        };
        let err = harness
            .manager
            .edit(GuildId::new(GUILD_ID), record.entry_id().unwrap(), UserId::new(HOST_ID), changes)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GiveawayError::Validation(ValidationError::ExtensionExpired)
        ));
    }

    #[tokio::test]
    async fn test_edit_applies_only_given_fields() {
        let harness = Harness::new(FakeMembers::default());
        let mut original = params(1, HOUR);
        original.rules.blacklisted_roles = vec![RoleId::new(7)];
        let record = harness.manager.start(original).await.unwrap();
        let entry_id = record.entry_id().unwrap();

        let changes = GiveawayChanges {
            prize: Some("Nitro Classic".to_string()),
            winners_count: Some(1),
            extend_by_ms: Some(HOUR),
            required_role: Some(Some(RoleId::new(5))),
            ..Default::default()
        };
        let outcome = harness.manager.edit(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), changes).await.unwrap();

        assert_eq!(
            outcome.changes,
            vec![
                "prize".to_string(),
                format!("end_time (extended by {HOUR}ms)"),
                "required_role".to_string(),
            ]
        );
        assert_eq!(outcome.refresh_error, None);

        let edited = harness.store.get(&record.id).unwrap();
        assert_eq!(edited.prize, "Nitro Classic");
        assert_eq!(edited.end_time, NOW + 2 * HOUR);
        assert_eq!(edited.rules.required_role, Some(RoleId::new(5)));
        assert_eq!(edited.rules.blacklisted_roles, vec![RoleId::new(7)]);
        assert_eq!(harness.announcer.edits.lock().unwrap().len(), 1);
        assert!(harness.manager.timers().is_armed(&TimerKey::Entry(entry_id)));
    }

    #[tokio::test]
    async fn test_edit_without_changes_writes_nothing() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();

        let changes = GiveawayChanges {
            prize: Some("Nitro".to_string()),
            ..Default::default()
        };
        let outcome = harness
            .manager
            .edit(GuildId::new(GUILD_ID), record.entry_id().unwrap(), UserId::new(HOST_ID), changes)
            .await
            .unwrap();
        assert!(outcome.is_unchanged());
        assert!(harness.announcer.edits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_keeps_change_when_refresh_fails() {
        let harness = Harness::new(FakeMembers::default());
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();
        harness.announcer.fail_edits.store(true, Ordering::SeqCst);

        let changes = GiveawayChanges {
            winners_count: Some(3),
            ..Default::default()
        };
        let outcome = harness
            .manager
            .edit(GuildId::new(GUILD_ID), record.entry_id().unwrap(), UserId::new(HOST_ID), changes)
            .await
            .unwrap();
        assert!(outcome.refresh_error.is_some());
        assert_eq!(harness.store.get(&record.id).unwrap().winners_count, 3);
    }

    #[tokio::test]
    async fn test_edit_ended_giveaway() {
        let harness = Harness::new(FakeMembers::default());
        let entry_id = harness
            .manager
            .start(params(1, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        harness.manager.end_giveaway(entry_id).await;

        let err = harness
            .manager
            .edit(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), GiveawayChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GiveawayError::IllegalState(IllegalState::AlreadyEnded)
        ));
    }

    #[tokio::test]
    async fn test_reroll_draws_without_touching_the_record() {
        let harness = Harness::new(everyone(&[1, 2, 3, 4]));
        let record = harness.manager.start(params(1, HOUR)).await.unwrap();
        let entry_id = record.entry_id().unwrap();
        harness
            .announcer
            .set_reactors(entry_id, (1..=4).map(entrant).collect());

        let not_ended = harness.manager.reroll(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), None).await;
        assert!(matches!(
            not_ended,
            Err(GiveawayError::IllegalState(IllegalState::NotEnded))
        ));

        harness.manager.end_giveaway(entry_id).await;
        let ended = harness.store.get(&record.id).unwrap();

        let winners = harness.manager.reroll(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), Some(3)).await.unwrap();
        assert_eq!(winners.len(), 3);
        assert_eq!(harness.store.get(&record.id).unwrap(), ended);

        let invalid = harness.manager.reroll(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), Some(0)).await;
        assert!(matches!(
            invalid,
            Err(GiveawayError::Validation(ValidationError::InvalidWinnersCount))
        ));
    }

    #[tokio::test]
    async fn test_reroll_empty_pool_is_reported() {
        let harness = Harness::new(FakeMembers::default());
        let entry_id = harness
            .manager
            .start(params(1, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        harness.manager.end_giveaway(entry_id).await;

        let result = harness.manager.reroll(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), None).await;
        assert!(matches!(result, Err(GiveawayError::NoEligibleEntrants)));
    }

    #[tokio::test]
    async fn test_transitions_log_attempt_and_result() {
        let harness = Harness::new(everyone(&[1, 2])).with_log_channel();
        let guild_id = GuildId::new(GUILD_ID);
        let user = UserId::new(HOST_ID);
        let entry_id = harness
            .manager
            .start(params(1, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        harness
            .announcer
            .set_reactors(entry_id, vec![entrant(1), entrant(2)]);

        let changes = GiveawayChanges {
            prize: Some("Nitro Classic".to_string()),
            ..Default::default()
        };
        harness.manager.edit(guild_id, entry_id, user, changes).await.unwrap();
        harness.manager.request_end(guild_id, entry_id, user).await.unwrap();
        harness.manager.reroll(guild_id, entry_id, user, None).await.unwrap();

        let lines = harness.log_lines();
        let position = |needle: &str| {
            lines
                .iter()
                .position(|line| line.contains(needle))
                .unwrap_or_else(|| panic!("no log line containing {needle:?} in {lines:#?}"))
        };
        assert!(lines.iter().all(|line| line.starts_with("[Giveaway Log] ")));
        assert!(position("<@3> is starting a giveaway for **Nitro** (1 winners, duration 1h)")
            < position("<@3> started a giveaway for **Nitro**"));
        assert!(position(&format!("<@3> is editing giveaway {entry_id}: prize"))
            < position(&format!("Giveaway {entry_id} was edited: prize")));
        assert!(position(&format!("<@3> asked to end giveaway {entry_id}."))
            < position("<@3> ended the giveaway for **Nitro Classic**"));
        assert!(position(&format!("<@3> is rerolling giveaway {entry_id} for 1 winners."))
            < position("<@3> rerolled the giveaway for **Nitro Classic**"));
    }

    #[tokio::test]
    async fn test_schedule_logs_attempt() {
        let harness = Harness::new(FakeMembers::default()).with_log_channel();
        harness
            .manager
            .schedule(params(1, HOUR), 0)
            .await
            .unwrap_err();

        assert_eq!(
            harness.log_lines(),
            vec![
                "[Giveaway Log] <@3> is scheduling a giveaway for **Nitro** to start in 0s and run for 1h."
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_reroll_is_logged() {
        let harness = Harness::new(FakeMembers::default()).with_log_channel();
        let entry_id = harness
            .manager
            .start(params(1, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();

        let result = harness
            .manager
            .reroll(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID), Some(2))
            .await;
        assert!(result.is_err());

        let lines = harness.log_lines();
        assert!(lines
            .iter()
            .any(|line| line.contains(&format!("is rerolling giveaway {entry_id} for 2 winners"))));
        assert!(lines
            .iter()
            .any(|line| line.contains(&format!("<@3> could not reroll giveaway {entry_id}: "))));
    }

    #[tokio::test]
    async fn test_missing_required_role_is_logged() {
        let harness = Harness::new(everyone(&[1])).with_log_channel();
        let mut with_role = params(1, HOUR);
        with_role.rules.required_role = Some(RoleId::new(404));
        let entry_id = harness
            .manager
            .start(with_role)
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        harness.announcer.set_reactors(entry_id, vec![entrant(1)]);

        let outcome = harness.manager.end_giveaway(entry_id).await;
        assert!(matches!(outcome, EndOutcome::Winners(ref winners) if winners.len() == 1));
        assert!(harness.log_lines().iter().any(|line| line.contains(&format!(
            "Required role 404 of giveaway {entry_id} no longer exists. The role check was skipped while ending it."
        ))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_end_triggers_announce_once() {
        let harness = Harness::new(everyone(&[1, 2, 3]));
        let entry_id = harness
            .manager
            .start(params(1, HOUR))
            .await
            .unwrap()
            .entry_id()
            .unwrap();
        harness
            .announcer
            .set_reactors(entry_id, vec![entrant(1), entrant(2), entrant(3)]);

        let end = |manager: GiveawayManager| {
            tokio::spawn(async move { manager.end_giveaway(entry_id).await })
        };
        let manual = {
            let manager = harness.manager.clone();
            tokio::spawn(async move {
                manager
                    .request_end(GuildId::new(GUILD_ID), entry_id, UserId::new(HOST_ID))
                    .await
            })
        };
        let (first, second, third, manual) = tokio::join!(
            end(harness.manager.clone()),
            end(harness.manager.clone()),
            end(harness.manager.clone()),
            manual,
        );

        let timer_ends = [first.unwrap(), second.unwrap(), third.unwrap()]
            .into_iter()
            .filter(|outcome| *outcome != EndOutcome::Skipped)
            .count();
        let manual_ends = match manual.unwrap() {
            Ok(outcome) => {
                assert_ne!(outcome, EndOutcome::Skipped);
                1
            }
            Err(GiveawayError::IllegalState(IllegalState::AlreadyEnded)) => 0,
            Err(err) => panic!("unexpected error {err:?}"),
        };

        assert_eq!(timer_ends + manual_ends, 1);
        assert_eq!(harness.announcer.sent.lock().unwrap().len(), 1);
        assert_eq!(harness.announcer.edits.lock().unwrap().len(), 1);
        assert!(harness.store.find_by_entry_id(entry_id).unwrap().is_ended());
    }
}
