use tracing::{debug, info};

use crate::models::giveaway::Phase;

use super::lifecycle::{EndOutcome, GiveawayManager};

/// What the restart scan did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    pub armed: usize,
    pub started: usize,
    pub ended: usize,
}

impl GiveawayManager {
    /// Rebuilds the timers for every giveaway that has not ended. Deadlines
    /// that passed while the bot was offline are handled right away.
    pub async fn restore_timers(&self) -> RecoveryReport {
        let mut report = RecoveryReport::default();
        let pending: Vec<_> = self
            .store()
            .all()
            .into_iter()
            .filter(|giveaway| !giveaway.is_ended())
            .collect();
        info!("Restoring timers for {} giveaways", pending.len());

        for record in pending {
            let now = self.now_ms();
            match record.phase {
                Phase::Scheduled => {
                    let delay = record.start_time - now;
                    if delay > 0 {
                        self.arm_start_timer(&record.id, delay);
                        report.armed += 1;
                        continue;
                    }
                    // Something else may have started it since the scan.
                    if self.store().find_by_schedule_id(&record.id).is_none() {
                        debug!("Scheduled giveaway {} already started", record.id);
                        continue;
                    }
                    info!(
                        "Scheduled giveaway {} missed its start by {}ms, starting it now",
                        record.id, -delay
                    );
                    self.initiate_scheduled_giveaway(&record.id).await;
                    report.started += 1;
                }
                Phase::Active { entry_id } => {
                    let delay = record.end_time - now;
                    if delay > 0 {
                        self.arm_end_timer(entry_id, record.end_time);
                        report.armed += 1;
                        continue;
                    }
                    info!(
                        "Giveaway {entry_id} missed its end by {}ms, ending it now",
                        -delay
                    );
                    if self.end_giveaway(entry_id).await != EndOutcome::Skipped {
                        report.ended += 1;
                    }
                }
                Phase::Ended { .. } => {}
            }
        }

        info!(
            "Restored giveaway timers: {} armed, {} started late, {} ended late",
            report.armed, report.started, report.ended
        );
        report
    }
}
