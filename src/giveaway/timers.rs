use std::{
    collections::HashMap,
    fmt,
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use serenity::all::MessageId;
use tokio::task::AbortHandle;
use tracing::debug;

/// What a timer is waiting for: a scheduled giveaway to start, or an
/// active one to end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Schedule(String),
    Entry(MessageId),
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKey::Schedule(schedule_id) => write!(f, "schedule {schedule_id}"),
            TimerKey::Entry(entry_id) => write!(f, "giveaway {entry_id}"),
        }
    }
}

struct ArmedTimer {
    generation: u64,
    handle: AbortHandle,
}

/// Live one-shot timers, at most one per key. Nothing here is persisted;
/// timers are rebuilt from the giveaway store on start.
#[derive(Default)]
pub struct TimerRegistry {
    timers: Mutex<HashMap<TimerKey, ArmedTimer>>,
    generation: AtomicU64,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TimerKey, ArmedTimer>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `task` once after `delay`. A timer already armed for `key` is
    /// cancelled first, so a key never fires twice.
    pub fn arm<F>(self: &Arc<Self>, key: TimerKey, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let registry = Arc::clone(self);
        let task_key = key.clone();

        // Held across the spawn so a zero delay timer cannot release itself
        // before it has been registered.
        let mut timers = self.lock();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            registry.release(&task_key, generation);
            debug!("Timer for {task_key} fired");
            task.await;
        })
        .abort_handle();

        if let Some(previous) = timers.insert(key.clone(), ArmedTimer { generation, handle }) {
            previous.handle.abort();
            debug!("Replaced the existing timer for {key}");
        }
        debug!("Armed timer for {key} in {delay:?}");
    }

    /// Cancels the timer for `key`, if any.
    pub fn disarm(&self, key: &TimerKey) {
        if let Some(timer) = self.lock().remove(key) {
            timer.handle.abort();
            debug!("Disarmed timer for {key}");
        }
    }

    pub fn is_armed(&self, key: &TimerKey) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Forgets a fired timer, unless it has been replaced in the meantime.
    fn release(&self, key: &TimerKey, generation: u64) {
        let mut timers = self.lock();
        if timers
            .get(key)
            .is_some_and(|timer| timer.generation == generation)
        {
            timers.remove(key);
        }
    }
}

/// Converts a millisecond delay, clamping negatives to zero.
pub fn delay_from_millis(millis: i64) -> Duration {
    Duration::from_millis(u64::try_from(millis).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_timer_fires_once_and_releases_itself() {
        let registry = Arc::new(TimerRegistry::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let key = TimerKey::Entry(MessageId::new(1));

        registry.arm(key.clone(), Duration::from_millis(10), counter_task(&fired));
        assert!(registry.is_armed(&key));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!registry.is_armed(&key));
    }

    #[tokio::test]
    async fn test_rearming_cancels_the_previous_timer() {
        let registry = Arc::new(TimerRegistry::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let key = TimerKey::Schedule("scheduled_x".to_string());

        registry.arm(key.clone(), Duration::from_millis(20), counter_task(&fired));
        registry.arm(key.clone(), Duration::from_millis(40), counter_task(&fired));
        assert_eq!(registry.len(), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 0);
    }

    #[tokio::test]
    async fn test_disarm_prevents_firing() {
        let registry = Arc::new(TimerRegistry::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let key = TimerKey::Entry(MessageId::new(2));

        registry.arm(key.clone(), Duration::from_millis(20), counter_task(&fired));
        registry.disarm(&key);
        registry.disarm(&key);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!registry.is_armed(&key));
    }

    #[test]
    fn test_delay_from_millis_clamps() {
        assert_eq!(delay_from_millis(-5), Duration::ZERO);
        assert_eq!(delay_from_millis(1500), Duration::from_millis(1500));
    }
}
