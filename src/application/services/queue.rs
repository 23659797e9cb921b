use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::application::services::{generator::MessageGenerator, settings::SettingsStore};

#[derive(Debug, Clone, Copy)]
pub struct QueuePolicy {
    /// Background refill starts once fewer than this many items remain.
    pub low_water: usize,
    pub refill_batch: usize,
    /// Batch requested when a run starts with an empty queue.
    pub seed_batch: usize,
}

impl Default for QueuePolicy {
    fn default() -> Self {
        Self {
            low_water: 5,
            refill_batch: 20,
            seed_batch: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplenishOutcome {
    Appended(usize),
    /// Another replenishment was already outstanding.
    Skipped,
    Failed,
    /// The queue was cleared while the provider call was outstanding.
    Discarded,
}

/// FIFO buffer of generated text, refilled from the generation provider.
pub struct MessageQueue {
    items: std::sync::Mutex<VecDeque<String>>,
    // held for the whole provider call; at most one refill in flight
    refill: Mutex<()>,
    // bumped by `clear`; batches requested under an older epoch are dropped
    epoch: AtomicU64,
    generator: Arc<dyn MessageGenerator>,
    settings: Arc<SettingsStore>,
    policy: QueuePolicy,
}

impl MessageQueue {
    pub fn new(
        generator: Arc<dyn MessageGenerator>,
        settings: Arc<SettingsStore>,
        policy: QueuePolicy,
    ) -> Self {
        Self {
            items: std::sync::Mutex::new(VecDeque::new()),
            refill: Mutex::new(()),
            epoch: AtomicU64::new(0),
            generator,
            settings,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    pub fn is_replenishing(&self) -> bool {
        self.refill.try_lock().is_err()
    }

    /// Pops the front item. When the remaining length drops under the
    /// low-water mark a refill is started in the background.
    pub fn take_next(self: &Arc<Self>) -> Option<String> {
        let (item, remaining) = {
            let mut items = self.lock_items();
            let item = items.pop_front();
            (item, items.len())
        };

        if item.is_some() && remaining < self.policy.low_water {
            debug!(remaining, "queue under low-water mark, refilling");
            let queue = self.clone();
            let count = self.policy.refill_batch;
            tokio::spawn(async move {
                queue.replenish(count).await;
            });
        }

        item
    }

    /// Pops the next item, waiting for a refill when the queue is empty.
    /// Returns `None` only if the refill produced nothing.
    pub async fn next_for_cycle(self: &Arc<Self>) -> Option<String> {
        if let Some(item) = self.take_next() {
            return Some(item);
        }

        let guard = self.refill.lock().await;
        // an in-flight refill may have landed while we waited
        if self.is_empty() {
            self.generate_into(self.policy.refill_batch).await;
        }
        drop(guard);

        self.take_next()
    }

    /// Requests `count` new items and appends them. A no-op while another
    /// refill is outstanding. Provider failures leave the queue unchanged.
    pub async fn replenish(&self, count: usize) -> ReplenishOutcome {
        let Ok(_guard) = self.refill.try_lock() else {
            debug!("refill already in flight, skipping");
            return ReplenishOutcome::Skipped;
        };
        self.generate_into(count).await
    }

    /// Seeds the queue when a run starts, waiting for any outstanding refill.
    pub async fn ensure_seeded(&self) -> ReplenishOutcome {
        let _guard = self.refill.lock().await;
        if !self.is_empty() {
            return ReplenishOutcome::Appended(0);
        }
        self.generate_into(self.policy.seed_batch).await
    }

    /// Empties the queue. Refills still in flight are discarded on arrival.
    pub fn clear(&self) {
        let mut items = self.lock_items();
        self.epoch.fetch_add(1, Ordering::AcqRel);
        items.clear();
    }

    async fn generate_into(&self, count: usize) -> ReplenishOutcome {
        let epoch = self.epoch.load(Ordering::Acquire);
        let theme = self.settings.theme().await;
        match self.generator.generate(theme, count).await {
            Ok(batch) => {
                let appended = batch.len();
                let mut items = self.lock_items();
                if self.epoch.load(Ordering::Acquire) != epoch {
                    debug!(dropped = appended, "queue cleared during refill, dropping batch");
                    return ReplenishOutcome::Discarded;
                }
                items.extend(batch);
                drop(items);
                info!(theme = theme.as_str(), requested = count, appended, "queue replenished");
                ReplenishOutcome::Appended(appended)
            }
            Err(err) => {
                warn!(theme = theme.as_str(), error = %err, "queue replenish failed");
                ReplenishOutcome::Failed
            }
        }
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    pub fn push_back_all<I: IntoIterator<Item = String>>(&self, items: I) {
        self.lock_items().extend(items);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{ScriptedGenerator, settings_store};

    fn queue(generator: Arc<ScriptedGenerator>, policy: QueuePolicy) -> Arc<MessageQueue> {
        Arc::new(MessageQueue::new(generator, settings_store(), policy))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn take_next_is_fifo_and_shrinks_by_one() {
        let generator = Arc::new(ScriptedGenerator::new());
        let queue = queue(
            generator,
            QueuePolicy {
                low_water: 0,
                ..QueuePolicy::default()
            },
        );
        queue.push_back_all(strings(&["a", "b"]));

        assert_eq!(queue.take_next().as_deref(), Some("a"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.take_next().as_deref(), Some("b"));
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.take_next(), None);
        assert_eq!(queue.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn low_water_triggers_a_single_refill() {
        let generator = Arc::new(ScriptedGenerator::new().with_delay(Duration::from_millis(500)));
        generator.push_batch(strings(&["g1", "g2"]));
        generator.push_batch(strings(&["unused"]));
        let queue = queue(
            generator.clone(),
            QueuePolicy {
                low_water: 3,
                refill_batch: 2,
                seed_batch: 5,
            },
        );
        queue.push_back_all(strings(&["a", "b", "c"]));

        queue.take_next();
        queue.take_next();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(generator.calls(), 1);
        assert_eq!(queue.len(), 3);
        let drained: Vec<_> = std::iter::from_fn(|| queue.lock_items().pop_front()).collect();
        assert_eq!(drained, strings(&["c", "g1", "g2"]));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_replenish_is_a_no_op() {
        let generator = Arc::new(ScriptedGenerator::new().with_delay(Duration::from_millis(100)));
        generator.push_batch(strings(&["x", "y"]));
        let queue = queue(generator.clone(), QueuePolicy::default());

        let (first, second) = tokio::join!(queue.replenish(2), queue.replenish(2));

        assert_eq!(first, ReplenishOutcome::Appended(2));
        assert_eq!(second, ReplenishOutcome::Skipped);
        assert_eq!(generator.calls(), 1);
        assert_eq!(queue.len(), 2);
    }

    #[tokio::test]
    async fn failed_refill_leaves_queue_unchanged() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_failure("quota exhausted");
        let queue = queue(generator, QueuePolicy::default());
        queue.push_back_all(strings(&["keep"]));

        assert_eq!(queue.replenish(5).await, ReplenishOutcome::Failed);
        assert_eq!(queue.len(), 1);
        assert!(!queue.is_replenishing());
    }

    #[tokio::test]
    async fn empty_queue_waits_for_refill() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_batch(strings(&["fresh", "more"]));
        let queue = queue(
            generator.clone(),
            QueuePolicy {
                low_water: 0,
                ..QueuePolicy::default()
            },
        );

        assert_eq!(queue.next_for_cycle().await.as_deref(), Some("fresh"));
        assert_eq!(queue.len(), 1);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn empty_queue_gives_up_when_provider_fails() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_failure("offline");
        let queue = queue(
            generator,
            QueuePolicy {
                low_water: 0,
                ..QueuePolicy::default()
            },
        );

        assert_eq!(queue.next_for_cycle().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn refill_outstanding_at_clear_is_dropped() {
        let generator = Arc::new(ScriptedGenerator::new().with_delay(Duration::from_millis(500)));
        generator.push_batch(strings(&["stale1", "stale2"]));
        let queue = queue(generator.clone(), QueuePolicy::default());
        queue.push_back_all(strings(&["a", "b"]));

        assert_eq!(queue.take_next().as_deref(), Some("a"));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(queue.is_replenishing());

        queue.clear();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(generator.calls(), 1);
        assert!(queue.is_empty());
        assert!(!queue.is_replenishing());
    }

    #[tokio::test]
    async fn refill_after_clear_is_kept() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_batch(strings(&["fresh"]));
        let queue = queue(generator, QueuePolicy::default());
        queue.push_back_all(strings(&["old"]));

        queue.clear();

        assert_eq!(queue.replenish(1).await, ReplenishOutcome::Appended(1));
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn seeding_only_happens_when_empty() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_batch(strings(&["s1", "s2", "s3"]));
        let queue = queue(generator.clone(), QueuePolicy::default());

        assert_eq!(queue.ensure_seeded().await, ReplenishOutcome::Appended(3));
        assert_eq!(queue.ensure_seeded().await, ReplenishOutcome::Appended(0));
        assert_eq!(generator.calls(), 1);
        assert_eq!(generator.requested_counts(), vec![25]);
    }
}
