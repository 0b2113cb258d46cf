//! The progress reporter — drain, classify, emit, adapt cadence.
//!
//! Each iteration:
//! 1. Sleep for the current tier's delay.
//! 2. Drain every pending event from the subscription (non-blocking),
//!    folding the burst into one `IntervalStats` from the identity.
//! 3. Classify the window (`SyncState::evaluate`).
//! 4. Emit a `SyncLogRecord`: stalled windows at warning severity,
//!    synced/syncing windows at informational severity.
//! 5. Pick the next tier: syncing → short, synced or stalled → long.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use chainpulse_core::state::SyncState;
use chainpulse_core::stats::IntervalStats;

use crate::config::{DelayTier, ReporterConfig};
use crate::error::ReporterError;
use crate::sink::{ProgressSink, SyncLogRecord};
use crate::source::{EventSource, EventSubscription};

/// Periodic sync-progress reporter.
///
/// An explicit state machine over `{tier, subscription}`, advanced one
/// window at a time by [`step`]; [`run`] is the host scheduling loop.
/// Starts at the short tier.
///
/// [`step`]: ProgressReporter::step
/// [`run`]: ProgressReporter::run
pub struct ProgressReporter {
    config: ReporterConfig,
    subscription: EventSubscription,
    sink: Arc<dyn ProgressSink>,
    tier: DelayTier,
}

impl ProgressReporter {
    /// Create a reporter holding its own subscription on `source`.
    pub fn new(config: ReporterConfig, source: &EventSource, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            config,
            subscription: source.subscribe(),
            sink,
            tier: DelayTier::Short,
        }
    }

    /// The current polling tier.
    pub fn tier(&self) -> DelayTier {
        self.tier
    }

    /// The delay preceding the next step.
    pub fn current_delay(&self) -> Duration {
        self.tier.duration(&self.config)
    }

    /// Run one reporting iteration, minus the preceding delay.
    ///
    /// Drains the window, classifies it, emits the report, and picks the
    /// next tier. Returns the emitted record.
    pub async fn step(&mut self) -> Result<SyncLogRecord, ReporterError> {
        let window = self.current_delay();
        let stats = self.drain();
        let state = SyncState::evaluate(&stats);
        let record = SyncLogRecord::new(state, stats, window);

        match record.state {
            SyncState::NotSyncing => self.sink.warn(&record).await?,
            SyncState::Synced | SyncState::Syncing(_) => self.sink.info(&record).await?,
        }

        self.tier = DelayTier::for_state(&record.state);
        Ok(record)
    }

    /// Run until the event source shuts down or the sink fails.
    ///
    /// The normal way out is host cancellation of the task; a closed
    /// source (every publisher dropped, backlog drained) also ends the
    /// loop, with one final report covering the remaining backlog.
    pub async fn run(mut self) -> Result<(), ReporterError> {
        loop {
            tokio::time::sleep(self.current_delay()).await;
            self.step().await?;
            if self.subscription.is_closed() {
                tracing::info!("event source closed; progress reporter stopping");
                return Ok(());
            }
        }
    }

    /// Spawn [`run`] on the current Tokio runtime.
    ///
    /// [`run`]: ProgressReporter::run
    pub fn spawn(self) -> JoinHandle<Result<(), ReporterError>> {
        tokio::spawn(self.run())
    }

    /// Fold every pending event into a single window record.
    fn drain(&mut self) -> IntervalStats {
        let mut stats = IntervalStats::default();
        while let Some(event) = self.subscription.try_next() {
            stats = stats.combine(IntervalStats::from_event(&event));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainpulse_core::event::SyncEvent;
    use chainpulse_core::point::Point;

    use crate::sink::{MemorySink, Severity};

    fn applied(chain_slot: u64, node_slot: u64) -> SyncEvent {
        SyncEvent::Applied {
            chain_index_tip: Point::at(chain_slot, format!("0xc{chain_slot}")),
            node_tip: Point::at(node_slot, format!("0xn{node_slot}")),
        }
    }

    fn rolled_back(chain_slot: u64, node_slot: u64) -> SyncEvent {
        SyncEvent::RolledBack {
            chain_index_tip: Point::at(chain_slot, format!("0xc{chain_slot}")),
            node_tip: Point::at(node_slot, format!("0xn{node_slot}")),
        }
    }

    fn reporter(source: &EventSource) -> (ProgressReporter, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let reporter = ProgressReporter::new(ReporterConfig::default(), source, sink.clone());
        (reporter, sink)
    }

    #[tokio::test]
    async fn step_folds_the_whole_window() {
        let source = EventSource::default();
        let (mut reporter, _sink) = reporter(&source);

        source.publish(applied(498, 700));
        source.publish(applied(499, 700));
        source.publish(rolled_back(450, 701));
        source.publish(applied(451, 701));

        let record = reporter.step().await.unwrap();
        assert_eq!(record.stats.blocks_applied, 3);
        assert_eq!(record.stats.rollbacks_applied, 1);
        assert_eq!(record.stats.chain_index_point, Point::at(451, "0xc451"));
        assert_eq!(record.stats.node_point, Point::at(701, "0xn701"));
        assert!(matches!(record.state, SyncState::Syncing(_)));
    }

    #[tokio::test]
    async fn empty_window_reports_not_syncing_at_warning() {
        let source = EventSource::default();
        let (mut reporter, sink) = reporter(&source);

        let record = reporter.step().await.unwrap();
        assert!(record.stats.is_empty());
        assert_eq!(record.state, SyncState::NotSyncing);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Severity::Warn);
    }

    #[tokio::test]
    async fn drain_exhaustion_leaves_next_window_empty() {
        let source = EventSource::default();
        let (mut reporter, _sink) = reporter(&source);

        source.publish(applied(500, 550));
        let first = reporter.step().await.unwrap();
        assert_eq!(first.stats.blocks_applied, 1);

        // Nothing published since: the next window is the identity.
        let second = reporter.step().await.unwrap();
        assert!(second.stats.is_empty());
    }

    #[tokio::test]
    async fn tier_transitions_follow_state() {
        let source = EventSource::default();
        let (mut reporter, _sink) = reporter(&source);
        assert_eq!(reporter.tier(), DelayTier::Short);

        // Synced window: short → long.
        source.publish(applied(500, 550));
        reporter.step().await.unwrap();
        assert_eq!(reporter.tier(), DelayTier::Long);
        assert_eq!(reporter.current_delay(), Duration::from_secs(300));

        // Syncing window: long → short.
        source.publish(applied(500, 700));
        reporter.step().await.unwrap();
        assert_eq!(reporter.tier(), DelayTier::Short);
        assert_eq!(reporter.current_delay(), Duration::from_secs(30));

        // Stalled window (no events): short → long.
        reporter.step().await.unwrap();
        assert_eq!(reporter.tier(), DelayTier::Long);
    }

    #[tokio::test]
    async fn severity_routing() {
        let source = EventSource::default();
        let (mut reporter, sink) = reporter(&source);

        source.publish(applied(500, 550));
        reporter.step().await.unwrap(); // synced → info

        source.publish(applied(500, 700));
        reporter.step().await.unwrap(); // syncing → info

        reporter.step().await.unwrap(); // stalled → warn

        let severities: Vec<Severity> = sink.records().iter().map(|(s, _)| *s).collect();
        assert_eq!(severities, vec![Severity::Info, Severity::Info, Severity::Warn]);
    }

    #[tokio::test]
    async fn window_duration_matches_the_preceding_tier() {
        let source = EventSource::default();
        let (mut reporter, _sink) = reporter(&source);

        // First window runs at the short tier.
        source.publish(applied(500, 550));
        let record = reporter.step().await.unwrap();
        assert_eq!(record.window_secs, 30);

        // The synced window switched to the long tier.
        let record = reporter.step().await.unwrap();
        assert_eq!(record.window_secs, 300);
    }

    #[tokio::test]
    async fn run_stops_after_source_closes() {
        let source = EventSource::default();
        let sink = Arc::new(MemorySink::new());
        let config = ReporterConfig {
            short_delay_secs: 0,
            long_delay_secs: 0,
        };
        let reporter = ProgressReporter::new(config, &source, sink.clone());

        source.publish(applied(500, 550));
        drop(source);

        reporter.run().await.unwrap();

        // The backlog was drained into one final report before stopping.
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.stats.blocks_applied, 1);
    }

    #[tokio::test]
    async fn independent_reporters_see_the_same_events() {
        let source = EventSource::default();
        let (mut a, _) = reporter(&source);
        let (mut b, _) = reporter(&source);

        source.publish(applied(500, 700));
        source.publish(applied(501, 700));

        let ra = a.step().await.unwrap();
        let rb = b.step().await.unwrap();
        assert_eq!(ra.stats.blocks_applied, 2);
        assert_eq!(rb.stats.blocks_applied, 2);
    }
}
