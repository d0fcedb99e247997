use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;
use crate::replay::{BattleReplayEngine, TickOutcome};

/// A pending tick, bound to the replay it was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub replay_id: u64,
    pub due: Instant,
}

/// Fixed-interval tick driver owned by whatever presents the replay.
///
/// At most one tick is pending. It is re-armed only after the previous tick
/// has been applied, and a tick armed for an older replay is dropped instead
/// of being fired against the current one.
#[derive(Debug, Clone)]
pub struct ReplayScheduler {
    interval: Duration,
    pending: Option<ScheduledTick>,
}

impl ReplayScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval, pending: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules the next tick one interval from `now`. Nothing is armed for an
    /// unstarted or finished replay.
    pub fn arm(&mut self, engine: &BattleReplayEngine, now: Instant) -> bool {
        if !engine.is_started() || engine.is_complete() {
            self.pending = None;
            return false;
        }
        self.pending = Some(ScheduledTick {
            replay_id: engine.replay_id(),
            due: now + self.interval,
        });
        true
    }

    pub fn cancel(&mut self) {
        if let Some(tick) = self.pending.take() {
            debug!("Cancelled pending tick for replay #{}", tick.replay_id);
        }
    }

    /// Zero when the tick is overdue, `None` when nothing is armed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|tick| tick.due.saturating_duration_since(now))
    }

    /// Fires the pending tick if it is due and still belongs to `engine`'s
    /// current replay, then re-arms.
    pub fn poll(&mut self, engine: &mut BattleReplayEngine, now: Instant) -> Option<TickOutcome> {
        let tick = self.pending?;
        if tick.replay_id != engine.replay_id() {
            debug!(
                "Dropping stale tick for replay #{} (current #{})",
                tick.replay_id,
                engine.replay_id()
            );
            self.pending = None;
            return None;
        }
        if now < tick.due {
            return None;
        }

        self.pending = None;
        let outcome = engine.advance();
        self.arm(engine, now);
        outcome
    }
}

/// Blocking replay loop for headless use. Sleeps between ticks and hands every
/// outcome to `sink`; returns the number of ticks fired.
pub fn run_to_completion<F>(
    engine: &mut BattleReplayEngine,
    scheduler: &mut ReplayScheduler,
    mut sink: F,
) -> usize
where
    F: FnMut(&BattleReplayEngine, &TickOutcome),
{
    let mut ticks = 0;
    scheduler.arm(engine, Instant::now());
    while let Some(wait) = scheduler.time_until_due(Instant::now()) {
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        if let Some(outcome) = scheduler.poll(engine, Instant::now()) {
            ticks += 1;
            sink(engine, &outcome);
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BattleTranscript, CombatantSnapshot};

    fn engine(lines: &[&str]) -> BattleReplayEngine {
        let transcript = BattleTranscript::new(
            CombatantSnapshot::new("Eevee", 55),
            CombatantSnapshot::new("Ditto", 48),
            lines.iter().map(|s| s.to_string()).collect(),
            Some("Eevee".to_string()),
        );
        BattleReplayEngine::with_transcript(transcript).unwrap()
    }

    #[test]
    fn tick_fires_only_when_due() {
        let mut engine = engine(&["a", "b"]);
        let mut scheduler = ReplayScheduler::new(Duration::from_millis(700));
        let start = Instant::now();
        assert!(scheduler.arm(&engine, start));

        assert!(scheduler.poll(&mut engine, start + Duration::from_millis(699)).is_none());
        assert_eq!(engine.cursor().revealed_count, 0);

        let outcome = scheduler.poll(&mut engine, start + Duration::from_millis(700)).unwrap();
        assert_eq!(outcome.line, "a");
        assert_eq!(
            scheduler.time_until_due(start + Duration::from_millis(700)),
            Some(Duration::from_millis(700))
        );
    }

    #[test]
    fn late_poll_fires_a_single_tick() {
        let mut engine = engine(&["a", "b", "c"]);
        let mut scheduler = ReplayScheduler::new(Duration::from_millis(100));
        let start = Instant::now();
        scheduler.arm(&engine, start);
        let late = start + Duration::from_secs(10);
        assert!(scheduler.poll(&mut engine, late).is_some());
        assert!(scheduler.poll(&mut engine, late).is_none());
        assert_eq!(engine.cursor().revealed_count, 1);
    }

    #[test]
    fn nothing_is_armed_after_completion() {
        let mut engine = engine(&["only"]);
        let mut scheduler = ReplayScheduler::new(Duration::ZERO);
        let now = Instant::now();
        scheduler.arm(&engine, now);
        assert!(scheduler.poll(&mut engine, now).is_some());
        assert!(engine.is_complete());
        assert!(!scheduler.is_armed());
        assert!(!scheduler.arm(&engine, now));
    }

    #[test]
    fn stale_tick_never_touches_new_replay() {
        let mut engine = engine(&["Eevee hits Ditto for 10 damage", "b"]);
        let mut scheduler = ReplayScheduler::new(Duration::ZERO);
        let now = Instant::now();
        scheduler.arm(&engine, now);

        let replacement = BattleTranscript::new(
            CombatantSnapshot::new("Ditto", 48),
            CombatantSnapshot::new("Eevee", 55),
            vec!["Ditto hits Eevee for 5 damage".to_string()],
            None,
        );
        engine.start(replacement).unwrap();

        assert!(scheduler.poll(&mut engine, now).is_none());
        assert!(!scheduler.is_armed());
        assert_eq!(engine.cursor().revealed_count, 0);
    }

    #[test]
    fn cancel_clears_pending() {
        let engine = engine(&["a"]);
        let mut scheduler = ReplayScheduler::new(Duration::from_millis(5));
        scheduler.arm(&engine, Instant::now());
        scheduler.cancel();
        assert_eq!(scheduler.time_until_due(Instant::now()), None);
    }

    #[test]
    fn run_to_completion_reveals_everything_in_order() {
        let mut engine = engine(&["one", "two", "three"]);
        let mut scheduler = ReplayScheduler::new(Duration::from_millis(1));
        let mut seen = Vec::new();
        let ticks = run_to_completion(&mut engine, &mut scheduler, |engine, outcome| {
            assert_eq!(engine.revealed_lines().len(), outcome.index + 1);
            seen.push(outcome.line.clone());
        });
        assert_eq!(ticks, 3);
        assert_eq!(seen, vec!["one", "two", "three"]);
        assert_eq!(engine.winner(), Some("Eevee"));
    }
}
