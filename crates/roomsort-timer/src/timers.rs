//! Virtual-time timer set.
//!
//! Timers live on a virtual clock that only moves when the owner calls
//! [`Timers::advance`] or [`Timers::advance_to`]. This keeps the game
//! deterministic in tests and lets a pause freeze every pending timer
//! at once.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

/// Smallest allowed repeat period. A zero period would fire forever
/// within a single advance.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer. Used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

/// A timer that came due, returned by [`Timers::pop_due`] and [`Timers::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TimerId,
    pub kind: K,
    /// Virtual time at which the timer was due.
    pub at: Duration,
}

#[derive(Debug, Clone)]
struct Entry<K> {
    id: TimerId,
    kind: K,
    due: Duration,
    period: Option<Duration>,
}

/// A set of one-shot and repeating timers on a shared virtual clock.
///
/// `K` is the caller's label for what a timer means (e.g. "countdown
/// tick" or "advance to next round").
#[derive(Debug, Clone)]
pub struct Timers<K> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<K>>,
    paused: bool,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            entries: Vec::new(),
            paused: false,
        }
    }
}

impl<K: Clone + fmt::Debug> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `kind` to fire once, `delay` from now.
    pub fn schedule_once(&mut self, kind: K, delay: Duration) -> TimerId {
        self.insert(kind, delay, None)
    }

    /// Schedules `kind` to fire every `period`, first after one period.
    pub fn schedule_every(&mut self, kind: K, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.insert(kind, period, Some(period))
    }

    fn insert(
        &mut self,
        kind: K,
        delay: Duration,
        period: Option<Duration>,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        debug!(%id, ?kind, delay_ms = delay.as_millis() as u64, repeating = period.is_some(), "timer scheduled");
        self.entries.push(Entry {
            id,
            kind,
            due: self.now + delay,
            period,
        });
        id
    }

    /// Cancels one timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            debug!(%id, "timer cancelled");
        }
        removed
    }

    /// Cancels every timer whose kind matches `pred`. Returns how many were removed.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !pred(&e.kind));
        before - self.entries.len()
    }

    /// Cancels everything. Returns how many timers were pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            debug!(count, "all timers cancelled");
        }
        count
    }

    /// Returns `true` if `id` is still pending.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Returns `true` if any pending timer matches `pred`.
    pub fn any(&self, mut pred: impl FnMut(&K) -> bool) -> bool {
        self.entries.iter().any(|e| pred(&e.kind))
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the clock. Nothing fires and time does not move until
    /// [`resume`](Self::resume). Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(now_ms = self.now.as_millis() as u64, "timers paused");
        }
    }

    /// Unfreezes the clock. Pending timers keep their remaining delay.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            debug!(now_ms = self.now.as_millis() as u64, "timers resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time until the next timer fires. `None` when nothing is pending or
    /// the clock is paused.
    pub fn until_next(&self) -> Option<Duration> {
        if self.paused {
            return None;
        }
        self.entries
            .iter()
            .map(|e| e.due.saturating_sub(self.now))
            .min()
    }

    /// Removes and returns the earliest timer due at or before `until`
    /// (absolute virtual time), moving the clock to its deadline.
    ///
    /// Ties fire in scheduling order. Repeating timers are re-armed before
    /// being returned. Call in a loop and handle each [`Fired`] before the
    /// next call: a handler that cancels timers then affects later ones.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<K>> {
        if self.paused {
            return None;
        }
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let at = self.entries[index].due;
        self.now = self.now.max(at);

        let fired = match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.due += period;
                Fired {
                    id: entry.id,
                    kind: entry.kind.clone(),
                    at,
                }
            }
            None => {
                let entry = self.entries.swap_remove(index);
                Fired {
                    id: entry.id,
                    kind: entry.kind,
                    at,
                }
            }
        };

        trace!(id = %fired.id, kind = ?fired.kind, at_ms = at.as_millis() as u64, "timer fired");
        Some(fired)
    }

    /// Moves the clock forward to `target` without firing anything.
    /// Use after draining [`pop_due`](Self::pop_due).
    pub fn advance_to(&mut self, target: Duration) {
        if !self.paused && target > self.now {
            self.now = target;
        }
    }

    /// Advances the clock by `elapsed` and returns every timer that came
    /// due, in firing order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Fired<K>> {
        let target = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some(f) = self.pop_due(target) {
            fired.push(f);
        }
        self.advance_to(target);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Tick,
        Advance,
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_timers_are_empty() {
        let t: Timers<Kind> = Timers::new();
        assert!(t.is_empty());
        assert_eq!(t.now(), Duration::ZERO);
        assert_eq!(t.until_next(), None);
    }

    #[test]
    fn test_once_fires_exactly_once() {
        let mut t = Timers::new();
        let id = t.schedule_once(Kind::Advance, ms(1500));
        assert!(t.advance(ms(1499)).is_empty());
        let fired = t.advance(ms(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert_eq!(fired[0].at, ms(1500));
        assert!(!t.is_scheduled(id));
        assert!(t.advance(ms(10_000)).is_empty());
    }

    #[test]
    fn test_every_rearms() {
        let mut t = Timers::new();
        t.schedule_every(Kind::Tick, ms(1000));
        let fired = t.advance(ms(3500));
        assert_eq!(fired.len(), 3);
        assert_eq!(fired[2].at, ms(3000));
        assert_eq!(t.until_next(), Some(ms(500)));
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut t = Timers::new();
        t.schedule_every(Kind::Tick, ms(1000));
        t.schedule_once(Kind::Advance, ms(1500));
        let kinds: Vec<_> = t.advance(ms(2000)).into_iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![Kind::Tick, Kind::Advance, Kind::Tick]);
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut t = Timers::new();
        let a = t.schedule_once(Kind::Advance, ms(100));
        let b = t.schedule_once(Kind::Tick, ms(100));
        let fired = t.advance(ms(100));
        assert_eq!(fired[0].id, a);
        assert_eq!(fired[1].id, b);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut t = Timers::new();
        let id = t.schedule_once(Kind::Advance, ms(100));
        assert!(t.cancel(id));
        assert!(!t.cancel(id));
        assert!(t.advance(ms(200)).is_empty());
    }

    #[test]
    fn test_cancel_during_drain_affects_later_timers() {
        let mut t = Timers::new();
        t.schedule_once(Kind::Tick, ms(100));
        t.schedule_once(Kind::Advance, ms(200));
        let target = ms(300);
        let first = t.pop_due(target).unwrap();
        assert_eq!(first.kind, Kind::Tick);
        t.cancel_all();
        assert!(t.pop_due(target).is_none());
    }

    #[test]
    fn test_cancel_where_filters_by_kind() {
        let mut t = Timers::new();
        t.schedule_every(Kind::Tick, ms(1000));
        t.schedule_once(Kind::Advance, ms(10));
        assert_eq!(t.cancel_where(|k| *k == Kind::Advance), 1);
        assert!(t.any(|k| *k == Kind::Tick));
        assert!(!t.any(|k| *k == Kind::Advance));
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut t = Timers::new();
        t.schedule_once(Kind::Advance, ms(1000));
        t.advance(ms(400));
        t.pause();
        assert!(t.is_paused());
        assert_eq!(t.until_next(), None);
        assert!(t.advance(ms(5000)).is_empty());
        assert_eq!(t.now(), ms(400));

        t.resume();
        assert_eq!(t.until_next(), Some(ms(600)));
        assert_eq!(t.advance(ms(600)).len(), 1);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut t = Timers::new();
        t.schedule_every(Kind::Tick, Duration::ZERO);
        assert_eq!(t.advance(ms(3)).len(), 3);
    }

    #[test]
    fn test_schedule_is_relative_to_current_time() {
        let mut t = Timers::new();
        t.advance(ms(700));
        t.schedule_once(Kind::Advance, ms(300));
        let fired = t.advance(ms(300));
        assert_eq!(fired[0].at, ms(1000));
    }
}
