//! Clock module - periodic timers driving automatic descent
//!
//! The engine never reads wall-clock time. A host schedules timers through a
//! [`Clock`] and reports each firing back to the session with the handle it
//! got; handles that are no longer current are ignored there.

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait Clock {
    /// Schedule a callback every `interval_ms` milliseconds.
    fn schedule_periodic(&mut self, interval_ms: u32) -> TimerHandle;

    /// Stop a timer. Unknown or already-cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    handle: TimerHandle,
    interval_ms: u64,
    next_fire_ms: u64,
}

/// Deterministic clock advanced explicitly by the host.
///
/// ```
/// use tetris3d_core::clock::{Clock, ManualClock};
///
/// let mut clock = ManualClock::new();
/// let h = clock.schedule_periodic(100);
/// assert!(clock.advance(99).is_empty());
/// assert_eq!(clock.advance(1), vec![h]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live timers.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Move time forward and return every firing in chronological order.
    ///
    /// A periodic timer that is due several times within `elapsed_ms` appears
    /// once per firing.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerHandle> {
        self.now_ms += elapsed_ms;
        let mut fired = Vec::new();
        for t in &mut self.timers {
            while t.next_fire_ms <= self.now_ms {
                fired.push((t.next_fire_ms, t.handle));
                t.next_fire_ms += t.interval_ms;
            }
        }
        fired.sort();
        fired.into_iter().map(|(_, h)| h).collect()
    }
}

impl Clock for ManualClock {
    fn schedule_periodic(&mut self, interval_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let interval_ms = u64::from(interval_ms.max(1));
        self.timers.push(Timer {
            handle,
            interval_ms,
            next_fire_ms: self.now_ms + interval_ms,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}
