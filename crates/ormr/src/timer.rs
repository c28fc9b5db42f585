//! # Timers — Resumable, Independently-Clocked Actions
//!
//! A [`Timer`] is an explicit little state machine: arbitrary state `S`, an
//! elapsed-time accumulator, a period, and a step function that fires when
//! the accumulator reaches the period. The step mutates the state and
//! answers [`Step::Continue`] (re-arm) or [`Step::Done`] (terminal). No
//! captured continuations; the whole thing is inspectable data plus one
//! boxed closure.
//!
//! The [`TimerScheduler`] owns every live timer and advances all of them
//! once per fixed tick, dropping the ones that finish.
//!
//! ## Fire policies
//!
//! How a timer treats a tick that overshoots its period is explicit
//! per-timer, because both behaviors are real:
//!
//! - [`FirePolicy::PerTick`]: at most one fire per tick. The step receives
//!   the whole accumulated elapsed time and the accumulator resets to zero.
//!   Suited to "at least every N seconds" work where doubling up is wasteful.
//! - [`FirePolicy::CatchUp`]: one fire per whole period contained in the
//!   accumulator, each step receiving exactly the period; the remainder is
//!   carried forward. Suited to simulation-rate work that must not lag.
//!
//! ## Slicing work across ticks
//!
//! Because the step owns `&mut S`, a timer can carry a cursor over a large
//! dataset and process a bounded slice per fire, spreading O(N) work over
//! many ticks instead of stalling one frame. The scheduler makes no
//! distinction; it's just state the step advances.

/// What a step function tells the scheduler after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Re-arm and keep ticking.
    Continue,
    /// The timer is finished; remove it.
    Done,
}

/// How often a timer is allowed to fire in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Fire once, then finish regardless of what the step answers.
    Once,
    /// Fire until the step answers [`Step::Done`].
    Every,
    /// Fire at most `n` times.
    Times(u32),
}

/// How a timer treats a tick larger than its period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePolicy {
    /// At most one fire per tick; the step receives the accumulated elapsed
    /// time and the accumulator resets.
    PerTick,
    /// One fire per whole period in the accumulator; each step receives the
    /// period and the remainder carries forward.
    CatchUp,
}

/// Whether a timer is still pending after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Pending,
    Finished,
}

/// Object-safe hook the scheduler drives; implemented by [`Timer<S>`] for
/// every state type.
trait Tick: Send {
    fn tick(&mut self, dt: f32) -> TimerState;
}

/// A resumable timed action carrying state `S`.
pub struct Timer<S> {
    state: S,
    elapsed: f32,
    period: f32,
    repeat: Repeat,
    policy: FirePolicy,
    fired: u32,
    step: Box<dyn FnMut(&mut S, f32) -> Step + Send>,
}

impl<S: Send + 'static> Timer<S> {
    /// A repeating timer with the [`FirePolicy::PerTick`] policy.
    ///
    /// # Panics
    ///
    /// Panics if `period` is not positive (a zero period would fire forever
    /// within one tick under catch-up).
    pub fn new(
        period: f32,
        state: S,
        step: impl FnMut(&mut S, f32) -> Step + Send + 'static,
    ) -> Self {
        assert!(period > 0.0, "timer period must be positive");
        Self {
            state,
            elapsed: 0.0,
            period,
            repeat: Repeat::Every,
            policy: FirePolicy::PerTick,
            fired: 0,
            step: Box::new(step),
        }
    }

    /// Finish after the first fire.
    pub fn once(mut self) -> Self {
        self.repeat = Repeat::Once;
        self
    }

    /// Finish after at most `n` fires.
    pub fn times(mut self, n: u32) -> Self {
        self.repeat = Repeat::Times(n);
        self
    }

    /// Switch to the [`FirePolicy::CatchUp`] policy.
    pub fn catch_up(mut self) -> Self {
        self.policy = FirePolicy::CatchUp;
        self
    }

    fn fire(&mut self, dt: f32) -> TimerState {
        self.fired += 1;
        let answer = (self.step)(&mut self.state, dt);
        let done = match (answer, self.repeat) {
            (Step::Done, _) => true,
            (Step::Continue, Repeat::Once) => true,
            (Step::Continue, Repeat::Times(n)) => self.fired >= n,
            (Step::Continue, Repeat::Every) => false,
        };
        if done {
            TimerState::Finished
        } else {
            TimerState::Pending
        }
    }
}

impl<S: Send + 'static> Tick for Timer<S> {
    fn tick(&mut self, dt: f32) -> TimerState {
        self.elapsed += dt;
        match self.policy {
            FirePolicy::PerTick => {
                if self.elapsed < self.period {
                    return TimerState::Pending;
                }
                let consumed = self.elapsed;
                self.elapsed = 0.0;
                self.fire(consumed)
            }
            FirePolicy::CatchUp => {
                let mut state = TimerState::Pending;
                while self.elapsed >= self.period && state == TimerState::Pending {
                    self.elapsed -= self.period;
                    state = self.fire(self.period);
                }
                state
            }
        }
    }
}

/// The global ordered collection of live timers, advanced once per fixed
/// tick.
#[derive(Default)]
pub struct TimerScheduler {
    timers: Vec<Box<dyn Tick>>,
}

impl TimerScheduler {
    pub fn new() -> Self {
        Self { timers: Vec::new() }
    }

    /// Append a timer. Timers tick in insertion order.
    pub fn add<S: Send + 'static>(&mut self, timer: Timer<S>) {
        self.timers.push(Box::new(timer));
    }

    /// Advance every timer by `dt`, removing the ones that finish. Removal
    /// never skips or double-processes a neighbor (`retain_mut` compacts in
    /// place, preserving order).
    pub fn tick(&mut self, dt: f32) {
        self.timers
            .retain_mut(|timer| timer.tick(dt) == TimerState::Pending);
    }

    /// Number of live timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_timer(period: f32, fires: Arc<AtomicU32>) -> Timer<()> {
        Timer::new(period, (), move |_, _| {
            fires.fetch_add(1, Ordering::SeqCst);
            Step::Continue
        })
    }

    #[test]
    fn pending_below_period() {
        let fires = Arc::new(AtomicU32::new(0));
        let mut sched = TimerScheduler::new();
        sched.add(counting_timer(0.1, fires.clone()));

        sched.tick(0.05);
        assert_eq!(fires.load(Ordering::SeqCst), 0);
        sched.tick(0.06);
        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn per_tick_fires_once_on_large_delta() {
        let fires = Arc::new(AtomicU32::new(0));
        let mut sched = TimerScheduler::new();
        sched.add(counting_timer(0.1, fires.clone()));

        sched.tick(0.35);
        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn catch_up_fires_per_contained_period() {
        let fires = Arc::new(AtomicU32::new(0));
        let mut sched = TimerScheduler::new();
        sched.add(counting_timer(0.1, fires.clone()).catch_up());

        sched.tick(0.35);
        assert_eq!(fires.load(Ordering::SeqCst), 3);

        // 0.05 remainder carried forward: the next 0.05 completes a period.
        sched.tick(0.05);
        assert_eq!(fires.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn per_tick_passes_accumulated_elapsed() {
        let mut sched = TimerScheduler::new();
        sched.add(Timer::new(0.1, Vec::new(), |seen: &mut Vec<f32>, dt| {
            seen.push(dt);
            assert!((dt - 0.35).abs() < 1e-6);
            Step::Continue
        }));
        sched.tick(0.35);
    }

    #[test]
    fn catch_up_passes_exact_period() {
        let mut sched = TimerScheduler::new();
        sched.add(
            Timer::new(0.1, (), |_, dt| {
                assert!((dt - 0.1).abs() < 1e-6);
                Step::Continue
            })
            .catch_up(),
        );
        sched.tick(0.35);
    }

    #[test]
    fn once_removes_after_first_fire() {
        let fires = Arc::new(AtomicU32::new(0));
        let mut sched = TimerScheduler::new();
        sched.add(counting_timer(0.1, fires.clone()).once());

        sched.tick(0.1);
        assert_eq!(fires.load(Ordering::SeqCst), 1);
        assert!(sched.is_empty());

        sched.tick(1.0);
        assert_eq!(fires.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn times_bounds_fire_count() {
        let fires = Arc::new(AtomicU32::new(0));
        let mut sched = TimerScheduler::new();
        sched.add(counting_timer(0.1, fires.clone()).times(3).catch_up());

        sched.tick(1.0);
        assert_eq!(fires.load(Ordering::SeqCst), 3);
        assert!(sched.is_empty());
    }

    #[test]
    fn step_done_removes_timer() {
        let mut sched = TimerScheduler::new();
        sched.add(Timer::new(0.1, 0u32, |count, _| {
            *count += 1;
            if *count >= 2 { Step::Done } else { Step::Continue }
        }));

        sched.tick(0.1);
        assert_eq!(sched.len(), 1);
        sched.tick(0.1);
        assert!(sched.is_empty());
    }

    #[test]
    fn removal_does_not_skip_neighbors() {
        // Three timers; the middle one finishes on the first fire. The outer
        // two must keep firing every tick afterwards.
        let a = Arc::new(AtomicU32::new(0));
        let b = Arc::new(AtomicU32::new(0));
        let mut sched = TimerScheduler::new();
        sched.add(counting_timer(0.1, a.clone()));
        sched.add(counting_timer(0.1, Arc::new(AtomicU32::new(0))).once());
        sched.add(counting_timer(0.1, b.clone()));

        sched.tick(0.1);
        sched.tick(0.1);
        assert_eq!(a.load(Ordering::SeqCst), 2);
        assert_eq!(b.load(Ordering::SeqCst), 2);
        assert_eq!(sched.len(), 2);
    }

    #[test]
    fn sliced_work_completes_across_ticks() {
        // A cursor walks a buffer 16 entries per fire; the timer finishes
        // exactly when the buffer is consumed.
        struct Slicer {
            data: Vec<u32>,
            cursor: usize,
        }
        let timer = Timer::new(
            0.05,
            Slicer { data: vec![1; 100], cursor: 0 },
            |s: &mut Slicer, _| {
                let end = (s.cursor + 16).min(s.data.len());
                for v in &mut s.data[s.cursor..end] {
                    *v += 1;
                }
                s.cursor = end;
                if s.cursor == s.data.len() { Step::Done } else { Step::Continue }
            },
        );
        let mut sched = TimerScheduler::new();
        sched.add(timer);

        // 100 entries / 16 per fire = 7 fires to drain.
        for _ in 0..6 {
            sched.tick(0.05);
            assert_eq!(sched.len(), 1);
        }
        sched.tick(0.05);
        assert!(sched.is_empty());
    }

    #[test]
    #[should_panic(expected = "period must be positive")]
    fn zero_period_panics() {
        let _ = Timer::new(0.0, (), |_, _| Step::Continue);
    }
}
