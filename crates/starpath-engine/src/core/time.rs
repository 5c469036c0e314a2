/// Fixed timestep accumulator.
/// Ensures level logic and its timers run at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[derive(Debug, Clone)]
struct Pending<T> {
    /// Scheduling order, breaks deadline ties.
    seq: u32,
    remaining: f32,
    action: T,
}

/// Fire-and-forget delayed actions, owned by the state machine that scheduled them.
///
/// Nothing here calls back into anything: `tick` hands fired actions back to the
/// owner, so dropping the owner (level teardown) or calling `cancel_all` (retry)
/// turns every pending action into a no-op.
#[derive(Debug, Clone)]
pub struct Timers<T> {
    pending: Vec<Pending<T>>,
    next_seq: u32,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to fire after `delay` seconds.
    pub fn schedule(&mut self, delay: f32, action: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(Pending {
            seq,
            remaining: delay.max(0.0),
            action,
        });
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Advance time. Returns the actions that came due, earliest deadline first
    /// (ties in scheduling order).
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        for p in &mut self.pending {
            p.remaining -= dt;
        }
        if !self.pending.iter().any(|p| p.remaining <= 0.0) {
            return Vec::new();
        }

        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.remaining <= 0.0);
        self.pending = rest;

        due.sort_by(|a, b| {
            a.remaining
                .partial_cmp(&b.remaining)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether any pending action satisfies `pred`.
    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.pending.iter().any(|p| pred(&p.action))
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn timer_fires_once_after_delay() {
        let mut timers = Timers::new();
        timers.schedule(0.5, "win");
        assert!(timers.tick(0.25).is_empty());
        assert_eq!(timers.tick(0.25), vec!["win"]);
        assert!(timers.tick(1.0).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn earliest_deadline_fires_first() {
        let mut timers = Timers::new();
        timers.schedule(1.0, 'b');
        timers.schedule(0.2, 'a');
        timers.schedule(1.0, 'c');
        assert_eq!(timers.tick(2.0), vec!['a', 'b', 'c']);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut timers = Timers::new();
        timers.schedule(0.1, 1);
        timers.schedule(0.3, 2);
        assert_eq!(timers.len(), 2);
        timers.cancel_all();
        assert!(timers.tick(1.0).is_empty());
    }
}
