//! Live pipe sequence: timed spawning, recycling, and the "next pipe" cursor
//!
//! Pipes are appended to the right of the last one and never reordered, so the
//! sequence stays sorted by `x` (leftmost first).

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pipe::{GapTier, Pipe};
use super::state::SimulationConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Seconds between spawns so consecutive pipes keep `PIPE_SPACING` between them
pub fn spawn_interval(pipe_width: f32) -> f32 {
    (pipe_width + PIPE_SPACING) / (GAME_SPEED * PIPE_PARALLAX)
}

/// Owns the live pipes and the seeded RNG that places their gaps
#[derive(Debug, Clone)]
pub struct PipeStream {
    pipes: VecDeque<Pipe>,
    /// Index of the first pipe the bird has not passed yet
    next: usize,
    /// Simulation time of the last spawn (seconds)
    last_spawn: f32,
    interval: f32,
    tier: GapTier,
    pipe_size: Vec2,
    gap_range: RangeInclusive<i32>,
    rng: Pcg32,
    /// Total pipes ever spawned by this stream
    spawned: u64,
}

impl PipeStream {
    /// Fails if the tier's gap leaves no room on screen
    pub fn new(tier: GapTier, pipe_size: Vec2, seed: u64) -> Result<Self, ConfigError> {
        let gap_range = tier.spawn_range(SCREEN_HEIGHT)?;
        Ok(Self {
            pipes: VecDeque::new(),
            next: 0,
            last_spawn: 0.0,
            interval: spawn_interval(pipe_size.x),
            tier,
            pipe_size,
            gap_range,
            rng: Pcg32::seed_from_u64(seed),
            spawned: 0,
        })
    }

    /// Empty the stream and reseed it for a fresh session
    pub fn reset(&mut self, seed: u64) {
        self.pipes.clear();
        self.next = 0;
        self.last_spawn = 0.0;
        self.rng = Pcg32::seed_from_u64(seed);
        self.spawned = 0;
    }

    pub fn tier(&self) -> GapTier {
        self.tier
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn pipes(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Pipe> {
        self.pipes.get(index)
    }

    /// The first pipe the bird has not passed yet
    pub fn next_pipe(&self) -> Option<&Pipe> {
        debug_assert!(self.next <= self.pipes.len(), "next pipe index out of range");
        self.pipes.get(self.next)
    }

    /// The pipe most recently passed, if still live
    pub fn previous_pipe(&self) -> Option<&Pipe> {
        self.next.checked_sub(1).and_then(|i| self.pipes.get(i))
    }

    /// Move the cursor past the current next pipe
    pub fn mark_passed(&mut self) {
        debug_assert!(self.next < self.pipes.len(), "passed a pipe that does not exist");
        self.next += 1;
    }

    /// Append a pipe right of the last one (or just off screen when empty)
    pub fn spawn(&mut self, now: f32) {
        let x = self
            .pipes
            .back()
            .map(|p| p.right() + PIPE_SPACING)
            .unwrap_or(FIRST_PIPE_X);
        let pipe = Pipe::in_range(
            self.tier,
            x,
            self.pipe_size,
            self.gap_range.clone(),
            &mut self.rng,
        );
        log::debug!(
            "Spawned pipe #{} at x={:.1} gap_y={}",
            self.spawned + 1,
            x,
            pipe.gap_y
        );
        self.pipes.push_back(pipe);
        self.last_spawn = now;
        self.spawned += 1;
    }

    /// Spawn once the interval has elapsed since the last scheduled spawn. Returns
    /// true on spawn.
    ///
    /// The schedule advances by exactly one interval per spawn rather than snapping to
    /// `now`, so rounding to whole ticks never accumulates into the spacing.
    pub fn maybe_spawn(&mut self, now: f32) -> bool {
        let due = self.last_spawn + self.interval;
        if now >= due {
            self.spawn(now);
            self.last_spawn = due;
            true
        } else {
            false
        }
    }

    /// Drop pipes that scrolled fully off the left edge, keeping the cursor on the
    /// same logical pipe. Returns how many were removed.
    pub fn recycle(&mut self) -> usize {
        let mut removed = 0;
        while self.pipes.front().is_some_and(Pipe::is_off_screen) {
            self.pipes.pop_front();
            self.next = self.next.saturating_sub(1);
            removed += 1;
        }
        if removed > 0 {
            log::debug!("Recycled {} pipe(s), {} live", removed, self.pipes.len());
        }
        removed
    }

    pub fn advance_all(&mut self, dt: f32, world: &SimulationConfig) {
        for pipe in &mut self.pipes {
            pipe.advance(dt, world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PIPE_SIZE: Vec2 = Vec2::new(52.0, 320.0);

    fn stream() -> PipeStream {
        PipeStream::new(GapTier::Easy, PIPE_SIZE, 42).unwrap()
    }

    #[test]
    fn test_spawn_positions() {
        let mut s = stream();
        s.spawn(0.0);
        assert_eq!(s.get(0).unwrap().x, FIRST_PIPE_X);
        s.spawn(0.0);
        assert_eq!(s.get(1).unwrap().x, FIRST_PIPE_X + 52.0 + PIPE_SPACING);
        assert_eq!(s.spawned(), 2);
    }

    #[test]
    fn test_interval_keeps_constant_spacing() {
        assert!((spawn_interval(52.0) - 1.72).abs() < 1e-5);

        let world = SimulationConfig::default();
        let mut s = stream();
        s.spawn(0.0);
        let mut now = 0.0;
        let dt = 0.01;
        while !s.maybe_spawn(now) {
            s.advance_all(dt, &world);
            now += dt;
        }
        let first = s.get(0).unwrap();
        let second = s.get(1).unwrap();
        assert!((second.x - first.right() - PIPE_SPACING).abs() < 1e-3);
        // Second pipe appears about where the first one did
        assert!((second.x - FIRST_PIPE_X).abs() < 2.0);
    }

    #[test]
    fn test_long_run_spawns_stay_off_screen() {
        let world = SimulationConfig::default();
        let mut s = stream();
        let mut now = 0.0;
        s.spawn(now);
        for _ in 0..9000 {
            now += SIM_DT;
            if s.maybe_spawn(now) {
                let x = s.pipes().last().unwrap().x;
                assert!(x >= SCREEN_WIDTH, "pipe #{} spawned on screen at {}", s.spawned(), x);
                assert!((x - FIRST_PIPE_X).abs() < 10.0, "spawn x drifted to {}", x);
            }
            s.recycle();
            s.advance_all(SIM_DT, &world);
        }
        assert!(s.spawned() > 150);
    }

    #[test]
    fn test_maybe_spawn_waits_for_interval() {
        let mut s = stream();
        s.spawn(1.0);
        assert!(!s.maybe_spawn(1.0 + s.interval() - 0.01));
        assert_eq!(s.len(), 1);
        assert!(s.maybe_spawn(1.0 + s.interval()));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = stream();
        let mut b = stream();
        for _ in 0..10 {
            a.spawn(0.0);
            b.spawn(0.0);
        }
        let ga: Vec<f32> = a.pipes().map(|p| p.gap_y).collect();
        let gb: Vec<f32> = b.pipes().map(|p| p.gap_y).collect();
        assert_eq!(ga, gb);
    }

    #[test]
    fn test_recycle_removes_one_and_keeps_order() {
        let mut s = stream();
        for _ in 0..3 {
            s.spawn(0.0);
        }
        let xs: Vec<f32> = s.pipes().map(|p| p.x).collect();
        let shift = xs[0] + PIPE_SIZE.x + OFFSCREEN_MARGIN + 1.0;

        // Scroll everything left until the first pipe is past the threshold
        let world = SimulationConfig::default();
        s.advance_all(shift / (GAME_SPEED * PIPE_PARALLAX), &world);
        assert!(s.get(0).unwrap().x < -OFFSCREEN_MARGIN - PIPE_SIZE.x);

        assert_eq!(s.recycle(), 1);
        assert_eq!(s.len(), 2);
        let left: Vec<f32> = s.pipes().map(|p| p.x).collect();
        assert!(left[0] < left[1]);
        assert!((left[0] - (xs[1] - shift)).abs() < 1e-2);
        assert!((left[1] - (xs[2] - shift)).abs() < 1e-2);
    }

    #[test]
    fn test_recycle_keeps_cursor_on_same_pipe() {
        let mut s = stream();
        for _ in 0..4 {
            s.spawn(0.0);
        }
        s.mark_passed();
        s.mark_passed();
        let next_x = s.next_pipe().unwrap().x;

        let world = SimulationConfig::default();
        let shift = s.get(0).unwrap().right() + OFFSCREEN_MARGIN + 1.0;
        s.advance_all(shift / (GAME_SPEED * PIPE_PARALLAX), &world);
        let next_x = next_x - shift;

        assert_eq!(s.recycle(), 1);
        assert_eq!(s.next_index(), 1);
        assert!((s.next_pipe().unwrap().x - next_x).abs() < 1e-2);
        assert!(s.previous_pipe().is_some());
    }

    #[test]
    fn test_empty_stream() {
        let mut s = stream();
        assert!(s.next_pipe().is_none());
        assert!(s.previous_pipe().is_none());
        assert_eq!(s.recycle(), 0);
    }

    proptest! {
        #[test]
        fn prop_spawned_gaps_within_bounds(seed in any::<u64>(), tier_idx in 0usize..3) {
            let tier = GapTier::ALL[tier_idx];
            let mut s = PipeStream::new(tier, PIPE_SIZE, seed).unwrap();
            for _ in 0..20 {
                s.spawn(0.0);
            }
            for pipe in s.pipes() {
                prop_assert!(pipe.gap_y >= PIPE_EDGE_OFFSET);
                prop_assert!(pipe.gap_y <= SCREEN_HEIGHT - tier.gap() - PIPE_EDGE_OFFSET);
            }
        }

        #[test]
        fn prop_sorted_and_cursor_stable(
            seed in any::<u64>(),
            steps in prop::collection::vec((0.0f32..0.5, any::<bool>()), 1..200)
        ) {
            let world = SimulationConfig::default();
            let mut s = PipeStream::new(GapTier::Medium, PIPE_SIZE, seed).unwrap();
            let mut now = 0.0;
            s.spawn(now);
            for (dt, pass) in steps {
                now += dt;
                s.maybe_spawn(now);
                if pass && s.next_index() < s.len() {
                    s.mark_passed();
                }
                let before = s.next_pipe().map(|p| p.x);
                let removed = s.recycle();
                if removed > 0 {
                    // Cursor still points at the same pipe unless that pipe itself left
                    if let (Some(before), Some(after)) = (before, s.next_pipe().map(|p| p.x)) {
                        if before >= -OFFSCREEN_MARGIN - PIPE_SIZE.x {
                            prop_assert_eq!(before, after);
                        }
                    }
                }
                s.advance_all(dt, &world);
                let xs: Vec<f32> = s.pipes().map(|p| p.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(s.next_index() <= s.len());
            }
        }
    }
}
