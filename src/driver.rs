//! Fixed-timestep driver
//!
//! Wall-clock time is accumulated and converted into whole simulation ticks
//! so the tick rate is independent of the caller's frame rate. At most
//! `max_steps_per_frame` ticks run per [`FixedStepDriver::advance`]; any
//! larger backlog is dropped.

use std::time::Duration;

use crate::core::config::SimulationConfig;
use crate::core::types::Tick;
use crate::ecosystem::Ecosystem;
use crate::persistence::SaveSlots;
use crate::simulation::{run_simulation_tick, PlayerInput, SimulationEvent};

/// Autosave intervals in ticks, cycled by the front end (0 = off)
pub const AUTOSAVE_INTERVALS: [u64; 4] = [0, 300, 600, 1200];

/// Result of one `advance` call
#[derive(Debug, Default)]
pub struct StepReport {
    pub ticks: u32,
    pub events: Vec<SimulationEvent>,
    /// Backlog discarded because the step limit was hit
    pub dropped: Duration,
}

pub struct FixedStepDriver {
    dt: Duration,
    max_steps: u32,
    accumulator: Duration,
}

impl FixedStepDriver {
    pub fn new(dt: Duration, max_steps: u32) -> Self {
        Self {
            dt: dt.max(Duration::from_micros(1)),
            max_steps: max_steps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let micros = (config.tick_seconds as f64 * 1_000_000.0).round() as u64;
        Self::new(Duration::from_micros(micros), config.max_steps_per_frame)
    }

    pub fn dt(&self) -> Duration {
        self.dt
    }

    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Accumulate `elapsed` and run every tick that has come due
    ///
    /// Movement intent applies to every tick run; the attack flag only to
    /// the first.
    pub fn advance(
        &mut self,
        world: &mut Ecosystem,
        elapsed: Duration,
        input: PlayerInput,
        mut autosave: Option<&mut Autosaver>,
    ) -> StepReport {
        self.accumulator += elapsed;
        let mut report = StepReport::default();
        let mut input = input;

        while self.accumulator >= self.dt && report.ticks < self.max_steps {
            self.accumulator -= self.dt;
            report.events.extend(run_simulation_tick(world, input));
            report.ticks += 1;
            input.attack = false;

            if let Some(saver) = autosave.as_deref_mut() {
                saver.after_tick(world);
            }
        }

        if self.accumulator >= self.dt {
            report.dropped = self.accumulator;
            tracing::debug!("Dropped {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        report
    }
}

/// Position in [`AUTOSAVE_INTERVALS`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutosaveSchedule {
    index: usize,
}

impl AutosaveSchedule {
    pub fn with_interval(interval: u64) -> Self {
        let index = AUTOSAVE_INTERVALS
            .iter()
            .position(|&i| i == interval)
            .unwrap_or(0);
        Self { index }
    }

    pub fn interval(&self) -> u64 {
        AUTOSAVE_INTERVALS[self.index]
    }

    pub fn is_enabled(&self) -> bool {
        self.interval() > 0
    }

    /// Move to the next interval, wrapping back to off
    pub fn cycle(&mut self) -> u64 {
        self.index = (self.index + 1) % AUTOSAVE_INTERVALS.len();
        self.interval()
    }

    pub fn is_due(&self, tick: Tick) -> bool {
        let interval = self.interval();
        interval > 0 && tick > 0 && tick % interval == 0
    }
}

/// Writes the active slot whenever the schedule comes due
pub struct Autosaver {
    pub slots: SaveSlots,
    pub slot: String,
    pub schedule: AutosaveSchedule,
}

impl Autosaver {
    pub fn new(slots: SaveSlots, slot: impl Into<String>) -> Self {
        Self {
            slots,
            slot: slot.into(),
            schedule: AutosaveSchedule::default(),
        }
    }

    /// Returns true if a save was written. Failures are logged only.
    pub fn after_tick(&mut self, world: &Ecosystem) -> bool {
        if !self.schedule.is_due(world.current_tick) {
            return false;
        }
        match self.slots.save(&self.slot, world, true, self.schedule.interval()) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Autosave to slot '{}' failed: {}", self.slot, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> FixedStepDriver {
        FixedStepDriver::from_config(&SimulationConfig::default())
    }

    #[test]
    fn test_dt_from_config() {
        assert_eq!(driver().dt(), Duration::from_millis(40));
    }

    #[test]
    fn test_runs_whole_ticks_and_keeps_remainder() {
        let mut driver = driver();
        let mut world = Ecosystem::new(SimulationConfig::default(), 1);

        let report =
            driver.advance(&mut world, Duration::from_millis(100), PlayerInput::idle(), None);
        assert_eq!(report.ticks, 2);
        assert_eq!(driver.pending(), Duration::from_millis(20));

        let report =
            driver.advance(&mut world, Duration::from_millis(20), PlayerInput::idle(), None);
        assert_eq!(report.ticks, 1);
        assert_eq!(world.current_tick, 3);
    }

    #[test]
    fn test_short_frame_runs_nothing() {
        let mut driver = driver();
        let mut world = Ecosystem::new(SimulationConfig::default(), 1);
        let report =
            driver.advance(&mut world, Duration::from_millis(39), PlayerInput::idle(), None);
        assert_eq!(report.ticks, 0);
        assert_eq!(world.current_tick, 0);
    }

    #[test]
    fn test_tick_length_frames_run_one_tick_each() {
        let mut driver = driver();
        let mut world = Ecosystem::with_initial_population(SimulationConfig::default(), 4);

        for _ in 0..25 {
            let report = driver.advance(&mut world, driver.dt(), PlayerInput::idle(), None);
            assert_eq!(report.ticks, 1);
            assert_eq!(report.dropped, Duration::ZERO);
        }
        assert_eq!(world.current_tick, 25);
        assert_eq!(driver.pending(), Duration::ZERO);
    }

    #[test]
    fn test_backlog_capped() {
        let mut driver = driver();
        let mut world = Ecosystem::new(SimulationConfig::default(), 1);
        let report = driver.advance(&mut world, Duration::from_secs(5), PlayerInput::idle(), None);
        assert_eq!(report.ticks, 8);
        assert!(report.dropped > Duration::ZERO);
        assert_eq!(driver.pending(), Duration::ZERO);
    }

    #[test]
    fn test_autosave_schedule_cycles() {
        let mut schedule = AutosaveSchedule::default();
        assert!(!schedule.is_enabled());
        assert_eq!(schedule.cycle(), 300);
        assert_eq!(schedule.cycle(), 600);
        assert_eq!(schedule.cycle(), 1200);
        assert_eq!(schedule.cycle(), 0);
    }

    #[test]
    fn test_autosave_due_on_multiples() {
        let schedule = AutosaveSchedule::with_interval(300);
        assert!(!schedule.is_due(0));
        assert!(!schedule.is_due(299));
        assert!(schedule.is_due(300));
        assert!(schedule.is_due(900));
        assert!(!AutosaveSchedule::default().is_due(300));
    }

    #[test]
    fn test_autosaver_writes_slot() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SaveSlots::new(dir.path()).unwrap();
        let mut saver = Autosaver::new(slots, "auto");
        saver.schedule = AutosaveSchedule::with_interval(300);

        let mut world = Ecosystem::new(SimulationConfig::default(), 1);
        world.current_tick = 300;
        assert!(saver.after_tick(&world));

        let meta = saver.slots.load_metadata("auto").unwrap();
        assert!(meta.autosave);
        assert_eq!(meta.autosave_interval, 300);
    }
}
