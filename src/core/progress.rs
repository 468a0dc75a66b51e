//! Three-phase progress model
//!
//! Every run reports on a fixed 0-100 scale split into named phases. The
//! weights live in [`ProgressPlan`]; components only say which phase they are
//! in and how far along it they are.

use std::fmt;

/// Receiver of progress updates, usually a terminal widget
pub trait ProgressSink: Send + Sync {
    /// Set the scale; called once per run
    fn set_total(&self, total: u64);

    /// Report the current value; a no-op before `set_total`
    fn update(&self, current: u64, description: &str);

    /// Called once at the very end of a successful run
    fn complete(&self);
}

/// Sink that drops every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn set_total(&self, _total: u64) {}
    fn update(&self, _current: u64, _description: &str) {}
    fn complete(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Discovery,
    Loading,
    Analysis,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Discovery => write!(f, "discovery"),
            Phase::Loading => write!(f, "loading"),
            Phase::Analysis => write!(f, "analysis"),
        }
    }
}

/// Slice of the overall scale owned by one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRange {
    pub start: u64,
    pub end: u64,
}

impl PhaseRange {
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// `start + done * span / total`, clamped to `end`
    ///
    /// An empty phase (`total == 0`) is reported as finished.
    pub fn at(&self, done: usize, total: usize) -> u64 {
        if total == 0 {
            return self.end;
        }
        let offset = (done as u64).saturating_mul(self.span()) / total as u64;
        (self.start + offset).min(self.end)
    }
}

/// Phase weights of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPlan {
    pub discovery: PhaseRange,
    pub loading: PhaseRange,
    pub analysis: PhaseRange,
}

impl Default for ProgressPlan {
    fn default() -> Self {
        Self {
            discovery: PhaseRange::new(0, 10),
            loading: PhaseRange::new(10, 80),
            analysis: PhaseRange::new(80, 100),
        }
    }
}

impl ProgressPlan {
    /// Full scale handed to the sink
    pub const SCALE: u64 = 100;

    /// Matched packages per discovery point
    pub const PACKAGES_PER_DISCOVERY_STEP: usize = 3;

    pub fn range(&self, phase: Phase) -> PhaseRange {
        match phase {
            Phase::Discovery => self.discovery,
            Phase::Loading => self.loading,
            Phase::Analysis => self.analysis,
        }
    }

    /// Progress of a phase with a known amount of work
    pub fn value(&self, phase: Phase, done: usize, total: usize) -> u64 {
        self.range(phase).at(done, total)
    }

    /// Discovery has no known total, so it grows one point per few packages
    pub fn discovery_value(&self, found: usize) -> u64 {
        let steps = (found / Self::PACKAGES_PER_DISCOVERY_STEP) as u64;
        (self.discovery.start + steps).min(self.discovery.end)
    }
}

/// Where a run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub phase: Phase,
    pub current: u64,
    pub total: u64,
}

/// Drives a sink through one run, keeping reported values non-decreasing
pub struct ProgressTracker<'a> {
    sink: &'a dyn ProgressSink,
    plan: ProgressPlan,
    state: ProgressState,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self::with_plan(sink, ProgressPlan::default())
    }

    pub fn with_plan(sink: &'a dyn ProgressSink, plan: ProgressPlan) -> Self {
        Self {
            sink,
            plan,
            state: ProgressState {
                phase: Phase::Discovery,
                current: 0,
                total: 0,
            },
        }
    }

    pub fn plan(&self) -> &ProgressPlan {
        &self.plan
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    /// Fix the scale on the sink
    pub fn start(&mut self) {
        self.state.total = ProgressPlan::SCALE;
        self.sink.set_total(ProgressPlan::SCALE);
    }

    pub fn enter(&mut self, phase: Phase) {
        self.state.phase = phase;
    }

    /// Report an absolute value inside the current phase
    pub fn report(&mut self, value: u64, description: &str) {
        let end = self.plan.range(self.state.phase).end;
        let value = value.min(end).max(self.state.current);
        self.state.current = value;
        self.sink.update(value, description);
    }

    /// Report `done` of `total` units of work in the current phase
    pub fn report_work(&mut self, done: usize, total: usize, description: &str) {
        let value = self.plan.value(self.state.phase, done, total);
        self.report(value, description);
    }

    /// Push the bar to the end of the scale and close the sink
    pub fn finish(&mut self, description: &str) {
        self.state.phase = Phase::Analysis;
        self.report(ProgressPlan::SCALE, description);
        self.sink.complete();
    }
}
