//! Collaborator interfaces
//!
//! Audio, analytics, crash reporting, persistence and wall-clock time live
//! outside the core. The session driver receives them explicitly through
//! [`Services`] and a [`Clock`] instead of reaching for global managers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::sim::collision::CollisionOutcome;
use crate::sim::state::{GameMode, SessionRecord};

/// Source of wall-clock timestamps (unix milliseconds)
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Manually advanced clock for tests and replays
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance_ms(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Sound cues the core asks the audio collaborator to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Crash,
    CoinPickup,
    BoundaryBump,
    SessionStart,
    SessionEnd,
}

impl AudioCue {
    /// Cue for a collision outcome (None for `CollisionOutcome::None`)
    pub fn for_outcome(outcome: &CollisionOutcome) -> Option<Self> {
        match outcome {
            CollisionOutcome::ObstacleHit { .. } => Some(AudioCue::Crash),
            CollisionOutcome::CollectiblePickup { .. } => Some(AudioCue::CoinPickup),
            CollisionOutcome::BoundaryContact => Some(AudioCue::BoundaryBump),
            CollisionOutcome::None => None,
        }
    }
}

pub trait AudioSink {
    fn play(&self, cue: AudioCue);
}

/// Analytics events emitted by the session driver
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    SessionStarted { mode: GameMode, environment: String },
    SessionPaused,
    SessionResumed,
    SessionEnded { score: u64, distance: f32, coins: u64 },
}

pub trait AnalyticsSink {
    fn track(&self, event: AnalyticsEvent);
}

/// Receives breadcrumbs for recovered anomalies (non-finite input etc.)
pub trait CrashReporter {
    fn breadcrumb(&self, message: &str);
}

/// Persistence collaborator for completed sessions
pub trait RecordStore {
    fn save(&self, record: &SessionRecord);
}

/// No-op collaborator used when a capability is absent
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&self, _cue: AudioCue) {}
}

impl AnalyticsSink for Silent {
    fn track(&self, _event: AnalyticsEvent) {}
}

impl CrashReporter for Silent {
    fn breadcrumb(&self, _message: &str) {}
}

impl RecordStore for Silent {
    fn save(&self, _record: &SessionRecord) {}
}

/// In-memory record store (shared handle, cloning shares the records)
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Rc<RefCell<Vec<SessionRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SessionRecord> {
        self.records.borrow().clone()
    }
}

impl RecordStore for MemoryRecordStore {
    fn save(&self, record: &SessionRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}

/// Injected collaborators for a flight session
pub struct Services {
    pub audio: Box<dyn AudioSink>,
    pub analytics: Box<dyn AnalyticsSink>,
    pub crash_reporter: Box<dyn CrashReporter>,
    pub records: Box<dyn RecordStore>,
}

impl Services {
    /// All collaborators are no-ops
    pub fn silent() -> Self {
        Self {
            audio: Box::new(Silent),
            analytics: Box::new(Silent),
            crash_reporter: Box::new(Silent),
            records: Box::new(Silent),
        }
    }

    pub fn with_records(mut self, records: impl RecordStore + 'static) -> Self {
        self.records = Box::new(records);
        self
    }

    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_analytics(mut self, analytics: impl AnalyticsSink + 'static) -> Self {
        self.analytics = Box::new(analytics);
        self
    }

    pub fn with_crash_reporter(mut self, reporter: impl CrashReporter + 'static) -> Self {
        self.crash_reporter = Box::new(reporter);
        self
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
