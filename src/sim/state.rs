//! Game session state
//!
//! `GameState` is an immutable value. Every transition and mutator takes
//! `&self` and returns a new state; a transition that is not permitted from
//! the current status returns an unchanged copy instead of failing.
//!
//! ```text
//! NotStarted --start--> Playing --pause--> Paused
//!                          ^  <--resume--    |
//!                          |                 |
//!                          +------end--------+--> Ended --reset--> NotStarted
//! ```

use serde::{Deserialize, Serialize};

use super::collision::CollisionOutcome;
use crate::finite_or_zero;

/// Environment used when none is specified
pub const DEFAULT_ENVIRONMENT: &str = "meadow";

/// Which kind of session is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Tutorial,
    #[default]
    FreePlay,
    Challenge,
    DailyRun,
    WeeklySpecial,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Tutorial => "tutorial",
            GameMode::FreePlay => "free_play",
            GameMode::Challenge => "challenge",
            GameMode::DailyRun => "daily_run",
            GameMode::WeeklySpecial => "weekly_special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tutorial" => Some(GameMode::Tutorial),
            "free_play" | "freeplay" => Some(GameMode::FreePlay),
            "challenge" => Some(GameMode::Challenge),
            "daily_run" | "dailyrun" => Some(GameMode::DailyRun),
            "weekly_special" | "weeklyspecial" => Some(GameMode::WeeklySpecial),
            _ => None,
        }
    }
}

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    NotStarted,
    Playing,
    Paused,
    Ended,
}

/// Terminal summary of a finished session, handed to persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub mode: GameMode,
    pub score: u64,
    pub distance: f32,
    pub coins: u64,
    /// Simulated flight time (seconds)
    pub duration_secs: f32,
    pub environment: String,
    /// Unix ms
    pub completed_at: f64,
}

/// Raw serialized form; converted through the same clamps as live states
#[derive(Debug, Clone, Deserialize)]
struct GameStateFields {
    #[serde(default)]
    mode: GameMode,
    #[serde(default)]
    status: GameStatus,
    // Signed and wide so negative snapshots clamp instead of failing to load
    #[serde(default)]
    score: i128,
    #[serde(default)]
    distance: f32,
    #[serde(default)]
    time_elapsed: f32,
    #[serde(default)]
    coins_collected: i128,
    #[serde(default)]
    environment_type: Option<String>,
    #[serde(default)]
    start_time: Option<f64>,
    #[serde(default)]
    end_time: Option<f64>,
}

impl From<GameStateFields> for GameState {
    fn from(fields: GameStateFields) -> Self {
        let start_time = fields.start_time.filter(|t| t.is_finite());
        let end_time = fields.end_time.filter(|t| t.is_finite());

        // Restore the status/timestamp invariants
        let (status, end_time) = match (fields.status, start_time, end_time) {
            (GameStatus::Playing | GameStatus::Paused, None, _) => (GameStatus::NotStarted, None),
            (GameStatus::Ended, _, None) => (GameStatus::Ended, Some(start_time.unwrap_or(0.0))),
            (status, _, end) => (status, end),
        };

        Self {
            mode: fields.mode,
            status,
            score: clamp_count(fields.score),
            distance: non_negative(fields.distance),
            time_elapsed: non_negative(fields.time_elapsed),
            coins_collected: clamp_count(fields.coins_collected),
            environment_type: fields
                .environment_type
                .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            start_time,
            end_time,
        }
    }
}

#[inline]
fn non_negative(value: f32) -> f32 {
    finite_or_zero(value).max(0.0)
}

/// `total + delta` for monotonic counters, saturating at `f32::MAX`
#[inline]
fn saturating_sum(total: f32, delta: f32) -> f32 {
    let sum = total + delta;
    if sum.is_finite() { sum } else { f32::MAX }
}

#[inline]
fn clamp_count(value: i128) -> u64 {
    value.clamp(0, u64::MAX as i128) as u64
}

/// Authoritative record of one play session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GameStateFields")]
pub struct GameState {
    mode: GameMode,
    status: GameStatus,
    score: u64,
    distance: f32,
    time_elapsed: f32,
    coins_collected: u64,
    environment_type: String,
    start_time: Option<f64>,
    end_time: Option<f64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::default(), DEFAULT_ENVIRONMENT)
    }
}

impl GameState {
    /// A not-started session
    pub fn new(mode: GameMode, environment_type: impl Into<String>) -> Self {
        Self {
            mode,
            status: GameStatus::NotStarted,
            score: 0,
            distance: 0.0,
            time_elapsed: 0.0,
            coins_collected: 0,
            environment_type: environment_type.into(),
            start_time: None,
            end_time: None,
        }
    }

    /// Default not-started free-play session
    pub fn initial() -> Self {
        Self::default()
    }

    // --- Accessors ---

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn time_elapsed(&self) -> f32 {
        self.time_elapsed
    }

    pub fn coins_collected(&self) -> u64 {
        self.coins_collected
    }

    pub fn environment_type(&self) -> &str {
        &self.environment_type
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    // --- Transitions ---

    /// NotStarted -> Playing, zeroing progress
    pub fn start(&self, now_ms: f64) -> Self {
        if self.status != GameStatus::NotStarted {
            return self.clone();
        }
        Self {
            status: GameStatus::Playing,
            score: 0,
            distance: 0.0,
            time_elapsed: 0.0,
            coins_collected: 0,
            start_time: Some(finite_or_zero_f64(now_ms)),
            end_time: None,
            ..self.clone()
        }
    }

    /// Playing -> Paused
    pub fn pause(&self) -> Self {
        if self.status != GameStatus::Playing {
            return self.clone();
        }
        Self {
            status: GameStatus::Paused,
            ..self.clone()
        }
    }

    /// Paused -> Playing
    pub fn resume(&self) -> Self {
        if self.status != GameStatus::Paused {
            return self.clone();
        }
        Self {
            status: GameStatus::Playing,
            ..self.clone()
        }
    }

    /// Playing | Paused -> Ended
    pub fn end(&self, now_ms: f64) -> Self {
        if !matches!(self.status, GameStatus::Playing | GameStatus::Paused) {
            return self.clone();
        }
        Self {
            status: GameStatus::Ended,
            end_time: Some(finite_or_zero_f64(now_ms)),
            ..self.clone()
        }
    }

    /// Ended -> NotStarted, keeping mode and environment
    pub fn reset(&self) -> Self {
        if self.status != GameStatus::Ended {
            return self.clone();
        }
        Self::new(self.mode, self.environment_type.clone())
    }

    /// Ended -> Playing in one step
    pub fn restart(&self, now_ms: f64) -> Self {
        if self.status != GameStatus::Ended {
            return self.clone();
        }
        self.reset().start(now_ms)
    }

    // --- Progress mutators (only while playing) ---

    fn playing_with(&self, update: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        if self.status == GameStatus::Playing {
            update(&mut next);
        }
        next
    }

    /// Add (or with a negative delta, subtract) score, floored at zero
    pub fn adding_score(&self, delta: i64) -> Self {
        self.playing_with(|s| {
            let total = (s.score as i128 + delta as i128).clamp(0, u64::MAX as i128);
            s.score = total as u64;
        })
    }

    /// Set score, floored at zero
    pub fn with_score(&self, score: i64) -> Self {
        self.playing_with(|s| s.score = score.max(0) as u64)
    }

    /// Accumulate distance; negative or non-finite deltas are ignored
    pub fn adding_distance(&self, delta: f32) -> Self {
        self.playing_with(|s| {
            if delta.is_finite() && delta > 0.0 {
                s.distance = saturating_sum(s.distance, delta);
            }
        })
    }

    /// Set distance absolutely (may decrease), floored at zero
    pub fn with_distance(&self, distance: f32) -> Self {
        self.playing_with(|s| s.distance = non_negative(distance))
    }

    pub fn adding_coin(&self) -> Self {
        self.adding_coins(1)
    }

    pub fn adding_coins(&self, count: u32) -> Self {
        self.playing_with(|s| s.coins_collected = s.coins_collected.saturating_add(count as u64))
    }

    pub fn with_time_elapsed(&self, seconds: f32) -> Self {
        self.playing_with(|s| s.time_elapsed = non_negative(seconds))
    }

    /// Advance simulated time by `dt`, ignoring negative and non-finite steps
    pub fn adding_time(&self, dt: f32) -> Self {
        self.playing_with(|s| {
            if dt.is_finite() && dt > 0.0 {
                s.time_elapsed = saturating_sum(s.time_elapsed, dt);
            }
        })
    }

    pub fn with_environment_type(&self, environment_type: impl Into<String>) -> Self {
        let environment_type = environment_type.into();
        self.playing_with(|s| s.environment_type = environment_type)
    }

    /// Apply a collision outcome (only while playing)
    pub fn applying(&self, outcome: &CollisionOutcome) -> Self {
        match *outcome {
            CollisionOutcome::ObstacleHit { penalty } => self.adding_score(-(penalty as i64)),
            CollisionOutcome::CollectiblePickup { coins, score } => {
                self.adding_coins(coins).adding_score(score as i64)
            }
            CollisionOutcome::BoundaryContact | CollisionOutcome::None => self.clone(),
        }
    }

    /// Terminal record, available once the session has ended
    pub fn record(&self) -> Option<SessionRecord> {
        if self.status != GameStatus::Ended {
            return None;
        }
        Some(SessionRecord {
            mode: self.mode,
            score: self.score,
            distance: self.distance,
            coins: self.coins_collected,
            duration_secs: self.time_elapsed,
            environment: self.environment_type.clone(),
            completed_at: self.end_time.unwrap_or(0.0),
        })
    }
}

#[inline]
fn finite_or_zero_f64(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
