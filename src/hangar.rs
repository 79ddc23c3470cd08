//! Hangar configuration
//!
//! Airplane, fold, and design identifiers are closed enumerations resolved
//! once at configuration-load time into an immutable [`PlaneSpec`].

use serde::{Deserialize, Serialize};

use crate::sim::state::SessionRecord;

/// Airplane body type (sets base mass and damping)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AirplaneType {
    #[default]
    Classic,
    Glider,
    Dart,
    Stunt,
}

/// Base physical values for an airplane type
#[derive(Debug, Clone, Copy, PartialEq)]
struct AirplaneBase {
    mass: f32,
    linear_damping: f32,
    angular_damping: f32,
    turn_rate: f32,
}

impl AirplaneType {
    pub const ALL: [AirplaneType; 4] = [
        AirplaneType::Classic,
        AirplaneType::Glider,
        AirplaneType::Dart,
        AirplaneType::Stunt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AirplaneType::Classic => "classic",
            AirplaneType::Glider => "glider",
            AirplaneType::Dart => "dart",
            AirplaneType::Stunt => "stunt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(AirplaneType::Classic),
            "glider" => Some(AirplaneType::Glider),
            "dart" => Some(AirplaneType::Dart),
            "stunt" => Some(AirplaneType::Stunt),
            _ => None,
        }
    }

    fn base(&self) -> AirplaneBase {
        match self {
            AirplaneType::Classic => AirplaneBase {
                mass: 1.0,
                linear_damping: 0.3,
                angular_damping: 0.8,
                turn_rate: 1.0,
            },
            AirplaneType::Glider => AirplaneBase {
                mass: 0.8,
                linear_damping: 0.15,
                angular_damping: 1.0,
                turn_rate: 0.8,
            },
            AirplaneType::Dart => AirplaneBase {
                mass: 1.2,
                linear_damping: 0.1,
                angular_damping: 0.6,
                turn_rate: 0.9,
            },
            AirplaneType::Stunt => AirplaneBase {
                mass: 0.9,
                linear_damping: 0.35,
                angular_damping: 0.4,
                turn_rate: 1.5,
            },
        }
    }
}

/// Fold pattern (scales the airplane's base values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoldType {
    #[default]
    Standard,
    WideWing,
    NeedleNose,
    Canard,
}

/// Multipliers contributed by a fold type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldMultipliers {
    pub lift: f32,
    pub drag: f32,
    pub turn_rate: f32,
    pub mass: f32,
}

impl FoldType {
    pub const ALL: [FoldType; 4] = [
        FoldType::Standard,
        FoldType::WideWing,
        FoldType::NeedleNose,
        FoldType::Canard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoldType::Standard => "standard",
            FoldType::WideWing => "wide_wing",
            FoldType::NeedleNose => "needle_nose",
            FoldType::Canard => "canard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(FoldType::Standard),
            "wide_wing" | "widewing" => Some(FoldType::WideWing),
            "needle_nose" | "needlenose" => Some(FoldType::NeedleNose),
            "canard" => Some(FoldType::Canard),
            _ => None,
        }
    }

    pub fn multipliers(&self) -> FoldMultipliers {
        match self {
            FoldType::Standard => FoldMultipliers {
                lift: 1.0,
                drag: 1.0,
                turn_rate: 1.0,
                mass: 1.0,
            },
            FoldType::WideWing => FoldMultipliers {
                lift: 1.3,
                drag: 1.2,
                turn_rate: 0.85,
                mass: 1.05,
            },
            FoldType::NeedleNose => FoldMultipliers {
                lift: 0.8,
                drag: 0.7,
                turn_rate: 0.9,
                mass: 0.95,
            },
            FoldType::Canard => FoldMultipliers {
                lift: 1.1,
                drag: 1.05,
                turn_rate: 1.3,
                mass: 1.0,
            },
        }
    }
}

/// Paper design (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DesignType {
    #[default]
    Plain,
    Striped,
    Camo,
    Neon,
}

impl DesignType {
    pub const ALL: [DesignType; 4] = [
        DesignType::Plain,
        DesignType::Striped,
        DesignType::Camo,
        DesignType::Neon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DesignType::Plain => "plain",
            DesignType::Striped => "striped",
            DesignType::Camo => "camo",
            DesignType::Neon => "neon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "plain" => Some(DesignType::Plain),
            "striped" => Some(DesignType::Striped),
            "camo" => Some(DesignType::Camo),
            "neon" => Some(DesignType::Neon),
            _ => None,
        }
    }
}

/// Immutable physical constants for a chosen airplane configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneSpec {
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub lift_multiplier: f32,
    pub drag_multiplier: f32,
    pub turn_rate: f32,
}

impl PlaneSpec {
    /// Combine an airplane base with a fold's multipliers
    pub fn resolve(airplane: AirplaneType, fold: FoldType) -> Self {
        let base = airplane.base();
        let fold = fold.multipliers();
        Self {
            mass: base.mass * fold.mass,
            // Draggier folds bleed speed faster
            linear_damping: base.linear_damping * fold.drag,
            angular_damping: base.angular_damping,
            lift_multiplier: fold.lift,
            drag_multiplier: fold.drag,
            turn_rate: base.turn_rate * fold.turn_rate,
        }
    }
}

impl Default for PlaneSpec {
    fn default() -> Self {
        Self::resolve(AirplaneType::default(), FoldType::default())
    }
}

/// Lifetime totals across completed sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotProgress {
    pub best_distance: f32,
    pub total_coins: u64,
    pub best_score: u64,
    pub sessions_played: u32,
}

impl PilotProgress {
    /// Fold a finished session into the totals
    pub fn record(&mut self, record: &SessionRecord) {
        self.best_distance = self.best_distance.max(record.distance);
        self.total_coins = self.total_coins.saturating_add(record.coins);
        self.best_score = self.best_score.max(record.score);
        self.sessions_played = self.sessions_played.saturating_add(1);
    }
}

/// A single unlock condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Requirement {
    /// Best single-flight distance
    Distance(f32),
    /// Lifetime coins collected
    Coins(u64),
    /// Best single-session score
    Score(u64),
    SessionsPlayed(u32),
}

impl Requirement {
    pub fn is_met(&self, progress: &PilotProgress) -> bool {
        match *self {
            Requirement::Distance(d) => progress.best_distance >= d,
            Requirement::Coins(c) => progress.total_coins >= c,
            Requirement::Score(s) => progress.best_score >= s,
            Requirement::SessionsPlayed(n) => progress.sessions_played >= n,
        }
    }
}

/// Unlock requirements for an airplane, fold, or design identifier
///
/// Unknown identifiers have no requirements.
pub fn unlock_requirements(identifier: &str) -> Vec<Requirement> {
    if let Some(airplane) = AirplaneType::from_str(identifier) {
        return match airplane {
            AirplaneType::Classic => Vec::new(),
            AirplaneType::Glider => vec![Requirement::Distance(500.0)],
            AirplaneType::Dart => vec![Requirement::Distance(1000.0), Requirement::Coins(100)],
            AirplaneType::Stunt => vec![Requirement::Score(2500), Requirement::SessionsPlayed(10)],
        };
    }
    if let Some(fold) = FoldType::from_str(identifier) {
        return match fold {
            FoldType::Standard => Vec::new(),
            FoldType::WideWing => vec![Requirement::SessionsPlayed(3)],
            FoldType::NeedleNose => vec![Requirement::Distance(750.0)],
            FoldType::Canard => vec![Requirement::Coins(250)],
        };
    }
    if let Some(design) = DesignType::from_str(identifier) {
        return match design {
            DesignType::Plain => Vec::new(),
            DesignType::Striped => vec![Requirement::Coins(50)],
            DesignType::Camo => vec![Requirement::Coins(150)],
            DesignType::Neon => vec![Requirement::Score(5000)],
        };
    }
    Vec::new()
}

/// Whether every requirement for `identifier` is satisfied
pub fn is_unlocked(identifier: &str, progress: &PilotProgress) -> bool {
    unlock_requirements(identifier)
        .iter()
        .all(|req| req.is_met(progress))
}
