//! Flight session driver
//!
//! Owns one flying body, its physics engine and the session state, and runs
//! the per-frame pipeline: physics step, distance/time bookkeeping, contact
//! resolution, state transitions. Collaborators are injected via [`Services`].

use glam::Vec2;

use super::body::FlyingBody;
use super::collision::{Category, CollisionOutcome, CollisionResolver};
use super::engine::PhysicsEngine;
use super::state::{GameMode, GameState, GameStatus, SessionRecord};
use super::wind::WindModel;
use crate::config::FlightConfig;
use crate::consts::*;
use crate::finite_or_zero;
use crate::hangar::PlaneSpec;
use crate::services::{AnalyticsEvent, AudioCue, Clock, Services};

/// Weather directive from the environment collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindDirective {
    pub direction_degrees: f32,
    pub strength: f32,
    /// Seconds; `<= 0` applies immediately
    pub duration: f32,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tilt sample, nominally [-1, 1] per axis
    pub tilt_x: f32,
    pub tilt_y: f32,
    /// Contacts reported by the scene since the last tick
    pub contacts: Vec<(Category, Category)>,
    pub wind: Option<WindDirective>,
}

impl TickInput {
    pub fn tilt(tilt_x: f32, tilt_y: f32) -> Self {
        Self {
            tilt_x,
            tilt_y,
            ..Default::default()
        }
    }

    pub fn with_contact(mut self, a: Category, b: Category) -> Self {
        self.contacts.push((a, b));
        self
    }
}

pub struct Flight {
    state: GameState,
    body: FlyingBody,
    engine: PhysicsEngine,
    resolver: CollisionResolver,
    spec: PlaneSpec,
    launch_speed: f32,
    services: Services,
    clock: Box<dyn Clock>,
    accumulator: f32,
    /// Latest tilt plus contacts and wind not yet consumed by a fixed step
    pending: TickInput,
}

impl Flight {
    pub fn new(
        mode: GameMode,
        environment_type: &str,
        spec: PlaneSpec,
        config: &FlightConfig,
        wind: WindModel,
        clock: impl Clock + 'static,
        services: Services,
    ) -> Self {
        let config = config.clone().sanitized();
        Self {
            state: GameState::new(mode, environment_type),
            body: FlyingBody::new(&spec, Vec2::ZERO),
            engine: PhysicsEngine::new(&config, wind),
            resolver: CollisionResolver::from_config(&config),
            spec,
            launch_speed: config.launch_speed,
            services,
            clock: Box::new(clock),
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn body(&self) -> &FlyingBody {
        &self.body
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PhysicsEngine {
        &mut self.engine
    }

    fn launch_body(&mut self) {
        self.body = FlyingBody::new(&self.spec, Vec2::ZERO)
            .with_velocity(Vec2::new(self.launch_speed, 0.0));
        self.accumulator = 0.0;
        self.pending = TickInput::default();
    }

    /// Replace the state, reporting whether the transition was accepted
    fn transition(&mut self, next: GameState, event: &str) -> bool {
        if next.status() == self.state.status() {
            log::debug!("Ignored {event} while {:?}", self.state.status());
            return false;
        }
        log::info!("Session {event}: {:?} -> {:?}", self.state.status(), next.status());
        self.state = next;
        true
    }

    fn on_started(&mut self) {
        self.launch_body();
        self.engine.start();
        self.services.audio.play(AudioCue::SessionStart);
        self.services.analytics.track(AnalyticsEvent::SessionStarted {
            mode: self.state.mode(),
            environment: self.state.environment_type().to_string(),
        });
    }

    pub fn start(&mut self) -> &GameState {
        let next = self.state.start(self.clock.now_ms());
        if self.transition(next, "start") {
            self.on_started();
        }
        &self.state
    }

    pub fn pause(&mut self) -> &GameState {
        let next = self.state.pause();
        if self.transition(next, "pause") {
            self.engine.stop();
            self.services.analytics.track(AnalyticsEvent::SessionPaused);
        }
        &self.state
    }

    pub fn resume(&mut self) -> &GameState {
        let next = self.state.resume();
        if self.transition(next, "resume") {
            self.engine.start();
            self.services.analytics.track(AnalyticsEvent::SessionResumed);
        }
        &self.state
    }

    /// End the session, handing the terminal record to the record store
    pub fn end(&mut self) -> Option<SessionRecord> {
        let next = self.state.end(self.clock.now_ms());
        if !self.transition(next, "end") {
            return None;
        }
        self.engine.stop();
        self.services.audio.play(AudioCue::SessionEnd);
        self.services.analytics.track(AnalyticsEvent::SessionEnded {
            score: self.state.score(),
            distance: self.state.distance(),
            coins: self.state.coins_collected(),
        });

        let record = self.state.record();
        if let Some(record) = &record {
            self.services.records.save(record);
        }
        record
    }

    /// Ended -> Playing with a fresh body
    pub fn restart(&mut self) -> &GameState {
        if self.state.status() != GameStatus::Ended {
            log::debug!("Ignored restart while {:?}", self.state.status());
            return &self.state;
        }
        let next = self.state.restart(self.clock.now_ms());
        if self.transition(next, "restart") {
            self.on_started();
        }
        &self.state
    }

    /// Advance one simulation step; returns the outcomes of resolved contacts
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<CollisionOutcome> {
        if !self.state.is_playing() {
            return Vec::new();
        }
        let dt = finite_or_zero(dt).max(0.0);

        if let Some(directive) = input.wind {
            self.engine.wind_mut().transition_to(
                directive.direction_degrees,
                directive.strength,
                directive.duration,
            );
        }

        let start_x = self.body.position.x;
        let report = self.engine.step(&mut self.body, input.tilt_x, input.tilt_y, dt);
        if !report.is_clean() {
            log::warn!("Recovered from malformed flight input: {report:?}");
            self.services
                .crash_reporter
                .breadcrumb(&format!("flight input neutralized: {report:?}"));
        }

        let travelled = self.body.position.x - start_x;
        self.state = self.state.adding_distance(travelled).adding_time(dt);

        let mut outcomes = Vec::with_capacity(input.contacts.len());
        for &(a, b) in &input.contacts {
            let outcome = self.resolver.resolve(a, b);
            if let Some(cue) = AudioCue::for_outcome(&outcome) {
                self.services.audio.play(cue);
            }
            self.state = self.state.applying(&outcome);
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Run as many fixed steps as `frame_dt` covers
    ///
    /// Contacts and wind directives are held until the next fixed step runs,
    /// so frames shorter than `SIM_DT` never lose them.
    pub fn update(&mut self, input: &TickInput, frame_dt: f32) -> Vec<CollisionOutcome> {
        let frame_dt = finite_or_zero(frame_dt).clamp(0.0, 0.1);
        self.accumulator += frame_dt;

        self.pending.tilt_x = input.tilt_x;
        self.pending.tilt_y = input.tilt_y;
        self.pending.contacts.extend_from_slice(&input.contacts);
        if input.wind.is_some() {
            self.pending.wind = input.wind;
        }

        let mut outcomes = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot inputs go to the first step only
            let step_input = std::mem::replace(
                &mut self.pending,
                TickInput::tilt(input.tilt_x, input.tilt_y),
            );
            outcomes.extend(self.tick(&step_input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        outcomes
    }
}

impl std::fmt::Debug for Flight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flight")
            .field("state", &self.state)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
