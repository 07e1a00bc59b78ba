//! Headless waddle simulation.
//!
//! [`Simulation`] hosts a bevy_ecs [`World`] with a population of waddlers
//! and plays every collaborator the waddle controller depends on: it raises
//! random [`HostAction`]s, replays each tick speculatively like a predicting
//! client would, and flushes dirty fields to the replication thread.
//!
//! # Tick structure
//!
//! 1. First-predicted pass: pick actions, apply them, observers react.
//! 2. `prediction_passes` replays: the same actions are applied again with
//!    the tick marked as not first-predicted. The controller must ignore them.
//! 3. End of tick: the schedule flushes dirty fields into deltas.

pub mod actions;
pub mod report;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use log::{debug, info};
use smallvec::SmallVec;
use thiserror::Error;

use crate::components::gridmember::GridMember;
use crate::components::inputmover::InputMover;
use crate::components::mobstate::MobState;
use crate::components::standing::Standing;
use crate::components::waddle::WaddleAnimation;
use crate::resources::animator::WaddleAnimator;
use crate::resources::dirtyfields::DirtyFields;
use crate::resources::gametiming::GameTiming;
use crate::resources::presentation::{setup_presentation, shutdown_presentation};
use crate::resources::replication::{setup_replication, shutdown_replication};
use crate::resources::simconfig::{ConfigError, HostMode, SimConfig};
use crate::systems::replication::{
    flush_dirty_fields, forward_field_deltas, update_field_delta_messages,
};
use crate::systems::time::{start_replay, start_tick};
use crate::systems::waddle::{WaddleParams, register_waddle_observers};
use crate::waddle::gate::GateSnapshot;
use crate::waddle::host::WaddleStore;

pub use actions::{HostAction, HostFixtures};
pub use report::{SimSummary, TickReport};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open replication output {path}: {source}")]
    ReplicationSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode summary: {0}")]
    Summary(#[from] serde_json::Error),
}

/// Open the replication output. `None` discards deltas.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write + Send>, SimulationError> {
    match path {
        None => Ok(Box::new(std::io::sink())),
        Some(path) => {
            let file = File::create(path).map_err(|source| SimulationError::ReplicationSink {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
    gate_state: SystemState<WaddleParams<'static, 'static>>,
    rng: fastrand::Rng,
    fixtures: HostFixtures,
    waddlers: Vec<Entity>,
    config: SimConfig,
    next_tick: u64,
    summary: SimSummary,
}

impl Simulation {
    /// Build the world, spawn `config.entities` waddlers and start the
    /// replication (and, in client mode, presentation) threads.
    pub fn new(config: SimConfig, sink: Box<dyn Write + Send>) -> Self {
        let mut world = World::new();
        world.insert_resource(GameTiming::default());
        world.insert_resource(config.clone());
        setup_replication(&mut world, sink);
        match config.mode {
            HostMode::Server => world.insert_resource(WaddleAnimator::headless()),
            HostMode::Client => setup_presentation(&mut world),
        }
        register_waddle_observers(&mut world);

        let grid = world.spawn_empty().id();
        let strap = world.spawn_empty().id();
        let waddlers = (0..config.entities)
            .map(|_| {
                world
                    .spawn((
                        WaddleAnimation::new(config.profile),
                        MobState::Alive,
                        Standing::Upright,
                        GridMember::on(grid),
                        InputMover::default(),
                    ))
                    .id()
            })
            .collect();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                flush_dirty_fields,
                forward_field_deltas,
                update_field_delta_messages,
            )
                .chain(),
        );

        let gate_state = SystemState::<WaddleParams>::new(&mut world);
        let summary = SimSummary {
            mode: format!("{:?}", config.mode).to_lowercase(),
            entities: config.entities,
            prediction_passes: config.effective_prediction_passes(),
            ..Default::default()
        };
        info!(
            "Simulation ready: {} waddlers, mode {}, {} replays per tick",
            config.entities, summary.mode, summary.prediction_passes
        );

        Self {
            world,
            schedule,
            gate_state,
            rng: fastrand::Rng::with_seed(config.seed),
            fixtures: HostFixtures { grid, strap },
            waddlers,
            config,
            next_tick: 1,
            summary,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn waddlers(&self) -> &[Entity] {
        &self.waddlers
    }

    pub fn fixtures(&self) -> HostFixtures {
        self.fixtures
    }

    /// Run one logical tick with randomly chosen host actions.
    pub fn step(&mut self) -> TickReport {
        let mut actions: SmallVec<[(Entity, HostAction); 8]> = SmallVec::new();
        for &entity in &self.waddlers {
            if self.rng.f32() < self.config.event_chance {
                actions.push((entity, HostAction::random(&mut self.rng)));
            }
        }
        self.step_with(&actions)
    }

    /// Run one logical tick applying exactly `actions`.
    pub fn step_with(&mut self, actions: &[(Entity, HostAction)]) -> TickReport {
        let tick = self.next_tick;
        self.next_tick += 1;

        start_tick(&mut self.world, tick);
        let marks_before = self.total_marks();
        for &(entity, action) in actions {
            self.summary
                .actions
                .entry(action.name())
                .and_modify(|count| *count += 1)
                .or_insert(1);
            action.apply(&mut self.world, entity, self.fixtures);
        }
        let state_changes = self.total_marks() - marks_before;

        for _ in 0..self.config.effective_prediction_passes() {
            start_replay(&mut self.world);
            for &(entity, action) in actions {
                action.apply(&mut self.world, entity, self.fixtures);
            }
        }
        let replay_changes = self.total_marks() - marks_before - state_changes;

        let deltas_flushed = self.world.resource::<DirtyFields>().pending_len();
        self.schedule.run(&mut self.world);

        let (waddling, stale_waddlers) = self.audit_waddlers();
        let report = TickReport {
            tick,
            actions: actions.len(),
            state_changes,
            replay_changes,
            deltas_flushed,
            waddling,
            stale_waddlers,
        };
        debug!("{:?}", report);
        self.summary.record_tick(&report);
        report
    }

    /// Run the configured number of ticks.
    pub fn run(&mut self) {
        for _ in 0..self.config.ticks {
            self.step();
        }
    }

    /// Stop the worker threads and return the run totals.
    pub fn finish(mut self) -> SimSummary {
        self.summary.presentation = shutdown_presentation(&mut self.world);
        self.summary.replication = shutdown_replication(&mut self.world);
        info!(
            "Simulation finished after {} ticks: {} state changes, {} deltas",
            self.summary.ticks, self.summary.state_changes, self.summary.deltas_flushed
        );
        self.summary
    }

    fn total_marks(&self) -> u64 {
        self.world.resource::<DirtyFields>().total_marks()
    }

    /// Count waddlers, and those whose gate no longer passes.
    fn audit_waddlers(&mut self) -> (usize, usize) {
        let params = self.gate_state.get_mut(&mut self.world);
        let mut waddling = 0;
        let mut stale = 0;
        for &entity in &self.waddlers {
            if !params.is_waddling(entity) {
                continue;
            }
            waddling += 1;
            let snapshot = GateSnapshot::capture(&params, entity);
            let blocked = snapshot.blocking_conditions();
            if !blocked.is_empty() {
                stale += 1;
                for condition in blocked {
                    *self.summary.stale_reasons.entry(condition).or_insert(0) += 1;
                }
            }
        }
        (waddling, stale)
    }
}
