//! Command handlers for one seesaw session
//!
//! A UI shell calls `on_drop`/`on_reset`; the session mutates the state,
//! re-evaluates physics, notifies the renderer and writes the snapshot.
//! Every handler runs to completion synchronously.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::persistence::{KeyValueStore, SnapshotStore};
use crate::settings::PhysicsConfig;
use crate::sim::{DropLog, DropLogEntry, PhysicsResult, PlacedObject, SimulationState};
use crate::view::{PreviewBall, random_color};

/// Receives everything that changed after a command
pub trait Renderer {
    /// Draw a newly placed (or restored) object
    fn draw_object(&mut self, obj: &PlacedObject);
    /// Remove all drawn objects
    fn clear_objects(&mut self);
    /// Update angle, sums and status
    fn show_physics(&mut self, result: &PhysicsResult);
    /// Update the pending weight label
    fn show_next_weight(&mut self, weight: u8);

    fn log_drop(&mut self, _entry: &DropLogEntry) {}
    fn clear_log(&mut self) {}
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_object(&mut self, _obj: &PlacedObject) {}
    fn clear_objects(&mut self) {}
    fn show_physics(&mut self, _result: &PhysicsResult) {}
    fn show_next_weight(&mut self, _weight: u8) {}
}

/// What a drop produced
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    pub object: PlacedObject,
    pub entry: DropLogEntry,
    pub result: PhysicsResult,
    pub next_weight: u8,
}

pub struct Session<K, R> {
    state: SimulationState,
    physics: PhysicsConfig,
    log: DropLog,
    store: SnapshotStore<K>,
    renderer: R,
    /// Presentation-only RNG (object colors)
    color_rng: Pcg32,
    next_id: u64,
    result: PhysicsResult,
}

impl<K: KeyValueStore, R: Renderer> Session<K, R> {
    /// Empty session; nothing is loaded or rendered yet
    pub fn new(store: SnapshotStore<K>, renderer: R, physics: PhysicsConfig, seed: u64) -> Self {
        Self {
            state: SimulationState::new(seed),
            physics,
            log: DropLog::new(),
            store,
            renderer,
            color_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
            next_id: 1,
            result: PhysicsResult::default(),
        }
    }

    /// Create a session and restore whatever the store holds
    pub fn start(store: SnapshotStore<K>, renderer: R, physics: PhysicsConfig, seed: u64) -> Self {
        let mut session = Self::new(store, renderer, physics, seed);
        session.restore_from_store();
        session
    }

    /// Load the saved snapshot. A corrupt snapshot is logged, removed from
    /// the store and replaced by an empty plank; nothing is propagated.
    pub fn restore_from_store(&mut self) {
        self.renderer.clear_objects();

        match self.store.load() {
            Ok(Some(snapshot)) => {
                self.state.restore(snapshot);
                self.next_id = self
                    .state
                    .objects()
                    .iter()
                    .filter_map(PlacedObject::id)
                    .max()
                    .map_or(1, |id| id.saturating_add(1));
                for obj in self.state.objects() {
                    self.renderer.draw_object(obj);
                }
                log::info!("Restored {} objects", self.state.objects().len());
                self.recompute();
                self.persist();
            }
            Ok(None) => {
                log::info!("No saved simulation, starting fresh");
                self.recompute();
            }
            Err(e) if e.is_corrupt() => {
                log::error!("Failed to load simulation state: {}", e);
                if let Err(e) = self.store.clear() {
                    log::warn!("Failed to discard corrupt snapshot: {}", e);
                }
                self.state.reset();
                self.recompute();
            }
            Err(e) => {
                log::warn!("Storage unavailable, starting fresh: {}", e);
                self.recompute();
            }
        }

        self.renderer.show_next_weight(self.state.next_weight());
    }

    /// Drop the pending weight at `distance` from the pivot.
    /// Non-finite distances are rejected and nothing changes.
    pub fn on_drop(&mut self, distance: f64) -> Option<DropOutcome> {
        if !distance.is_finite() {
            log::warn!("Ignoring drop at non-finite distance {}", distance);
            return None;
        }

        let weight = self.state.next_weight();

        let entry = self.log.record(weight, distance);
        self.renderer.log_drop(&entry);

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let object = self.state.push(
            PlacedObject::new(weight, distance)
                .with_id(id)
                .with_color(random_color(&mut self.color_rng)),
        );
        self.renderer.draw_object(&object);

        let next_weight = self.state.generate_next_weight();
        self.renderer.show_next_weight(next_weight);

        log::debug!("{}", entry);

        let result = self.recompute();
        self.persist();

        Some(DropOutcome {
            object,
            entry,
            result,
            next_weight,
        })
    }

    /// Clear the plank and the log. The pending weight is kept.
    pub fn on_reset(&mut self) -> PhysicsResult {
        self.state.reset();
        self.log.clear();
        self.renderer.clear_objects();
        self.renderer.clear_log();

        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear saved simulation: {}", e);
        }
        log::info!("Simulation reset");

        let result = self.recompute();
        self.persist();
        result
    }

    /// Ball to show under the pointer
    pub fn preview(&self) -> PreviewBall {
        PreviewBall::new(self.state.next_weight())
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Result of the latest evaluation
    pub fn result(&self) -> &PhysicsResult {
        &self.result
    }

    pub fn log(&self) -> &DropLog {
        &self.log
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &SnapshotStore<K> {
        &self.store
    }

    fn recompute(&mut self) -> PhysicsResult {
        self.result = self.physics.evaluate(self.state.objects());
        self.renderer.show_physics(&self.result);
        self.result
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state.snapshot()) {
            log::warn!("Failed to save simulation: {}", e);
        }
    }
}
