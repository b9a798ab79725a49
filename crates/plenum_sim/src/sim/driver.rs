//! Simulation registry and per-frame driver
//!
//! `AirflowSim` owns the scene, every particle pool, and every attractor;
//! there is no module-level state. It also mediates between the rack and
//! cooler pools: neither pool type references the other, the driver hands
//! both collections to the inter-pool resolver each tick.
//!
//! Single-threaded and frame-driven: `step()` runs the whole pipeline to
//! completion before returning, and pools are mutated only from here.
//! Removing an emitter between ticks retracts its pool and attractors in
//! the same operation, so a tick never sees a dangling reference.

use crate::scene::{ColliderShape, NodeId, Scene, Transform};
use crate::sim::attractor::{apply_attraction, Attractor};
use crate::sim::config::SimConfig;
use crate::sim::interpool::resolve_pair;
use crate::sim::pool::ParticlePool;
use crate::sim::probe::probe_pool;
use plenum_core::Xorshift32;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

new_key_type! {
    /// Stable key for a registered particle pool
    pub struct PoolId;
    /// Stable key for a registered attractor
    pub struct AttractorId;
}

/// What was registered for an emitter node, so removal can retract
/// everything atomically
enum EmitterEntry {
    Rack { pool: PoolId, attractor: AttractorId },
    Cooler { pool: PoolId },
}

/// The airflow simulation: registry plus per-frame driver
pub struct AirflowSim {
    config: SimConfig,
    scene: Scene,
    rack_pools: SlotMap<PoolId, ParticlePool>,
    cooler_pools: SlotMap<PoolId, ParticlePool>,
    attractors: SlotMap<AttractorId, Attractor>,
    emitters: FxHashMap<NodeId, EmitterEntry>,
    rng: Xorshift32,
    frame: u64,
}

impl AirflowSim {
    pub fn new(config: SimConfig) -> Self {
        Self::with_seed(config, 0x2e9a_41c7)
    }

    /// Create with an explicit RNG seed for reproducible runs
    pub fn with_seed(config: SimConfig, seed: u32) -> Self {
        Self {
            config,
            scene: Scene::new(),
            rack_pools: SlotMap::with_key(),
            cooler_pools: SlotMap::with_key(),
            attractors: SlotMap::with_key(),
            emitters: FxHashMap::default(),
            rng: Xorshift32::new(seed),
            frame: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, e.g. for dragging emitters between ticks
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Add static collidable geometry (floor, wall segment)
    pub fn add_collidable(&mut self, transform: Transform, shape: ColliderShape) -> NodeId {
        self.scene.add_collidable(transform, shape)
    }

    /// Register a rack emitter: spawns its hot-exhaust pool and attaches
    /// its intake attractor
    pub fn register_rack(&mut self, transform: Transform, collider: ColliderShape) -> NodeId {
        let node = self.scene.add_collidable(transform, collider);
        let pool = self.rack_pools.insert(ParticlePool::spawn(
            self.config.rack,
            node,
            &mut self.rng,
        ));
        let attractor = self
            .attractors
            .insert(Attractor::new(node, &self.config.attraction));
        self.emitters
            .insert(node, EmitterEntry::Rack { pool, attractor });
        debug!(?node, particles = self.config.rack.count, "registered rack");
        node
    }

    /// Register a cooler emitter and spawn its cold-supply pool
    pub fn register_cooler(&mut self, transform: Transform, collider: ColliderShape) -> NodeId {
        let node = self.scene.add_collidable(transform, collider);
        let pool = self.cooler_pools.insert(ParticlePool::spawn(
            self.config.cooler,
            node,
            &mut self.rng,
        ));
        self.emitters.insert(node, EmitterEntry::Cooler { pool });
        debug!(?node, particles = self.config.cooler.count, "registered cooler");
        node
    }

    /// Remove an emitter and retract its pool and attractors in the same
    /// operation
    ///
    /// Returns false if the node was not a registered emitter.
    pub fn remove_emitter(&mut self, node: NodeId) -> bool {
        let Some(entry) = self.emitters.remove(&node) else {
            return false;
        };
        match entry {
            EmitterEntry::Rack { pool, attractor } => {
                self.rack_pools.remove(pool);
                self.attractors.remove(attractor);
            }
            EmitterEntry::Cooler { pool } => {
                self.cooler_pools.remove(pool);
            }
        }
        self.scene.remove(node);
        debug!(?node, "removed emitter");
        true
    }

    /// Run one simulation tick
    ///
    /// Pipeline order: rack pools advance and probe geometry, cooler pools
    /// advance and probe geometry, hot and cold particles annihilate, and
    /// finally the attractor field steers the surviving cold particles.
    pub fn step(&mut self) {
        self.frame += 1;
        trace!(frame = self.frame, "tick");

        for pool in self.rack_pools.values_mut() {
            let transform = *self
                .scene
                .transform(pool.emitter())
                .expect("pool references a removed emitter");
            pool.integrate(&transform, &mut self.rng);
            probe_pool(&self.scene, pool, &self.config.collision);
        }

        for pool in self.cooler_pools.values_mut() {
            let transform = *self
                .scene
                .transform(pool.emitter())
                .expect("pool references a removed emitter");
            pool.integrate(&transform, &mut self.rng);
            probe_pool(&self.scene, pool, &self.config.collision);
        }

        for rack in self.rack_pools.values_mut() {
            for cooler in self.cooler_pools.values_mut() {
                resolve_pair(rack, cooler, &self.config.collision);
            }
        }

        apply_attraction(
            &self.scene,
            self.cooler_pools.values_mut(),
            self.attractors.values(),
            &self.config.attraction,
        );
    }

    pub fn rack_pools(&self) -> impl Iterator<Item = &ParticlePool> {
        self.rack_pools.values()
    }

    pub fn cooler_pools(&self) -> impl Iterator<Item = &ParticlePool> {
        self.cooler_pools.values()
    }

    /// Pool attached to an emitter node, if any
    pub fn pool_for(&self, node: NodeId) -> Option<&ParticlePool> {
        match self.emitters.get(&node)? {
            EmitterEntry::Rack { pool, .. } => self.rack_pools.get(*pool),
            EmitterEntry::Cooler { pool } => self.cooler_pools.get(*pool),
        }
    }

    pub fn attractors(&self) -> impl Iterator<Item = &Attractor> {
        self.attractors.values()
    }
}
