//! In-memory voxel world used by tests and demos.
//!
//! # What it models
//!
//! Just enough host behavior for the elevator core to be exercised
//! end-to-end: sparse blocks, sign text, entities with bounding boxes, and a
//! [`step`][GridWorld::step] integrator applying velocity and gravity.  No
//! collision resolution — the scheduler re-asserts occupant velocities every
//! tick anyway, which is exactly the drift-overriding contract being tested.
//!
//! # Spatial index
//!
//! Volume queries run against an R-tree (via `rstar`) over entity bounding
//! boxes: the tree gives coarse candidates, a strict AABB overlap test
//! narrows them.  The tree is rebuilt wholesale after any position change;
//! entity counts here are test-scale, so simplicity wins over incremental
//! maintenance.

use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::{FxHashMap, FxHashSet};

use lift_core::{Aabb, BlockPos, EntityId, Material, Vec3};

use crate::world::{SignLines, World};

const GRAVITY_ACCEL: f64 = 9.81;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the spatial index: an entity's bounding box.
#[derive(Clone)]
struct EntityEntry {
    envelope: AABB<[f64; 3]>,
    id: EntityId,
}

impl RTreeObject for EntityEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

// ── Entity record ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct EntityRec {
    /// Feet-center position.
    pos: Vec3,
    /// Blocks per second.
    vel: Vec3,
    width: f64,
    height: f64,
    player: bool,
    gravity: bool,
    fall_distance: f32,
    vehicle: Option<EntityId>,
    flight_exempt: bool,
    alive: bool,
}

impl EntityRec {
    fn aabb(&self) -> Aabb {
        let half = self.width * 0.5;
        Aabb {
            min: Vec3::new(self.pos.x - half, self.pos.y, self.pos.z - half),
            max: Vec3::new(self.pos.x + half, self.pos.y + self.height, self.pos.z + half),
        }
    }
}

// ── GridWorld ─────────────────────────────────────────────────────────────────

/// Sparse in-memory world.  Entity ids are slot indices; despawned slots are
/// tombstoned, never reused, so stale ids stay invalid.
pub struct GridWorld {
    blocks: FxHashMap<BlockPos, Material>,
    signs: FxHashMap<BlockPos, SignLines>,
    /// Materials that do not block movement (buttons, torches, ...).
    /// Everything else except air is solid.
    non_solid: FxHashSet<Material>,
    entities: Vec<EntityRec>,
    index: RTree<EntityEntry>,
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GridWorld {
    pub fn new() -> Self {
        Self {
            blocks: FxHashMap::default(),
            signs: FxHashMap::default(),
            non_solid: FxHashSet::default(),
            entities: Vec::new(),
            index: RTree::new(),
        }
    }

    // ── World building ────────────────────────────────────────────────────

    /// Declare `material` passable (buttons, sign posts, ladders, ...).
    pub fn mark_non_solid(&mut self, material: Material) {
        self.non_solid.insert(material);
    }

    /// Place a sign block: sets the material and its display lines.
    pub fn place_sign(&mut self, pos: BlockPos, material: Material, lines: SignLines) {
        self.blocks.insert(pos, material);
        self.signs.insert(pos, lines);
    }

    // ── Entities ──────────────────────────────────────────────────────────

    /// Spawn a player-sized entity (0.6 × 1.8) with gravity enabled.
    pub fn spawn_player(&mut self, pos: Vec3) -> EntityId {
        self.spawn(pos, 0.6, 1.8, true)
    }

    /// Spawn a non-player entity with the given box dimensions.
    pub fn spawn_mob(&mut self, pos: Vec3, width: f64, height: f64) -> EntityId {
        self.spawn(pos, width, height, false)
    }

    fn spawn(&mut self, pos: Vec3, width: f64, height: f64, player: bool) -> EntityId {
        let id = EntityId(self.entities.len() as u64);
        self.entities.push(EntityRec {
            pos,
            vel: Vec3::ZERO,
            width,
            height,
            player,
            gravity: true,
            fall_distance: 0.0,
            vehicle: None,
            flight_exempt: false,
            alive: true,
        });
        self.rebuild_index();
        id
    }

    pub fn despawn(&mut self, entity: EntityId) {
        if let Some(rec) = self.rec_mut(entity) {
            rec.alive = false;
            self.rebuild_index();
        }
    }

    /// Put `rider` inside `vehicle` (or clear with `None`).
    pub fn set_vehicle(&mut self, rider: EntityId, vehicle: Option<EntityId>) {
        if let Some(rec) = self.rec_mut(rider) {
            rec.vehicle = vehicle;
        }
    }

    pub fn velocity_of(&self, entity: EntityId) -> Option<Vec3> {
        self.rec(entity).map(|r| r.vel)
    }

    pub fn gravity_of(&self, entity: EntityId) -> Option<bool> {
        self.rec(entity).map(|r| r.gravity)
    }

    pub fn fall_distance_of(&self, entity: EntityId) -> Option<f32> {
        self.rec(entity).map(|r| r.fall_distance)
    }

    pub fn is_flight_exempt(&self, entity: EntityId) -> bool {
        self.rec(entity).is_some_and(|r| r.flight_exempt)
    }

    // ── Physics ───────────────────────────────────────────────────────────

    /// Advance every entity by `dt_secs`: integrate position from velocity,
    /// then apply gravity to velocity and accrue fall distance.  Position
    /// first, acceleration second — an entity whose velocity is zeroed every
    /// tick therefore never moves, however long it is held.
    pub fn step(&mut self, dt_secs: f64) {
        for rec in self.entities.iter_mut().filter(|r| r.alive) {
            rec.pos.x += rec.vel.x * dt_secs;
            rec.pos.y += rec.vel.y * dt_secs;
            rec.pos.z += rec.vel.z * dt_secs;
            if rec.vel.y < 0.0 {
                rec.fall_distance += (-rec.vel.y * dt_secs) as f32;
            }
            if rec.gravity {
                rec.vel.y -= GRAVITY_ACCEL * dt_secs;
            }
        }
        self.rebuild_index();
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn rec(&self, entity: EntityId) -> Option<&EntityRec> {
        self.entities.get(entity.0 as usize).filter(|r| r.alive)
    }

    fn rec_mut(&mut self, entity: EntityId) -> Option<&mut EntityRec> {
        self.entities.get_mut(entity.0 as usize).filter(|r| r.alive)
    }

    fn rebuild_index(&mut self) {
        let entries = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, r)| r.alive)
            .map(|(i, r)| {
                let bb = r.aabb();
                EntityEntry {
                    envelope: AABB::from_corners(
                        [bb.min.x, bb.min.y, bb.min.z],
                        [bb.max.x, bb.max.y, bb.max.z],
                    ),
                    id: EntityId(i as u64),
                }
            })
            .collect();
        self.index = RTree::bulk_load(entries);
    }
}

impl World for GridWorld {
    fn material_at(&self, pos: BlockPos) -> Material {
        self.blocks.get(&pos).copied().unwrap_or(Material::AIR)
    }

    fn set_block(&mut self, pos: BlockPos, material: Material) {
        if material.is_air() {
            self.blocks.remove(&pos);
            self.signs.remove(&pos);
        } else {
            self.blocks.insert(pos, material);
        }
    }

    fn is_solid(&self, material: Material) -> bool {
        !material.is_air() && !self.non_solid.contains(&material)
    }

    fn sign_lines(&self, pos: BlockPos) -> Option<SignLines> {
        self.signs.get(&pos).cloned()
    }

    fn set_sign_lines(&mut self, pos: BlockPos, lines: SignLines) -> bool {
        match self.signs.get_mut(&pos) {
            Some(existing) => {
                *existing = lines;
                true
            }
            None => false,
        }
    }

    fn entities_in(&self, volume: &Aabb, filter: &dyn Fn(EntityId) -> bool) -> Vec<EntityId> {
        let envelope = AABB::from_corners(
            [volume.min.x, volume.min.y, volume.min.z],
            [volume.max.x, volume.max.y, volume.max.z],
        );
        // Coarse phase via the R-tree, then a strict overlap test: rstar
        // counts boxes sharing a face as intersecting, World semantics don't.
        self.index
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| {
                self.rec(entry.id)
                    .is_some_and(|r| r.aabb().overlaps(volume))
            })
            .filter(|entry| filter(entry.id))
            .map(|entry| entry.id)
            .collect()
    }

    fn entity_aabb(&self, entity: EntityId) -> Option<Aabb> {
        self.rec(entity).map(|r| r.aabb())
    }

    fn entity_pos(&self, entity: EntityId) -> Option<Vec3> {
        self.rec(entity).map(|r| r.pos)
    }

    fn is_player(&self, entity: EntityId) -> bool {
        self.rec(entity).is_some_and(|r| r.player)
    }

    fn vehicle_of(&self, entity: EntityId) -> Option<EntityId> {
        self.rec(entity).and_then(|r| r.vehicle)
    }

    fn teleport(&mut self, entity: EntityId, to: Vec3) {
        if let Some(rec) = self.rec_mut(entity) {
            rec.pos = to;
            self.rebuild_index();
        }
    }

    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3) {
        if let Some(rec) = self.rec_mut(entity) {
            rec.vel = velocity;
        }
    }

    fn set_fall_distance(&mut self, entity: EntityId, distance: f32) {
        if let Some(rec) = self.rec_mut(entity) {
            rec.fall_distance = distance;
        }
    }

    fn set_gravity(&mut self, entity: EntityId, enabled: bool) {
        if let Some(rec) = self.rec_mut(entity) {
            rec.gravity = enabled;
        }
    }

    fn set_flight_exempt(&mut self, entity: EntityId, exempt: bool) {
        if let Some(rec) = self.rec_mut(entity) {
            rec.flight_exempt = exempt;
        }
    }
}
