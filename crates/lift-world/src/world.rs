//! The `World` trait — everything the elevator core consumes from its host.

use lift_core::{Aabb, BlockPos, EntityId, Material, Vec3};

/// The four display lines of a sign, top to bottom.
pub type SignLines = [String; 4];

/// Host-world interface.
///
/// Implementations are expected to be cheap per call: the movement scheduler
/// issues a handful of these per occupant per 100 ms tick.  All mutation goes
/// through `&mut self`, which — together with the scheduler funnelling every
/// external event through the same heartbeat — serializes world access
/// without any locking.
pub trait World {
    // ── Blocks ────────────────────────────────────────────────────────────

    /// Material at `pos`.  Unset positions are [`Material::AIR`].
    fn material_at(&self, pos: BlockPos) -> Material;

    /// Overwrite the block at `pos`.  Writing `Material::AIR` clears it.
    fn set_block(&mut self, pos: BlockPos, material: Material);

    /// Whether `material` blocks movement.  Host physics decides; the
    /// scanner combines this with the configured material sets to judge
    /// shaft passability.
    fn is_solid(&self, material: Material) -> bool;

    // ── Signs ─────────────────────────────────────────────────────────────

    /// The display lines of the sign at `pos`, or `None` if the block there
    /// holds no sign text.
    fn sign_lines(&self, pos: BlockPos) -> Option<SignLines>;

    /// Replace the sign text at `pos`.  Returns `false` if the write could
    /// not be persisted (no sign there, chunk unloaded, ...).
    fn set_sign_lines(&mut self, pos: BlockPos, lines: SignLines) -> bool;

    // ── Entities ──────────────────────────────────────────────────────────

    /// All entities whose bounding box overlaps `volume` and that satisfy
    /// `filter`.
    fn entities_in(&self, volume: &Aabb, filter: &dyn Fn(EntityId) -> bool) -> Vec<EntityId>;

    /// Current bounding box of `entity`, or `None` if it no longer exists.
    fn entity_aabb(&self, entity: EntityId) -> Option<Aabb>;

    /// Feet-center position, derived from the bounding box by default.
    fn entity_pos(&self, entity: EntityId) -> Option<Vec3> {
        self.entity_aabb(entity).map(|bb| {
            let c = bb.center();
            Vec3::new(c.x, bb.min.y, c.z)
        })
    }

    fn is_player(&self, entity: EntityId) -> bool;

    /// The vehicle `entity` currently rides, if any.
    fn vehicle_of(&self, entity: EntityId) -> Option<EntityId>;

    // ── Motion commands ───────────────────────────────────────────────────

    /// Move `entity` so its feet-center lands at `to`.
    fn teleport(&mut self, entity: EntityId, to: Vec3);

    /// Velocity in blocks per second.
    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3);

    /// Reset accumulated fall distance (prevents fall damage on landing).
    fn set_fall_distance(&mut self, entity: EntityId, distance: f32);

    fn set_gravity(&mut self, entity: EntityId, enabled: bool);

    // ── Physics-exemption hook ────────────────────────────────────────────

    /// Grant or revoke flight-equivalent status (anti-cheat exemption).
    /// Opaque to the core: invoked around every ride, implemented by hosts
    /// that police movement.  Default: no-op.
    fn set_flight_exempt(&mut self, _entity: EntityId, _exempt: bool) {}
}
