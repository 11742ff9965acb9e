use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, CONTACT_EPSILON};

/// Which set of static geometry a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Solid terrain. Blocks movement.
    Walls,
    /// Spikes and other instant-death shapes.
    Hazards,
    /// Fruit. Removed when touched.
    Collectibles,
}

/// Stable handle for a single piece of level geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// A piece of geometry returned by a collision query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: ColliderId,
    pub bounds: Aabb,
}

/// Read-only overlap queries against static level geometry.
///
/// Implementations must use [`Aabb::overlaps`] semantics: a collider is
/// reported exactly when it penetrates `shape` by more than
/// [`CONTACT_EPSILON`] on both axes. Flush contact, and float noise up to
/// that depth, is not a hit; anything deeper must never be missed. Queries
/// take a hypothetical shape and never observe or mutate the player.
pub trait CollisionOracle {
    /// Every collider in `layer` overlapping `shape`.
    fn colliding(&self, shape: &Aabb, layer: Layer) -> Vec<Collider>;

    fn overlaps(&self, shape: &Aabb, layer: Layer) -> bool {
        !self.colliding(shape, layer).is_empty()
    }
}

/// Level geometry the simulation drives. Removing touched collectibles is
/// the only mutation the movement core ever requests.
pub trait LevelGeometry: CollisionOracle {
    fn remove_collectible(&mut self, id: ColliderId);
}

/// Vector-backed level geometry, populated by a level loader.
#[derive(Debug, Clone, Default)]
pub struct Level {
    walls: Vec<Collider>,
    hazards: Vec<Collider>,
    collectibles: Vec<Collider>,
    next_id: u32,
    /// Spawn X position in world units.
    pub spawn_x: f32,
    /// Spawn Y position in world units.
    pub spawn_y: f32,
}

impl Level {
    pub fn new(spawn_x: f32, spawn_y: f32) -> Self {
        Self {
            spawn_x,
            spawn_y,
            ..Default::default()
        }
    }

    pub fn add(&mut self, layer: Layer, bounds: Aabb) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.layer_mut(layer).push(Collider { id, bounds });
        id
    }

    /// Removes a collider from whichever layer holds it. Returns `false`
    /// if the id was unknown or already removed.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        for layer in [Layer::Walls, Layer::Hazards, Layer::Collectibles] {
            let list = self.layer_mut(layer);
            if let Some(idx) = list.iter().position(|c| c.id == id) {
                list.remove(idx);
                return true;
            }
        }
        false
    }

    pub fn count(&self, layer: Layer) -> usize {
        self.layer(layer).len()
    }

    pub fn colliders(&self, layer: Layer) -> &[Collider] {
        self.layer(layer)
    }

    fn layer(&self, layer: Layer) -> &Vec<Collider> {
        match layer {
            Layer::Walls => &self.walls,
            Layer::Hazards => &self.hazards,
            Layer::Collectibles => &self.collectibles,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut Vec<Collider> {
        match layer {
            Layer::Walls => &mut self.walls,
            Layer::Hazards => &mut self.hazards,
            Layer::Collectibles => &mut self.collectibles,
        }
    }
}

impl CollisionOracle for Level {
    fn colliding(&self, shape: &Aabb, layer: Layer) -> Vec<Collider> {
        self.layer(layer)
            .iter()
            .filter(|c| c.bounds.overlaps(shape))
            .copied()
            .collect()
    }

    fn overlaps(&self, shape: &Aabb, layer: Layer) -> bool {
        self.layer(layer).iter().any(|c| c.bounds.overlaps(shape))
    }
}

impl LevelGeometry for Level {
    fn remove_collectible(&mut self, id: ColliderId) {
        self.collectibles.retain(|c| c.id != id);
    }
}
