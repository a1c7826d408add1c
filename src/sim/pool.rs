//! Fixed-capacity entity pools
//!
//! Traffic, pedestrians and hazards each live in their own pool. Entities are
//! created once per run by the spawn batch, then scroll down the road and are
//! recycled back above the playfield in place. Nothing is allocated mid-run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Which pool an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    TrafficCar,
    Pedestrian,
    Hazard,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 3] = [
        EntityCategory::TrafficCar,
        EntityCategory::Pedestrian,
        EntityCategory::Hazard,
    ];

    /// Maximum live entities in this category's pool
    pub fn capacity(&self) -> usize {
        match self {
            EntityCategory::TrafficCar => 10,
            EntityCategory::Pedestrian => 5,
            EntityCategory::Hazard => 10,
        }
    }

    /// Entities created by one spawn batch
    pub fn batch_size(&self) -> usize {
        match self {
            EntityCategory::TrafficCar => 3,
            EntityCategory::Pedestrian => 2,
            EntityCategory::Hazard => 3,
        }
    }

    /// Vertical stagger between consecutive pool slots
    pub fn stagger_gap(&self) -> f32 {
        match self {
            EntityCategory::TrafficCar => 200.0,
            EntityCategory::Pedestrian => 300.0,
            EntityCategory::Hazard => 250.0,
        }
    }

    /// Rendered sprite size (scale applied)
    pub fn sprite_size(&self) -> Vec2 {
        let base = match self {
            EntityCategory::TrafficCar => CAR_SIZE,
            EntityCategory::Pedestrian => PEDESTRIAN_SIZE,
            EntityCategory::Hazard => HAZARD_SIZE,
        };
        base * SPRITE_SCALE
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::TrafficCar => "traffic",
            EntityCategory::Pedestrian => "pedestrian",
            EntityCategory::Hazard => "hazard",
        }
    }
}

/// Road hazard variants (visual only; all hazards collide the same way)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HazardKind {
    #[default]
    Generic,
    Bigfoot,
    TreeBranch,
    OilSpill,
    Roadblock,
    Pothole,
}

impl HazardKind {
    pub const ALL: [HazardKind; 6] = [
        HazardKind::Generic,
        HazardKind::Bigfoot,
        HazardKind::TreeBranch,
        HazardKind::OilSpill,
        HazardKind::Roadblock,
        HazardKind::Pothole,
    ];

    /// Uniformly random kind
    pub fn random(rng: &mut Pcg32) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn sprite_key(&self) -> &'static str {
        match self {
            HazardKind::Generic => "obstacle",
            HazardKind::Bigfoot => "bigfoot",
            HazardKind::TreeBranch => "tree_branch",
            HazardKind::OilSpill => "oil_spill",
            HazardKind::Roadblock => "roadblock",
            HazardKind::Pothole => "pothole",
        }
    }
}

/// An entity owned by exactly one pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PooledEntity {
    pub id: u32,
    pub pos: Vec2,
    pub category: EntityCategory,
    /// Only set for hazards
    pub hazard: Option<HazardKind>,
}

impl PooledEntity {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.category.sprite_size())
    }

    pub fn sprite_key(&self) -> &'static str {
        match (self.category, self.hazard) {
            (EntityCategory::TrafficCar, _) => "otherCar",
            (EntityCategory::Pedestrian, _) => "pedestrian",
            (EntityCategory::Hazard, kind) => kind.unwrap_or_default().sprite_key(),
        }
    }
}

/// Random lane position
fn random_x(rng: &mut Pcg32) -> f32 {
    rng.random_range(SPAWN_X_MIN..=SPAWN_X_MAX) as f32
}

/// Recycled y for the entity at pool slot `index`; always negative
pub fn recycle_y(index: usize, gap: f32) -> f32 {
    RECYCLE_BASE_Y - index as f32 * gap
}

/// A bounded pool of one category
#[derive(Debug, Clone)]
pub struct EntityPool {
    category: EntityCategory,
    entities: Vec<PooledEntity>,
}

impl EntityPool {
    pub fn new(category: EntityCategory) -> Self {
        Self {
            category,
            entities: Vec::with_capacity(category.capacity()),
        }
    }

    pub fn category(&self) -> EntityCategory {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entities.len() >= self.category.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PooledEntity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PooledEntity> {
        self.entities.iter_mut()
    }

    /// Add an entity at `pos`. Returns `None` once the pool is at capacity.
    pub fn spawn(&mut self, id: u32, pos: Vec2, hazard: Option<HazardKind>) -> Option<&PooledEntity> {
        if self.is_full() {
            log::trace!("{} pool full ({}), spawn skipped", self.category.as_str(), self.len());
            return None;
        }
        self.entities.push(PooledEntity {
            id,
            pos,
            category: self.category,
            hazard,
        });
        self.entities.last()
    }

    /// Scroll every entity down by `speed`; recycle any past the bottom.
    /// Returns how many were recycled.
    pub fn advance(&mut self, speed: f32, rng: &mut Pcg32) -> usize {
        let gap = self.category.stagger_gap();
        let mut recycled = 0;
        for (index, entity) in self.entities.iter_mut().enumerate() {
            entity.pos.y += speed;
            if entity.pos.y > RECYCLE_Y {
                entity.pos.y = recycle_y(index, gap);
                entity.pos.x = random_x(rng);
                recycled += 1;
            }
        }
        recycled
    }

    /// Entities whose bounds overlap `bounds`, in slot order
    pub fn overlapping<'a>(&'a self, bounds: &'a Aabb) -> impl Iterator<Item = &'a PooledEntity> + 'a {
        self.entities.iter().filter(move |e| e.bounds().overlaps(bounds))
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

/// The three pools plus the id allocator they share
#[derive(Debug, Clone)]
pub struct EntityPools {
    pub traffic: EntityPool,
    pub pedestrians: EntityPool,
    pub hazards: EntityPool,
    next_id: u32,
}

impl Default for EntityPools {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPools {
    pub fn new() -> Self {
        Self {
            traffic: EntityPool::new(EntityCategory::TrafficCar),
            pedestrians: EntityPool::new(EntityCategory::Pedestrian),
            hazards: EntityPool::new(EntityCategory::Hazard),
            next_id: 1,
        }
    }

    pub fn pool(&self, category: EntityCategory) -> &EntityPool {
        match category {
            EntityCategory::TrafficCar => &self.traffic,
            EntityCategory::Pedestrian => &self.pedestrians,
            EntityCategory::Hazard => &self.hazards,
        }
    }

    fn pool_mut(&mut self, category: EntityCategory) -> &mut EntityPool {
        match category {
            EntityCategory::TrafficCar => &mut self.traffic,
            EntityCategory::Pedestrian => &mut self.pedestrians,
            EntityCategory::Hazard => &mut self.hazards,
        }
    }

    /// Pools in collision-check order
    pub fn pools(&self) -> [&EntityPool; 3] {
        [&self.traffic, &self.pedestrians, &self.hazards]
    }

    /// Every entity, traffic first
    pub fn iter(&self) -> impl Iterator<Item = &PooledEntity> {
        self.traffic
            .iter()
            .chain(self.pedestrians.iter())
            .chain(self.hazards.iter())
    }

    pub fn len(&self) -> usize {
        self.traffic.len() + self.pedestrians.len() + self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populate each pool with its batch, staggered above the playfield
    pub fn spawn_batch(&mut self, rng: &mut Pcg32) -> usize {
        let mut spawned = 0;
        for category in EntityCategory::ALL {
            let gap = category.stagger_gap();
            for i in 0..category.batch_size() {
                let x = random_x(rng);
                let y = rng.random_range(SPAWN_Y_MIN..=SPAWN_Y_MAX) as f32 - i as f32 * gap;
                let hazard = (category == EntityCategory::Hazard).then(|| HazardKind::random(rng));
                let id = self.next_id;
                if self.pool_mut(category).spawn(id, Vec2::new(x, y), hazard).is_some() {
                    self.next_id += 1;
                    spawned += 1;
                }
            }
        }
        log::debug!(
            "Spawned batch: {} traffic, {} pedestrians, {} hazards",
            self.traffic.len(),
            self.pedestrians.len(),
            self.hazards.len()
        );
        spawned
    }

    /// Scroll all pools by `speed`, returning total recycled
    pub fn advance(&mut self, speed: f32, rng: &mut Pcg32) -> usize {
        self.traffic.advance(speed, rng)
            + self.pedestrians.advance(speed, rng)
            + self.hazards.advance(speed, rng)
    }

    pub fn clear(&mut self) {
        self.traffic.clear();
        self.pedestrians.clear();
        self.hazards.clear();
    }
}
