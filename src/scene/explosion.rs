//! Exploded-state parameters, memoized per block position

use std::collections::HashMap;

use glam::{IVec3, Vec3};

use crate::block::BlockSet;
use super::config::SceneConfig;

/// Integer hash of a lattice position, producing a value in [0, 1).
fn hash_unit(p: IVec3, salt: u32) -> f32 {
    let mut h = (p.x as u32).wrapping_mul(374761393)
        .wrapping_add((p.y as u32).wrapping_mul(668265263))
        .wrapping_add((p.z as u32).wrapping_mul(2246822519))
        .wrapping_add(salt.wrapping_mul(1274126177));
    h = (h ^ (h >> 13)).wrapping_mul(1103515245);
    h ^= h >> 16;
    (h >> 8) as f32 / (1u32 << 24) as f32
}

/// Where a block drifts and how it spins while the scene is exploded
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionParams {
    pub drift_target: Vec3,
    /// Unit-length spin axis
    pub rotation_axis: Vec3,
    /// Radians per second, sign gives direction
    pub rotation_speed: f32,
}

impl ExplosionParams {
    /// Derive parameters for the block at `position` from a seed.
    pub fn derive(position: IVec3, seed: u32, config: &SceneConfig) -> Self {
        let r = |k: u32| hash_unit(position, seed.wrapping_add(k.wrapping_mul(0x9E37_79B9)));
        let p = position.as_vec3();

        let drift_target = Vec3::new(
            p.x * config.explode_scale + (r(0) - 0.5) * config.horizontal_jitter,
            p.y * config.explode_scale + config.upward_bias + r(1) * config.upward_jitter,
            p.z * config.explode_scale + (r(2) - 0.5) * config.horizontal_jitter,
        );

        let rotation_axis = Vec3::new(r(3), r(4), r(5))
            .try_normalize()
            .unwrap_or(Vec3::Y);

        Self {
            drift_target,
            rotation_axis,
            rotation_speed: (r(6) - 0.5) * 2.0 * config.max_rotation_speed,
        }
    }
}

/// Explosion parameters keyed by block position.
///
/// Entries are derived the first time a block is seen while exploded and then
/// reused every frame. Each derivation advances a counter that feeds the
/// seed, so a block that leaves and later re-enters gets fresh parameters.
#[derive(Debug, Default)]
pub struct ExplosionCache {
    params: HashMap<IVec3, ExplosionParams>,
    seed: u32,
    derivations: u32,
}

impl ExplosionCache {
    pub fn new(seed: u32) -> Self {
        Self {
            params: HashMap::new(),
            seed,
            derivations: 0,
        }
    }

    /// Cached parameters for `position`, deriving them on first sight
    pub fn get_or_derive(&mut self, position: IVec3, config: &SceneConfig) -> ExplosionParams {
        if let Some(params) = self.params.get(&position) {
            return *params;
        }
        let seed = self.seed ^ self.derivations.wrapping_mul(0x85EB_CA6B);
        self.derivations = self.derivations.wrapping_add(1);

        let params = ExplosionParams::derive(position, seed, config);
        self.params.insert(position, params);
        params
    }

    /// Cached parameters without deriving
    pub fn get(&self, position: IVec3) -> Option<&ExplosionParams> {
        self.params.get(&position)
    }

    /// Forget blocks that are no longer in the set
    pub fn retain(&mut self, set: &BlockSet) {
        self.params.retain(|p, _| set.contains(*p));
    }

    /// Forget everything (leaving the exploded state)
    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockColor};

    #[test]
    fn test_hash_unit_range() {
        for x in -20..20 {
            for salt in 0..10 {
                let v = hash_unit(IVec3::new(x, x * 3, -x), salt);
                assert!((0.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_derive_bounds() {
        let cfg = SceneConfig::default();
        for x in -5..5 {
            let pos = IVec3::new(x, 2, -x);
            let params = ExplosionParams::derive(pos, 7, &cfg);
            let base = pos.as_vec3() * cfg.explode_scale;
            let d = params.drift_target - base;

            assert!(d.x.abs() <= cfg.horizontal_jitter / 2.0);
            assert!(d.z.abs() <= cfg.horizontal_jitter / 2.0);
            assert!(d.y >= cfg.upward_bias && d.y < cfg.upward_bias + cfg.upward_jitter);
            assert!((params.rotation_axis.length() - 1.0).abs() < 1e-4);
            assert!(params.rotation_speed.abs() <= cfg.max_rotation_speed);
        }
    }

    #[test]
    fn test_cache_is_stable_until_cleared() {
        let cfg = SceneConfig::default();
        let mut cache = ExplosionCache::new(cfg.seed);
        let pos = IVec3::new(1, 2, 3);

        let first = cache.get_or_derive(pos, &cfg);
        assert_eq!(cache.get_or_derive(pos, &cfg), first);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        let fresh = cache.get_or_derive(pos, &cfg);
        assert_ne!(fresh, first);
    }

    #[test]
    fn test_retain_drops_removed_blocks() {
        let cfg = SceneConfig::default();
        let mut cache = ExplosionCache::new(1);
        cache.get_or_derive(IVec3::ZERO, &cfg);
        cache.get_or_derive(IVec3::X, &cfg);

        let set = BlockSet::from_blocks([Block::new(0, 0, 0, BlockColor::rgb(9, 9, 9))]);
        cache.retain(&set);
        assert!(cache.get(IVec3::ZERO).is_some());
        assert!(cache.get(IVec3::X).is_none());
    }
}
