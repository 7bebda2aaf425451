//! Immutable block snapshots

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::error::Error;
use crate::core::types::{IVec3, Result, Vec3};
use super::block::Block;

#[derive(Debug, Default)]
struct Inner {
    /// Blocks in insertion order
    blocks: Vec<Block>,
    /// Position -> index into `blocks`
    index: HashMap<IVec3, usize>,
}

impl Inner {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append unless the position is taken. Returns false on a duplicate.
    fn push_unique(&mut self, block: Block) -> bool {
        let position = block.position();
        if self.index.contains_key(&position) {
            return false;
        }
        self.index.insert(position, self.blocks.len());
        self.blocks.push(block);
        true
    }
}

/// Immutable snapshot of uniquely positioned blocks.
///
/// Clones share storage, so handing a set to the history or the scene is
/// cheap. Every edit returns a new set and leaves `self` untouched.
/// Equality compares the blocks as a set, ignoring insertion order.
#[derive(Clone, Debug, Default)]
pub struct BlockSet {
    inner: Arc<Inner>,
}

impl BlockSet {
    /// The empty scene
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from trusted blocks. Later duplicates of a position are dropped.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        let iter = blocks.into_iter();
        let mut inner = Inner::with_capacity(iter.size_hint().0);
        let mut duplicates = 0usize;
        for block in iter {
            if !inner.push_unique(block) {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            log::warn!("Dropped {} blocks with duplicate positions", duplicates);
        }
        Self { inner: Arc::new(inner) }
    }

    /// Ingest untrusted generator output.
    ///
    /// Malformed entries are skipped and the rest kept; duplicate positions
    /// keep their first occurrence.
    pub fn from_generation_result(raw: &[Value]) -> Self {
        let mut inner = Inner::with_capacity(raw.len());
        let mut skipped = 0usize;
        let mut duplicates = 0usize;

        for (i, entry) in raw.iter().enumerate() {
            match Block::from_raw(entry) {
                Ok(block) => {
                    if !inner.push_unique(block) {
                        duplicates += 1;
                    }
                }
                Err(e) => {
                    log::warn!("Skipping generated block #{}: {}", i, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 || duplicates > 0 {
            log::warn!(
                "Generation result: kept {} of {} blocks ({} malformed, {} duplicate)",
                inner.blocks.len(), raw.len(), skipped, duplicates
            );
        }

        Self { inner: Arc::new(inner) }
    }

    /// New set with `block` appended.
    ///
    /// Fails with [`Error::Conflict`] when the position is already occupied.
    pub fn add_block(&self, block: Block) -> Result<BlockSet> {
        let position = block.position();
        if self.contains(position) {
            return Err(Error::Conflict(position));
        }

        let mut inner = Inner::with_capacity(self.len() + 1);
        for existing in self.iter() {
            inner.push_unique(*existing);
        }
        inner.push_unique(block);
        Ok(Self { inner: Arc::new(inner) })
    }

    /// New set without the block at `position`.
    ///
    /// Removing an empty position returns a clone sharing storage with `self`.
    pub fn remove_block(&self, position: IVec3) -> BlockSet {
        if !self.contains(position) {
            return self.clone();
        }

        let mut inner = Inner::with_capacity(self.len() - 1);
        for block in self.iter().filter(|b| b.position() != position) {
            inner.push_unique(*block);
        }
        Self { inner: Arc::new(inner) }
    }

    /// Get number of blocks
    pub fn len(&self) -> usize {
        self.inner.blocks.len()
    }

    /// Check if set has no blocks
    pub fn is_empty(&self) -> bool {
        self.inner.blocks.is_empty()
    }

    /// Blocks in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.inner.blocks.iter()
    }

    /// Blocks as a slice, in insertion order
    pub fn blocks(&self) -> &[Block] {
        &self.inner.blocks
    }

    /// Block at a lattice position
    pub fn get(&self, position: IVec3) -> Option<&Block> {
        self.inner.index.get(&position).map(|&i| &self.inner.blocks[i])
    }

    /// Check whether a position is occupied
    pub fn contains(&self, position: IVec3) -> bool {
        self.inner.index.contains_key(&position)
    }

    /// Inclusive lattice bounds, or `None` for the empty set
    pub fn bounds(&self) -> Option<(IVec3, IVec3)> {
        let mut iter = self.iter().map(Block::position);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Center of the occupied lattice bounds (origin when empty)
    pub fn bounds_center(&self) -> Vec3 {
        match self.bounds() {
            Some((min, max)) => (min.as_vec3() + max.as_vec3()) * 0.5,
            None => Vec3::ZERO,
        }
    }

    /// Blocks grouped by height, lowest layer first. Order within a layer
    /// follows insertion order.
    pub fn layers(&self) -> BTreeMap<i32, Vec<&Block>> {
        let mut layers: BTreeMap<i32, Vec<&Block>> = BTreeMap::new();
        for block in self.iter() {
            layers.entry(block.y).or_default().push(block);
        }
        layers
    }

    /// Check whether two handles refer to the same stored snapshot
    pub fn ptr_eq(&self, other: &BlockSet) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for BlockSet {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len()
            && self.iter().all(|b| other.get(b.position()) == Some(b))
    }
}

impl Eq for BlockSet {}

impl<'a> IntoIterator for &'a BlockSet {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Block> for BlockSet {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter)
    }
}

impl Serialize for BlockSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for BlockSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Block>::deserialize(deserializer).map(Self::from_blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockColor;
    use serde_json::json;

    const RED: BlockColor = BlockColor::rgb(255, 0, 0);
    const GREEN: BlockColor = BlockColor::rgb(0, 255, 0);

    fn two_blocks() -> BlockSet {
        BlockSet::from_blocks([Block::new(0, 0, 0, RED), Block::new(1, 0, 0, GREEN)])
    }

    #[test]
    fn test_add_then_remove_restores_set() {
        let set = two_blocks();
        let added = set.add_block(Block::new(0, 1, 0, RED)).unwrap();
        assert_eq!(added.len(), 3);
        assert_eq!(set.len(), 2, "input snapshot must not change");

        let removed = added.remove_block(IVec3::new(0, 1, 0));
        assert_eq!(removed, set);
    }

    #[test]
    fn test_add_conflict_leaves_input_unchanged() {
        let set = two_blocks();
        let err = set.add_block(Block::new(1, 0, 0, RED)).unwrap_err();
        assert!(matches!(err, Error::Conflict(p) if p == IVec3::new(1, 0, 0)));
        assert_eq!(set.get(IVec3::new(1, 0, 0)).unwrap().color, GREEN);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_missing_is_identity() {
        let set = two_blocks();
        let same = set.remove_block(IVec3::new(9, 9, 9));
        assert!(same.ptr_eq(&set));
        assert_eq!(same, set);
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let set = BlockSet::from_blocks([
            Block::new(0, 0, 0, RED),
            Block::new(1, 0, 0, RED),
            Block::new(2, 0, 0, RED),
        ]);
        let removed = set.remove_block(IVec3::new(1, 0, 0));
        let xs: Vec<i32> = removed.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0, 2]);
        assert_eq!(removed.get(IVec3::new(2, 0, 0)).unwrap().x, 2);
    }

    #[test]
    fn test_equality_ignores_order_but_not_color() {
        let a = two_blocks();
        let b = BlockSet::from_blocks([Block::new(1, 0, 0, GREEN), Block::new(0, 0, 0, RED)]);
        let c = BlockSet::from_blocks([Block::new(1, 0, 0, RED), Block::new(0, 0, 0, RED)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generation_result_skips_malformed_and_dedupes() {
        let raw = vec![
            json!({"x": 0, "y": 0, "z": 0, "color": "#FF0000"}),
            json!({"x": 0.5, "y": 0, "z": 0, "color": "#FF0000"}),
            json!({"x": 1, "y": 0, "z": 0, "color": "not-a-color"}),
            json!({"x": 0, "y": 0, "z": 0, "color": "#0000FF"}),
            json!({"x": 1, "y": 0, "z": 0, "color": "#00ff00"}),
            json!("garbage"),
        ];
        let set = BlockSet::from_generation_result(&raw);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(IVec3::ZERO).unwrap().color, RED);
        assert_eq!(set.get(IVec3::X).unwrap().color, GREEN);
    }

    #[test]
    fn test_bounds_and_layers() {
        let set = BlockSet::from_blocks([
            Block::new(-2, 3, 0, RED),
            Block::new(2, 0, 4, RED),
            Block::new(0, 0, 0, GREEN),
        ]);
        assert_eq!(set.bounds(), Some((IVec3::new(-2, 0, 0), IVec3::new(2, 3, 4))));
        assert_eq!(set.bounds_center(), Vec3::new(0.0, 1.5, 2.0));

        let layers = set.layers();
        let heights: Vec<i32> = layers.keys().copied().collect();
        assert_eq!(heights, vec![0, 3]);
        assert_eq!(layers[&0].len(), 2);
        assert_eq!(layers[&0][0].x, 2);

        assert_eq!(BlockSet::empty().bounds(), None);
        assert_eq!(BlockSet::empty().bounds_center(), Vec3::ZERO);
    }

    #[test]
    fn test_bounds_center_at_lattice_extremes() {
        let far = BlockSet::from_blocks([
            Block::new(i32::MAX, 0, 0, RED),
            Block::new(i32::MAX - 1, 0, 0, GREEN),
        ]);
        let center = far.bounds_center();
        assert!(center.is_finite());
        assert!((center.x - i32::MAX as f32).abs() <= 256.0);
        assert_eq!(center.y, 0.0);

        let spread = BlockSet::from_blocks([
            Block::new(i32::MIN, i32::MIN, 0, RED),
            Block::new(i32::MAX, i32::MAX, 0, GREEN),
        ]);
        let center = spread.bounds_center();
        assert!(center.x.abs() < 1.0 && center.y.abs() < 1.0);
    }

    #[test]
    fn test_serde_round_trip_as_array() {
        let set = two_blocks();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        let back: BlockSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
