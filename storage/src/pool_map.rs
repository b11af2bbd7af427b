use std::ops::{Index, IndexMut};

use cranelift_entity::{packed_option::ReservedValue, EntityRef, PrimaryMap};

use crate::linked::{LinkedList, LinkedNode};

/// Primary map whose entries can be removed. Removed slots are never handed
/// out again, so a handle of a removed entry panics on every later access
/// instead of addressing a newer entity.
pub struct PoolMap<K: EntityRef, V> {
    data: PrimaryMap<K, Option<V>>,
    removed: usize,
}

impl<K: EntityRef, V> PoolMap<K, V> {
    pub fn new() -> Self {
        Self {
            data: PrimaryMap::new(),
            removed: 0,
        }
    }

    pub fn push(&mut self, value: V) -> K {
        self.data.push(Some(value))
    }

    pub fn remove(&mut self, e: K) -> V {
        match self.data[e].take() {
            Some(value) => {
                self.removed += 1;
                value
            }
            None => panic!("double removal of entity {}", e.index()),
        }
    }

    pub fn contains(&self, e: K) -> bool {
        self.data.get(e).map_or(false, Option::is_some)
    }

    pub fn get(&self, e: K) -> Option<&V> {
        self.data.get(e).and_then(Option::as_ref)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.data.len() - self.removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.data
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k, v)))
    }
}

impl<K: EntityRef, V> Default for PoolMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityRef, V> Index<K> for PoolMap<K, V> {
    type Output = V;

    fn index(&self, e: K) -> &V {
        match self.data[e].as_ref() {
            Some(value) => value,
            None => panic!("access to removed entity {}", e.index()),
        }
    }
}

impl<K: EntityRef, V> IndexMut<K> for PoolMap<K, V> {
    fn index_mut(&mut self, e: K) -> &mut V {
        match self.data[e].as_mut() {
            Some(value) => value,
            None => panic!("access to removed entity {}", e.index()),
        }
    }
}

impl<K: EntityRef + ReservedValue, V: LinkedNode<K>> LinkedList<K, V> for PoolMap<K, V> {}
