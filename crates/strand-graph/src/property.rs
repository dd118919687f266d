//! Out-of-slot properties.
//!
//! Attributes live inside the fixed-size record. Properties are
//! variable-length byte values kept in side tables keyed by slot index,
//! one [`PropertyMap`] per registered property. A property is cleared when
//! its entity is removed, so a recycled slot never inherits a value.

use std::hash::Hash;

use indexmap::IndexMap;
use strand_core::{PoolIndex, PropertyId};

/// Largest property value, in bytes. Journal records and fingerprints
/// prefix values with a `u32` length.
pub const MAX_VALUE_LEN: usize = u32::MAX as usize;

/// Values of one property for one entity kind, keyed by slot.
#[derive(Clone, Debug)]
pub struct PropertyMap<I: PoolIndex + Hash> {
    name: String,
    values: IndexMap<I, Vec<u8>>,
}

impl<I: PoolIndex + Hash> PropertyMap<I> {
    /// Empty map for the property called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }

    /// Name the property was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value stored for `index`.
    pub fn get(&self, index: I) -> Option<&[u8]> {
        self.values.get(&index).map(Vec::as_slice)
    }

    /// Store `value` for `index`, returning the previous value.
    ///
    /// # Panics
    ///
    /// If `value` is longer than [`MAX_VALUE_LEN`].
    pub fn set(&mut self, index: I, value: &[u8]) -> Option<Vec<u8>> {
        assert!(
            value.len() <= MAX_VALUE_LEN,
            "property value of {} bytes exceeds the {MAX_VALUE_LEN}-byte cap",
            value.len()
        );
        self.values.insert(index, value.to_vec())
    }

    /// Remove the value for `index`.
    pub fn remove(&mut self, index: I) -> Option<Vec<u8>> {
        self.values.swap_remove(&index)
    }

    /// Whether `index` has a value.
    pub fn contains(&self, index: I) -> bool {
        self.values.contains_key(&index)
    }

    /// Number of entities with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no entity has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Registry of every property declared for one entity kind.
#[derive(Clone, Debug)]
pub(crate) struct PropertyTables<I: PoolIndex + Hash> {
    maps: Vec<PropertyMap<I>>,
}

impl<I: PoolIndex + Hash> PropertyTables<I> {
    pub(crate) fn new() -> Self {
        Self { maps: Vec::new() }
    }

    /// Register `name`, returning the existing id if already registered.
    ///
    /// # Panics
    ///
    /// Panics if more than 65535 properties are registered.
    pub(crate) fn register(&mut self, name: &str) -> PropertyId {
        if let Some(pos) = self.maps.iter().position(|m| m.name() == name) {
            return PropertyId(pos as u16);
        }
        assert!(
            self.maps.len() < u16::MAX as usize,
            "at most {} properties per entity kind",
            u16::MAX
        );
        self.maps.push(PropertyMap::new(name));
        PropertyId((self.maps.len() - 1) as u16)
    }

    pub(crate) fn get(&self, property: PropertyId) -> &PropertyMap<I> {
        &self.maps[property.0 as usize]
    }

    pub(crate) fn get_mut(&mut self, property: PropertyId) -> &mut PropertyMap<I> {
        &mut self.maps[property.0 as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.maps.len()
    }

    /// Every property set on `index`, in registration order.
    pub(crate) fn values_of(&self, index: I) -> impl Iterator<Item = (PropertyId, &[u8])> + '_ {
        self.maps
            .iter()
            .enumerate()
            .filter_map(move |(i, m)| m.get(index).map(|v| (PropertyId(i as u16), v)))
    }

    /// Drop every value stored for `index`.
    pub(crate) fn clear(&mut self, index: I) {
        for map in &mut self.maps {
            map.remove(index);
        }
    }
}
