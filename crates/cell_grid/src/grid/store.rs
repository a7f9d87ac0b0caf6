//! Marked-set store: per-layer sets of unique cell indices.
//!
//! Layers are independent; one cell may be marked under several keys. The
//! store only grows: nothing removes a cell once marked.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::CellIndex;

/// Layer a mark belongs to.
///
/// `Unkeyed` is what callers get when they pass no key. It is a distinct
/// variant, so no caller-chosen name can collide with it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub enum LayerKey {
  #[default]
  Unkeyed,
  Named(Box<str>),
}

impl LayerKey {
  pub fn named(name: impl Into<Box<str>>) -> Self {
    Self::Named(name.into())
  }

  /// The caller-chosen name, if any.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Unkeyed => None,
      Self::Named(name) => Some(name),
    }
  }
}

impl From<&str> for LayerKey {
  fn from(name: &str) -> Self {
    Self::Named(name.into())
  }
}

impl From<String> for LayerKey {
  fn from(name: String) -> Self {
    Self::Named(name.into_boxed_str())
  }
}

impl From<Option<&str>> for LayerKey {
  fn from(name: Option<&str>) -> Self {
    name.map_or(Self::Unkeyed, Self::from)
  }
}

/// Include/except key lists applied when reading the store.
///
/// `include: None` admits every layer; `Some(list)` admits only listed
/// layers. `except` removes layers afterwards. Both can be combined.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyFilter {
  pub include: Option<Vec<LayerKey>>,
  pub except: Option<Vec<LayerKey>>,
}

impl KeyFilter {
  /// Filter that admits every layer.
  pub fn all() -> Self {
    Self::default()
  }

  pub fn with_include<I, K>(mut self, keys: I) -> Self
  where
    I: IntoIterator<Item = K>,
    K: Into<LayerKey>,
  {
    self.include = Some(keys.into_iter().map(Into::into).collect());
    self
  }

  pub fn with_except<I, K>(mut self, keys: I) -> Self
  where
    I: IntoIterator<Item = K>,
    K: Into<LayerKey>,
  {
    self.except = Some(keys.into_iter().map(Into::into).collect());
    self
  }

  /// Does this filter admit `key`?
  #[inline]
  pub fn allows(&self, key: &LayerKey) -> bool {
    let included = self.include.as_ref().map_or(true, |keys| keys.contains(key));
    let excluded = self.except.as_ref().is_some_and(|keys| keys.contains(key));
    included && !excluded
  }
}

/// Per-layer sets of marked cells.
#[derive(Debug, Default)]
pub struct MarkedStore {
  layers: HashMap<LayerKey, HashSet<CellIndex>>,
}

impl MarkedStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Mark one cell. Returns true if it was not marked under `key` yet.
  pub fn insert(&mut self, key: &LayerKey, cell: CellIndex) -> bool {
    self.layer_mut(key).insert(cell)
  }

  /// Union `cells` into a layer. Returns how many were new.
  pub fn extend<'a>(&mut self, key: &LayerKey, cells: impl IntoIterator<Item = &'a CellIndex>) -> usize {
    let layer = self.layer_mut(key);
    let before = layer.len();
    layer.extend(cells);
    layer.len() - before
  }

  fn layer_mut(&mut self, key: &LayerKey) -> &mut HashSet<CellIndex> {
    self.layers.entry(key.clone()).or_default()
  }

  pub fn contains(&self, key: &LayerKey, cell: &CellIndex) -> bool {
    self.layers.get(key).is_some_and(|layer| layer.contains(cell))
  }

  /// Cells marked under one layer.
  pub fn len(&self, key: &LayerKey) -> usize {
    self.layers.get(key).map_or(0, HashSet::len)
  }

  /// True when no cell is marked under any layer.
  pub fn is_empty(&self) -> bool {
    self.layers.values().all(HashSet::is_empty)
  }

  /// Layers that have been written to.
  pub fn keys(&self) -> impl Iterator<Item = &LayerKey> {
    self.layers.keys()
  }

  /// Iterate marked cells of every admitted layer.
  ///
  /// A cell marked under several admitted layers is yielded once per layer.
  pub fn iter_filtered<'a>(
    &'a self,
    filter: &'a KeyFilter,
  ) -> impl Iterator<Item = &'a CellIndex> + 'a {
    self
      .layers
      .iter()
      .filter(move |(key, _)| filter.allows(*key))
      .flat_map(|(_, cells)| cells.iter())
  }

  /// Unique admitted cells passing `keep`, sorted.
  pub fn collect_filtered(
    &self,
    filter: &KeyFilter,
    mut keep: impl FnMut(&CellIndex) -> bool,
  ) -> Vec<CellIndex> {
    self
      .iter_filtered(filter)
      .filter(|cell| keep(*cell))
      .copied()
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;
