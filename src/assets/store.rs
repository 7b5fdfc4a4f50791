use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use crate::assets::decode::{PreparedAsset, decode_asset};
use crate::assets::source::{AssetRef, read_source};
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::model::document::Document;

/// Decode outcome for one asset reference.
#[derive(Clone, Debug)]
pub enum AssetState {
    Ready(PreparedAsset),
    /// The payload could not be read or decoded; renderers apply their fallback.
    Failed(String),
}

/// Decoded assets keyed by [`AssetRef`].
///
/// Decoding is front-loaded with [`AssetStore::prepare`] so a render pass does no IO. Failures
/// are recorded instead of returned: the compositor decides how each layer degrades.
#[derive(Clone, Debug)]
pub struct AssetStore {
    root: PathBuf,
    entries: HashMap<AssetRef, AssetState>,
    advisory_bytes: u64,
}

impl AssetStore {
    /// Store resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
            advisory_bytes: u64::MAX,
        }
    }

    /// Payloads above `bytes` are logged; they are still decoded.
    pub fn with_advisory_limit(mut self, bytes: u64) -> Self {
        self.advisory_bytes = bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode an in-memory payload under `key`, replacing any previous entry.
    pub fn insert_bytes(&mut self, key: AssetRef, bytes: &[u8]) -> &AssetState {
        let state = self.decode_bytes(&key, bytes);
        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(state);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(state),
        }
    }

    /// Resolve and decode `key` unless it is already known.
    pub fn load(&mut self, key: &AssetRef) -> &AssetState {
        if !self.entries.contains_key(key) {
            let state = match read_source(key, &self.root) {
                Ok(bytes) => self.decode_bytes(key, &bytes),
                Err(e) => {
                    tracing::warn!(asset = %key, error = %e, "asset could not be read");
                    AssetState::Failed(e.to_string())
                }
            };
            return self.entries.entry(key.clone()).or_insert(state);
        }
        &self.entries[key]
    }

    fn decode_bytes(&self, key: &AssetRef, bytes: &[u8]) -> AssetState {
        if bytes.len() as u64 > self.advisory_bytes {
            tracing::warn!(
                asset = %key,
                bytes = bytes.len(),
                limit = self.advisory_bytes,
                "asset payload exceeds the advisory size"
            );
        }
        match decode_asset(bytes, key.looks_like_svg()) {
            Ok(asset) => AssetState::Ready(asset),
            Err(e) => {
                tracing::warn!(asset = %key, error = %e, "asset decode failed");
                AssetState::Failed(e.to_string())
            }
        }
    }

    /// Load every asset referenced by `doc`. Returns how many of them failed.
    #[tracing::instrument(skip_all, fields(root = %self.root.display()))]
    pub fn prepare(&mut self, doc: &Document) -> usize {
        let refs: Vec<AssetRef> = doc.asset_refs().cloned().collect();
        refs.iter()
            .filter(|r| matches!(self.load(r), AssetState::Failed(_)))
            .count()
    }

    pub fn get(&self, key: &AssetRef) -> Option<&AssetState> {
        self.entries.get(key)
    }

    /// The decoded asset, or `None` when it failed or was never loaded.
    pub fn ready(&self, key: &AssetRef) -> Option<&PreparedAsset> {
        match self.entries.get(key) {
            Some(AssetState::Ready(a)) => Some(a),
            _ => None,
        }
    }

    /// Like [`AssetStore::ready`] but reporting why the asset is unusable.
    pub fn require(&self, key: &AssetRef) -> PlaymatResult<&PreparedAsset> {
        match self.entries.get(key) {
            Some(AssetState::Ready(a)) => Ok(a),
            Some(AssetState::Failed(msg)) => {
                Err(PlaymatError::decode(format!("asset '{key}': {msg}")))
            }
            None => Err(PlaymatError::decode(format!("asset '{key}' was not prepared"))),
        }
    }

    /// Aspect ratio used when a logo is created from `key`; a square when decoding failed.
    pub fn aspect_ratio(&mut self, key: &AssetRef) -> f64 {
        match self.load(key) {
            AssetState::Ready(asset) => asset.aspect_ratio().unwrap_or(1.0),
            AssetState::Failed(_) => {
                tracing::warn!(asset = %key, "using a square aspect ratio for undecodable logo");
                1.0
            }
        }
    }

    /// Forget an entry so the next [`AssetStore::load`] reads it again.
    pub fn evict(&mut self, key: &AssetRef) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
