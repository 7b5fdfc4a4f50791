use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PlaymatError, PlaymatResult};

/// Opaque handle to an image payload: a path relative to the asset root, or a `data:` URI
/// produced by an upload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Whether the reference names an SVG document (by media type or file extension).
    pub fn looks_like_svg(&self) -> bool {
        if self.is_data_uri() {
            return self.0["data:".len()..].starts_with("image/svg+xml");
        }
        Path::new(&self.0)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
    }

    /// Build a base64 `data:` URI for an in-memory payload.
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{media_type};base64,{b64}"))
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_data_uri() {
            // Uploads can be megabytes long; never dump them into logs.
            let head: String = self.0.chars().take(32).collect();
            write!(f, "{head}… ({} bytes)", self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for AssetRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Normalize a relative asset path, rejecting anything that escapes the asset root.
pub fn normalize_rel_path(source: &str) -> PlaymatResult<String> {
    let s = source.replace('\\', "/");
    let p = Path::new(&s);
    if p.is_absolute() {
        return Err(PlaymatError::validation(format!(
            "asset path '{source}' must be relative"
        )));
    }

    let mut parts = Vec::<String>::new();
    for c in p.components() {
        match c {
            Component::CurDir => {}
            Component::Normal(seg) => parts.push(seg.to_string_lossy().into_owned()),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(PlaymatError::validation(format!(
                        "asset path '{source}' escapes the asset root"
                    )));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(PlaymatError::validation(format!(
                    "asset path '{source}' must be relative"
                )));
            }
        }
    }
    if parts.is_empty() {
        return Err(PlaymatError::validation("asset path is empty"));
    }
    Ok(parts.join("/"))
}

/// Read the raw payload behind an [`AssetRef`].
pub fn read_source(asset: &AssetRef, root: &Path) -> PlaymatResult<Vec<u8>> {
    if asset.is_data_uri() {
        return decode_data_uri(asset.as_str());
    }
    let rel = normalize_rel_path(asset.as_str())?;
    let path: PathBuf = root.join(rel);
    let bytes =
        std::fs::read(&path).with_context(|| format!("read asset '{}'", path.display()))?;
    Ok(bytes)
}

/// Decode a `data:[<media type>][;base64],<data>` URI.
pub fn decode_data_uri(uri: &str) -> PlaymatResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| PlaymatError::decode("not a data uri"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PlaymatError::decode("data uri has no payload separator"))?;
    if meta.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        return base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| PlaymatError::decode(format!("invalid base64 payload: {e}")));
    }
    Ok(payload.as_bytes().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
