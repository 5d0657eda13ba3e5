//! Capabilities the generator needs from the host environment.
//!
//! Anything that owns tag, layer and scene registries or the asset tree
//! implements [`Host`]. The generator never touches global state directly,
//! so it runs against fixture data just as well as against a project on disk.

use crate::error::HostError;
use std::path::{Path, PathBuf};

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Source of raw names for the generated classes.
pub trait Host {
    /// Tag names in host order.
    fn list_tags(&self) -> HostResult<Vec<String>>;

    /// Layer names, where position `i` is layer index `i`.
    ///
    /// Unused slots are empty strings.
    fn list_layers(&self) -> HostResult<Vec<String>>;

    /// Paths of the scenes in the build, in build order.
    fn list_build_scenes(&self) -> HostResult<Vec<String>>;

    /// Numeric index of a layer as the host resolves it.
    fn layer_index_of(&self, name: &str) -> HostResult<Option<i32>> {
        let layers = self.list_layers()?;
        Ok(layers
            .iter()
            .position(|layer| !layer.is_empty() && layer == name)
            .and_then(|index| i32::try_from(index).ok()))
    }

    /// Directory the resource search starts from.
    fn asset_root(&self) -> PathBuf;

    /// Every directory below `root` (excluding `root`), depth first, in a
    /// stable order.
    fn walk_directories(&self, root: &Path) -> HostResult<Vec<PathBuf>>;

    /// Every file below `dir`, depth first, in a stable order.
    fn walk_files(&self, dir: &Path) -> HostResult<Vec<PathBuf>>;
}

/// Scene name as used at runtime: the file name without directory or extension.
pub fn scene_name(path: &str) -> &str {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    }
}
