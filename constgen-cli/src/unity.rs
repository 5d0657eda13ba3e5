//! Unity project host.
//!
//! Reads tags, layers and build scenes straight from the serialized
//! `ProjectSettings` assets and walks the asset directory on disk, so
//! constants can be generated without a running editor.
//!
//! Only the small part of Unity's YAML dialect those two files use is
//! understood: top-level keys of the settings object and block sequences of
//! plain or single-quoted scalars.

use crate::config::Config;
use constgen::error::HostError;
use constgen::host::{Host, HostResult};
use constgen::layers::MAX_LAYERS;
use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, OnceLock};
use tracing::debug;

/// Tags every Unity project has; they are not serialized in `TagManager.asset`.
pub const BUILTIN_TAGS: [&str; 7] = [
    "Untagged",
    "Respawn",
    "Finish",
    "EditorOnly",
    "MainCamera",
    "Player",
    "GameController",
];

const TAG_MANAGER: &str = "TagManager.asset";
const BUILD_SETTINGS: &str = "EditorBuildSettings.asset";

/// `  key:` or `  key: value` at the settings object's indentation.
static KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  ([A-Za-z_][A-Za-z0-9_ ]*):(?:\s(.*))?$").expect("valid regex"));

/// `  - value` sequence item, value possibly empty.
static ITEM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^  - ?(.*)$").expect("valid regex"));

/// Legacy `Builtin Layer 0: Default` / `User Layer 8: Enemies` layer slots.
static LEGACY_LAYER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Builtin|User) Layer (\d+)$").expect("valid regex"));

/// `    path: Assets/Scenes/Main.unity` / `  - enabled: 1` inside `m_Scenes`.
static SCENE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  (?:- |  )(enabled|path):\s?(.*)$").expect("valid regex")
});

/// A scene listed in the build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildScene {
    pub path: String,
    pub enabled: bool,
}

/// Parsed `TagManager.asset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagManager {
    /// User-defined tags, without the built-in ones.
    pub tags: Vec<String>,

    /// Layer names by index; unused slots are empty.
    pub layers: Vec<String>,
}

/// A Unity project on disk.
///
/// `TagManager.asset` is read at most once per value, so tags, layers and
/// layer indices of one run come from the same snapshot. Open a new project
/// to see later edits.
#[derive(Debug, Clone)]
pub struct UnityProject {
    root: PathBuf,
    assets_dir: PathBuf,
    settings_dir: PathBuf,
    respect_gitignore: bool,
    enabled_scenes_only: bool,
    tag_manager: OnceLock<TagManager>,
}

impl UnityProject {
    /// Open a project with the default `Assets` / `ProjectSettings` layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            assets_dir: PathBuf::from("Assets"),
            settings_dir: PathBuf::from("ProjectSettings"),
            respect_gitignore: false,
            enabled_scenes_only: false,
            tag_manager: OnceLock::new(),
        }
    }

    /// Open a project laid out as `config` describes.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root)
            .with_assets_dir(&config.project.assets_dir)
            .with_settings_dir(&config.project.settings_dir)
            .with_gitignore(config.resources.respect_gitignore)
            .with_enabled_scenes_only(config.scenes.enabled_only)
    }

    /// Use a different asset directory, relative to the project root.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Use a different settings directory, relative to the project root.
    pub fn with_settings_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings_dir = dir.into();
        self
    }

    /// Set whether `.gitignore` files prune directory walks.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Only list scenes that are enabled in the build settings.
    pub fn with_enabled_scenes_only(mut self, enabled_only: bool) -> Self {
        self.enabled_scenes_only = enabled_only;
        self
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fail early when the project root or asset directory is missing.
    pub fn verify(&self) -> HostResult<()> {
        let assets = self.asset_root();
        if !assets.is_dir() {
            return Err(HostError::missing(assets));
        }
        Ok(())
    }

    /// Directories and files whose changes affect the generated output.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        vec![self.asset_root(), self.root.join(&self.settings_dir)]
    }

    /// Read and parse `TagManager.asset`.
    pub fn tag_manager(&self) -> HostResult<TagManager> {
        self.cached_tag_manager().cloned()
    }

    /// Read and parse the scene list of `EditorBuildSettings.asset`.
    pub fn build_scenes(&self) -> HostResult<Vec<BuildScene>> {
        let path = self.settings_file(BUILD_SETTINGS);
        let content = read_settings(&path)?;
        Ok(parse_build_scenes(&content))
    }

    fn cached_tag_manager(&self) -> HostResult<&TagManager> {
        if let Some(manager) = self.tag_manager.get() {
            return Ok(manager);
        }
        let path = self.settings_file(TAG_MANAGER);
        let content = read_settings(&path)?;
        let manager =
            parse_tag_manager(&content).map_err(|message| HostError::invalid(path, message))?;
        debug!(layers = manager.layers.len(), tags = manager.tags.len(), "Read tag manager");
        Ok(self.tag_manager.get_or_init(|| manager))
    }

    fn settings_file(&self, name: &str) -> PathBuf {
        self.root.join(&self.settings_dir).join(name)
    }

    fn walker(&self, root: &Path) -> WalkBuilder {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .parents(self.respect_gitignore)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder
    }

    fn walk(&self, root: &Path, want_dirs: bool) -> HostResult<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in self.walker(root).build() {
            let entry = entry.map_err(|e| HostError::walk(root, e.to_string()))?;
            if entry.depth() == 0 {
                continue;
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if is_dir == want_dirs {
                paths.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), count = paths.len(), dirs = want_dirs, "Walked");
        Ok(paths)
    }
}

impl Host for UnityProject {
    fn list_tags(&self) -> HostResult<Vec<String>> {
        let manager = self.cached_tag_manager()?;
        let mut tags: Vec<String> = BUILTIN_TAGS.iter().map(|tag| tag.to_string()).collect();
        tags.extend(manager.tags.iter().filter(|tag| !tag.is_empty()).cloned());
        Ok(tags)
    }

    fn list_layers(&self) -> HostResult<Vec<String>> {
        Ok(self.cached_tag_manager()?.layers.clone())
    }

    fn layer_index_of(&self, name: &str) -> HostResult<Option<i32>> {
        Ok(self
            .cached_tag_manager()?
            .layers
            .iter()
            .position(|layer| !layer.is_empty() && layer == name)
            .and_then(|index| i32::try_from(index).ok()))
    }

    fn list_build_scenes(&self) -> HostResult<Vec<String>> {
        Ok(self
            .build_scenes()?
            .into_iter()
            .filter(|scene| scene.enabled || !self.enabled_scenes_only)
            .map(|scene| scene.path)
            .collect())
    }

    fn asset_root(&self) -> PathBuf {
        self.root.join(&self.assets_dir)
    }

    fn walk_directories(&self, root: &Path) -> HostResult<Vec<PathBuf>> {
        self.walk(root, true)
    }

    fn walk_files(&self, dir: &Path) -> HostResult<Vec<PathBuf>> {
        self.walk(dir, false)
    }
}

fn read_settings(path: &Path) -> HostResult<String> {
    if !path.is_file() {
        return Err(HostError::missing(path));
    }
    std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the tag and layer lists of a `TagManager.asset`.
pub fn parse_tag_manager(content: &str) -> Result<TagManager, String> {
    let mut manager = TagManager::default();
    let mut legacy_layers: Vec<(usize, String)> = Vec::new();
    let mut section: Option<String> = None;

    for line in content.lines() {
        if let Some(item) = ITEM_LINE.captures(line) {
            let value = unquote(&item[1]);
            match section.as_deref() {
                Some("tags") => manager.tags.push(value),
                Some("layers") => manager.layers.push(value),
                _ => {}
            }
            continue;
        }

        let Some(key) = KEY_LINE.captures(line) else {
            continue;
        };
        let name = &key[1];
        let value = key.get(2).map_or("", |v| v.as_str()).trim();

        if let Some(index) = LEGACY_LAYER.captures(name) {
            let index: usize = index[1]
                .parse()
                .map_err(|_| format!("invalid layer index in '{name}'"))?;
            if index >= MAX_LAYERS {
                return Err(format!("layer index {index} is out of range"));
            }
            legacy_layers.push((index, unquote(value)));
            section = None;
            continue;
        }

        section = if value.is_empty() {
            Some(name.to_string())
        } else {
            None
        };
    }

    if manager.layers.is_empty() && !legacy_layers.is_empty() {
        let len = legacy_layers.iter().map(|(index, _)| index + 1).max().unwrap_or(0);
        manager.layers = vec![String::new(); len];
        for (index, name) in legacy_layers {
            manager.layers[index] = name;
        }
    }

    if manager.layers.len() > MAX_LAYERS {
        return Err(format!(
            "{} layers listed, at most {MAX_LAYERS} are supported",
            manager.layers.len()
        ));
    }

    Ok(manager)
}

/// Parse the `m_Scenes` list of an `EditorBuildSettings.asset`.
pub fn parse_build_scenes(content: &str) -> Vec<BuildScene> {
    let mut scenes = Vec::new();
    let mut in_scenes = false;
    let mut current: Option<BuildScene> = None;

    for line in content.lines() {
        if let Some(key) = KEY_LINE.captures(line) {
            in_scenes = &key[1] == "m_Scenes";
            continue;
        }
        if !in_scenes {
            continue;
        }
        let Some(field) = SCENE_FIELD.captures(line) else {
            continue;
        };

        if line.starts_with("  - ") {
            scenes.extend(current.take());
            current = Some(BuildScene {
                path: String::new(),
                enabled: true,
            });
        }
        if let Some(scene) = current.as_mut() {
            let value = field[2].trim();
            match &field[1] {
                "enabled" => scene.enabled = value != "0",
                "path" => scene.path = unquote(value),
                _ => {}
            }
        }
    }
    scenes.extend(current);

    scenes.retain(|scene| !scene.path.is_empty());
    scenes
}

/// Strip YAML single or double quotes from a scalar.
fn unquote(value: &str) -> String {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        value[1..value.len() - 1].replace("''", "'")
    } else if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].replace("\\\"", "\"")
    } else {
        value.to_string()
    }
}
