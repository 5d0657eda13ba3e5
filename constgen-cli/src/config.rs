//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `constgen.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use constgen::settings::{ClassFiles, ClassSelection, GeneratorSettings, ResourceFilter};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "constgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project layout.
    pub project: ProjectConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Which classes to generate.
    pub classes: ClassSelection,

    /// Resource folder discovery.
    pub resources: ResourcesConfig,

    /// Build scene selection.
    pub scenes: ScenesConfig,
}

/// Project layout, relative to the project root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Asset directory; resource folders are searched below it.
    pub assets_dir: PathBuf,

    /// Directory holding `TagManager.asset` and `EditorBuildSettings.asset`.
    pub settings_dir: PathBuf,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the asset directory.
    pub dir: PathBuf,

    /// Namespace of the generated classes.
    pub namespace: String,

    /// File name of the tags class.
    pub tags_file: String,

    /// File name of the layers class.
    pub layers_file: String,

    /// File name of the scenes class.
    pub scenes_file: String,

    /// File name of the resource paths class.
    pub resources_file: String,
}

/// Resource folder configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Marker name, ignore list and sidecar suffixes.
    #[serde(flatten)]
    pub filter: ResourceFilter,

    /// Whether `.gitignore` files prune the resource walk.
    pub respect_gitignore: bool,
}

/// Build scene configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenesConfig {
    /// Only emit scenes that are enabled in the build settings.
    pub enabled_only: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("Assets"),
            settings_dir: PathBuf::from("ProjectSettings"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        let files = ClassFiles::default();
        Self {
            dir: PathBuf::from("scripts/auto-generated"),
            namespace: GeneratorSettings::default().namespace,
            tags_file: files.tags,
            layers_file: files.layers,
            scenes_file: files.scenes,
            resources_file: files.resources,
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            filter: ResourceFilter::default(),
            respect_gitignore: false,
        }
    }
}

impl Config {
    /// Settings for the generator core.
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            namespace: self.output.namespace.clone(),
            files: ClassFiles {
                tags: self.output.tags_file.clone(),
                layers: self.output.layers_file.clone(),
                scenes: self.output.scenes_file.clone(),
                resources: self.output.resources_file.clone(),
            },
            classes: self.classes,
            resources: self.resources.filter.clone(),
        }
    }

    /// Output directory for a project rooted at `project_root`.
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        project_root
            .join(&self.project.assets_dir)
            .join(&self.output.dir)
    }

    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> CliResult<()> {
        if self.output.namespace.trim().is_empty() {
            return Err(ConfigError::invalid_value("output.namespace", "must not be empty").into());
        }
        if self.resources.filter.marker.is_empty() {
            return Err(ConfigError::invalid_value("resources.marker", "must not be empty").into());
        }

        let files = [
            ("output.tags_file", &self.output.tags_file),
            ("output.layers_file", &self.output.layers_file),
            ("output.scenes_file", &self.output.scenes_file),
            ("output.resources_file", &self.output.resources_file),
        ];
        for (key, file) in files {
            if file.is_empty() || file.contains(['/', '\\']) {
                return Err(ConfigError::invalid_value(key, "must be a plain file name").into());
            }
        }
        for (i, (key, file)) in files.iter().enumerate() {
            if files[..i].iter().any(|(_, other)| other == file) {
                return Err(ConfigError::invalid_value(*key, format!("'{file}' is used twice")).into());
            }
        }

        Ok(())
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist. Without one, `constgen.toml` in the
    /// project root is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>, project_root: &Path) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => project_root.join(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref namespace) = args.namespace {
            config.output.namespace = namespace.clone();
        }

        if let Some(ref assets_dir) = args.assets_dir {
            config.project.assets_dir = assets_dir.clone();
        }

        if let Some(enabled_only) = args.enabled_scenes_only {
            config.scenes.enabled_only = enabled_only;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# constgen configuration file

[project]
# Asset directory, relative to the project root
assets_dir = "Assets"

# Directory holding TagManager.asset and EditorBuildSettings.asset
settings_dir = "ProjectSettings"

[output]
# Output directory, relative to the asset directory
dir = "scripts/auto-generated"

# Namespace of the generated classes
namespace = "k"

# One file per class; the class is named after the file
tags_file = "Tags.cs"
layers_file = "Layers.cs"
scenes_file = "Scenes.cs"
resources_file = "Resources.cs"

[classes]
tags = true
layers = true
scenes = true
resources = true

[resources]
# Directories with exactly this name are resource roots
marker = "Resources"

# Resource roots whose path contains any of these are skipped
ignore = ["ProCore", "2DToolkit"]

# Files ending with any of these are not resources
skip_suffixes = [".meta", ".db", ".DS_Store"]

# Let .gitignore files prune the resource walk
respect_gitignore = false

[scenes]
# Only emit scenes that are enabled in the build settings
enabled_only = false
"#
    }
}

/// Write the default configuration to `path`, refusing to replace an
/// existing file unless `force` is set.
pub fn write_default_config(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(ConfigError::already_exists(path.to_path_buf()).into());
    }
    std::fs::write(path, ConfigManager::default_config_content())?;
    Ok(())
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Namespace override.
    pub namespace: Option<String>,

    /// Asset directory override.
    pub assets_dir: Option<PathBuf>,

    /// Enabled-scenes-only override.
    pub enabled_scenes_only: Option<bool>,
}
