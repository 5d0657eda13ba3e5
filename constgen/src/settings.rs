//! Generator settings.
//!
//! Defaults reproduce the classic layout: namespace `k`, one file per class
//! (`Tags.cs`, `Layers.cs`, `Scenes.cs`, `Resources.cs`) and resource
//! folders named `Resources`.

use crate::model::ClassKind;
use serde::Deserialize;

/// Everything the generator needs besides the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Namespace wrapping every generated class.
    pub namespace: String,

    /// Output file name per class.
    pub files: ClassFiles,

    /// Which classes to generate.
    pub classes: ClassSelection,

    /// Resource folder discovery rules.
    pub resources: ResourceFilter,
}

/// Output file names, one per class. The class name is the file name
/// without `.cs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFiles {
    pub tags: String,
    pub layers: String,
    pub scenes: String,
    pub resources: String,
}

/// Toggle for each generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassSelection {
    pub tags: bool,
    pub layers: bool,
    pub scenes: bool,
    pub resources: bool,
}

/// Rules for finding resource folders and the files inside them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceFilter {
    /// Exact directory name that marks a resource root.
    pub marker: String,

    /// Roots whose path contains any of these substrings are skipped.
    pub ignore: Vec<String>,

    /// Files ending with any of these suffixes are not resources.
    pub skip_suffixes: Vec<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            namespace: "k".to_string(),
            files: ClassFiles::default(),
            classes: ClassSelection::default(),
            resources: ResourceFilter::default(),
        }
    }
}

impl Default for ClassFiles {
    fn default() -> Self {
        Self {
            tags: "Tags.cs".to_string(),
            layers: "Layers.cs".to_string(),
            scenes: "Scenes.cs".to_string(),
            resources: "Resources.cs".to_string(),
        }
    }
}

impl Default for ClassSelection {
    fn default() -> Self {
        Self {
            tags: true,
            layers: true,
            scenes: true,
            resources: true,
        }
    }
}

impl Default for ResourceFilter {
    fn default() -> Self {
        Self {
            marker: "Resources".to_string(),
            ignore: vec!["ProCore".to_string(), "2DToolkit".to_string()],
            skip_suffixes: vec![".meta".to_string(), ".db".to_string(), ".DS_Store".to_string()],
        }
    }
}

impl ClassFiles {
    /// Output file name for a class.
    pub fn file_for(&self, kind: ClassKind) -> &str {
        match kind {
            ClassKind::Tags => &self.tags,
            ClassKind::Layers => &self.layers,
            ClassKind::Scenes => &self.scenes,
            ClassKind::Resources => &self.resources,
        }
    }
}

impl ClassSelection {
    /// Whether a class is generated.
    pub fn is_enabled(&self, kind: ClassKind) -> bool {
        match kind {
            ClassKind::Tags => self.tags,
            ClassKind::Layers => self.layers,
            ClassKind::Scenes => self.scenes,
            ClassKind::Resources => self.resources,
        }
    }
}

impl ResourceFilter {
    /// First ignore pattern contained in `path`, if any.
    pub fn ignored_by(&self, path: &str) -> Option<&str> {
        self.ignore
            .iter()
            .find(|pattern| !pattern.is_empty() && path.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Whether a file name is a sidecar rather than a resource.
    pub fn is_sidecar(&self, file_name: &str) -> bool {
        self.skip_suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.namespace, "k");
        assert_eq!(settings.files.file_for(ClassKind::Tags), "Tags.cs");
        assert_eq!(settings.files.file_for(ClassKind::Resources), "Resources.cs");
        assert!(ClassKind::ALL.iter().all(|kind| settings.classes.is_enabled(*kind)));
        assert_eq!(settings.resources.marker, "Resources");
    }

    #[test]
    fn test_ignored_by() {
        let filter = ResourceFilter::default();
        assert_eq!(filter.ignored_by("Plugins/ProCore/Resources"), Some("ProCore"));
        assert_eq!(filter.ignored_by("Art/Resources"), None);
    }

    #[test]
    fn test_empty_ignore_pattern_matches_nothing() {
        let filter = ResourceFilter {
            ignore: vec![String::new()],
            ..Default::default()
        };
        assert_eq!(filter.ignored_by("Resources"), None);
    }

    #[test]
    fn test_is_sidecar() {
        let filter = ResourceFilter::default();
        assert!(filter.is_sidecar("Goblin.prefab.meta"));
        assert!(filter.is_sidecar("Thumbs.db"));
        assert!(filter.is_sidecar(".DS_Store"));
        assert!(!filter.is_sidecar("Goblin.prefab"));
    }
}
