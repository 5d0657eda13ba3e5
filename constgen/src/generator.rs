//! One-shot generation of every constants class.
//!
//! Each class is built independently: a host failure or a malformed name
//! only costs the class it occurs in, and the remaining classes are still
//! rendered and written. Writing is delegated to an [`OutputSink`]; a write
//! failure aborts the run.

use crate::diagnostics::Diagnostic;
use crate::emitter::render;
use crate::error::{GenerateError, GenerateResult};
use crate::host::{Host, scene_name};
use crate::model::{ClassKind, GeneratedClass, Member, class_name_for};
use crate::resources::{deduplicate, scan_resources};
use crate::settings::GeneratorSettings;
use tracing::{debug, info, warn};

/// Destination for rendered files.
pub trait OutputSink {
    /// Error raised when a file cannot be written.
    type Error;

    /// Write one generated file, replacing any previous content.
    fn write(&mut self, file_name: &str, content: &str) -> Result<(), Self::Error>;

    /// Tell the host a file changed. Called once per written file after all
    /// writes succeeded.
    fn reimport(&mut self, _file_name: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A rendered class and where it goes.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub kind: ClassKind,
    pub file_name: String,
    pub class: GeneratedClass,
    pub content: String,
}

/// A class that could not be generated.
#[derive(Debug)]
pub struct ClassFailure {
    pub kind: ClassKind,
    pub file_name: String,
    pub error: GenerateError,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Successfully rendered classes, in generation order.
    pub files: Vec<GeneratedFile>,

    /// Classes that failed; the others are unaffected.
    pub failures: Vec<ClassFailure>,

    /// Warnings collected along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Whether every enabled class was generated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Look up a rendered file by class.
    pub fn file(&self, kind: ClassKind) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.kind == kind)
    }
}

/// Builds, renders and writes the constants classes.
#[derive(Debug, Clone, Default)]
pub struct ConstantsGenerator {
    settings: GeneratorSettings,
}

impl ConstantsGenerator {
    /// Create a generator with the given settings.
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// The settings in use.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Build and render every enabled class without writing anything.
    pub fn generate(&self, host: &dyn Host) -> GenerationReport {
        let mut report = GenerationReport::default();

        for kind in ClassKind::ALL {
            if !self.settings.classes.is_enabled(kind) {
                debug!(class = kind.as_str(), "Class disabled, skipping");
                continue;
            }

            let file_name = self.settings.files.file_for(kind).to_string();
            match self.build_class(host, kind) {
                Ok((class, diagnostics)) => {
                    debug!(
                        class = kind.as_str(),
                        members = class.members.len(),
                        "Built class"
                    );
                    report.diagnostics.extend(diagnostics);
                    report.files.push(GeneratedFile {
                        kind,
                        content: render(&class),
                        file_name,
                        class,
                    });
                }
                Err(error) => {
                    warn!(class = kind.as_str(), %error, "Class generation failed");
                    report.failures.push(ClassFailure {
                        kind,
                        file_name,
                        error,
                    });
                }
            }
        }

        report
    }

    /// Generate every class and write the successful ones to `sink`.
    ///
    /// Class failures are part of the returned report; only sink errors
    /// are returned as `Err`.
    pub fn run<S: OutputSink>(
        &self,
        host: &dyn Host,
        sink: &mut S,
    ) -> Result<GenerationReport, S::Error> {
        let report = self.generate(host);

        for file in &report.files {
            sink.write(&file.file_name, &file.content)?;
            info!(file = %file.file_name, "Wrote constants class");
        }
        for file in &report.files {
            sink.reimport(&file.file_name)?;
        }

        Ok(report)
    }

    /// Build the class for `kind` along with any warnings raised on the way.
    pub fn build_class(
        &self,
        host: &dyn Host,
        kind: ClassKind,
    ) -> GenerateResult<(GeneratedClass, Vec<Diagnostic>)> {
        let class = GeneratedClass::new(
            class_name_for(self.settings.files.file_for(kind)),
            self.settings.namespace.as_str(),
            kind,
        );

        match kind {
            ClassKind::Tags => Ok((class.with_members(tag_members(host)?), Vec::new())),
            ClassKind::Layers => Ok((class.with_members(layer_members(host)?), Vec::new())),
            ClassKind::Scenes => Ok((class.with_members(scene_members(host)?), Vec::new())),
            ClassKind::Resources => {
                let scan = scan_resources(host, &self.settings.resources)?;
                let deduplicated = deduplicate(&scan.entries)?;

                let mut diagnostics = scan.diagnostics;
                diagnostics.extend(deduplicated.diagnostics);
                Ok((class.with_members(deduplicated.members), diagnostics))
            }
        }
    }
}

fn tag_members(host: &dyn Host) -> GenerateResult<Vec<Member>> {
    host.list_tags()?
        .iter()
        .map(|tag| Member::named(tag))
        .collect()
}

fn layer_members(host: &dyn Host) -> GenerateResult<Vec<Member>> {
    let mut members = Vec::new();
    for name in host.list_layers()? {
        if name.is_empty() {
            continue;
        }
        let index = host
            .layer_index_of(&name)?
            .ok_or_else(|| GenerateError::UnknownLayer { name: name.clone() })?;
        members.push(Member::int(&name, index)?);
    }
    Ok(members)
}

fn scene_members(host: &dyn Host) -> GenerateResult<Vec<Member>> {
    host.list_build_scenes()?
        .iter()
        .map(|path| Member::named(scene_name(path)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::HostResult;
    use crate::model::ConstantValue;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    struct FixtureHost {
        tags: Vec<&'static str>,
        layers: Vec<&'static str>,
        scenes: Vec<&'static str>,
        broken_walk: bool,
    }

    impl Host for FixtureHost {
        fn list_tags(&self) -> HostResult<Vec<String>> {
            Ok(self.tags.iter().map(|s| s.to_string()).collect())
        }

        fn list_layers(&self) -> HostResult<Vec<String>> {
            Ok(self.layers.iter().map(|s| s.to_string()).collect())
        }

        fn list_build_scenes(&self) -> HostResult<Vec<String>> {
            Ok(self.scenes.iter().map(|s| s.to_string()).collect())
        }

        fn asset_root(&self) -> PathBuf {
            PathBuf::from("Assets")
        }

        fn walk_directories(&self, root: &Path) -> HostResult<Vec<PathBuf>> {
            if self.broken_walk {
                return Err(HostError::walk(root, "permission denied"));
            }
            Ok(Vec::new())
        }

        fn walk_files(&self, _dir: &Path) -> HostResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        written: Vec<(String, String)>,
        reimported: Vec<String>,
    }

    impl OutputSink for MemorySink {
        type Error = std::convert::Infallible;

        fn write(&mut self, file_name: &str, content: &str) -> Result<(), Self::Error> {
            self.written.push((file_name.to_string(), content.to_string()));
            Ok(())
        }

        fn reimport(&mut self, file_name: &str) -> Result<(), Self::Error> {
            self.reimported.push(file_name.to_string());
            Ok(())
        }
    }

    /// Sink whose disk fills up after `capacity` files.
    struct FullDiskSink {
        capacity: usize,
        written: Vec<String>,
        reimported: Vec<String>,
    }

    impl OutputSink for FullDiskSink {
        type Error = String;

        fn write(&mut self, file_name: &str, _content: &str) -> Result<(), Self::Error> {
            if self.written.len() == self.capacity {
                return Err(format!("no space left for {file_name}"));
            }
            self.written.push(file_name.to_string());
            Ok(())
        }

        fn reimport(&mut self, file_name: &str) -> Result<(), Self::Error> {
            self.reimported.push(file_name.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_scenes_class_members() {
        let host = FixtureHost {
            scenes: vec!["Assets/Scenes/Level1.unity", "Assets/Scenes/Main Menu.unity"],
            ..Default::default()
        };
        let generator = ConstantsGenerator::default();

        let (class, _) = generator.build_class(&host, ClassKind::Scenes).unwrap();

        assert_eq!(class.class_name, "Scenes");
        assert_eq!(
            class.members,
            vec![
                Member {
                    identifier: "LEVEL1".to_string(),
                    value: ConstantValue::Str("Level1".to_string()),
                },
                Member {
                    identifier: "MAIN_MENU".to_string(),
                    value: ConstantValue::Str("Main Menu".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_layers_skip_empty_slots() {
        let host = FixtureHost {
            layers: vec!["Default", "TransparentFX", "Ignore Raycast", "", "Water"],
            ..Default::default()
        };
        let generator = ConstantsGenerator::default();

        let (class, _) = generator.build_class(&host, ClassKind::Layers).unwrap();

        let members: Vec<_> = class
            .members
            .iter()
            .map(|m| (m.identifier.as_str(), m.value.clone()))
            .collect();
        assert_eq!(
            members,
            vec![
                ("DEFAULT", ConstantValue::Int(0)),
                ("TRANSPARENT_FX", ConstantValue::Int(1)),
                ("IGNORE_RAYCAST", ConstantValue::Int(2)),
                ("WATER", ConstantValue::Int(4)),
            ]
        );
    }

    #[test]
    fn test_malformed_tag_fails_only_tags() {
        let host = FixtureHost {
            tags: vec!["Player", ""],
            scenes: vec!["Assets/Boot.unity"],
            ..Default::default()
        };

        let report = ConstantsGenerator::default().generate(&host);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, ClassKind::Tags);
        assert!(matches!(
            report.failures[0].error,
            GenerateError::MalformedName { .. }
        ));
        assert!(report.file(ClassKind::Scenes).is_some());
        assert!(report.file(ClassKind::Layers).is_some());
        assert!(report.file(ClassKind::Resources).is_some());
    }

    #[test]
    fn test_run_writes_surviving_classes_then_reimports() {
        let host = FixtureHost {
            tags: vec!["Player"],
            layers: vec!["Default"],
            scenes: vec!["Assets/Boot.unity"],
            broken_walk: true,
        };
        let mut sink = MemorySink::default();

        let report = ConstantsGenerator::default().run(&host, &mut sink).unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.failures[0].kind, ClassKind::Resources);
        let names: Vec<_> = sink.written.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Tags.cs", "Layers.cs", "Scenes.cs"]);
        assert_eq!(sink.reimported, vec!["Tags.cs", "Layers.cs", "Scenes.cs"]);
    }

    #[test]
    fn test_write_error_aborts_run() {
        let host = FixtureHost {
            tags: vec!["Player"],
            layers: vec!["Default"],
            scenes: vec!["Assets/Boot.unity"],
            ..Default::default()
        };
        let mut sink = FullDiskSink {
            capacity: 1,
            written: Vec::new(),
            reimported: Vec::new(),
        };

        let result = ConstantsGenerator::default().run(&host, &mut sink);

        assert_eq!(result.unwrap_err(), "no space left for Layers.cs");
        assert_eq!(sink.written, vec!["Tags.cs"]);
        assert!(sink.reimported.is_empty());
    }

    #[test]
    fn test_disabled_classes_are_skipped() {
        let mut settings = GeneratorSettings::default();
        settings.classes.resources = false;
        settings.classes.layers = false;

        let report = ConstantsGenerator::new(settings).generate(&FixtureHost::default());

        let kinds: Vec<_> = report.files.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![ClassKind::Tags, ClassKind::Scenes]);
    }

    #[test]
    fn test_custom_namespace_and_file_name() {
        let mut settings = GeneratorSettings::default();
        settings.namespace = "Game.Constants".to_string();
        settings.files.tags = "GameTags.cs".to_string();

        let host = FixtureHost {
            tags: vec!["Player"],
            ..Default::default()
        };
        let report = ConstantsGenerator::new(settings).generate(&host);
        let tags = report.file(ClassKind::Tags).unwrap();

        assert_eq!(tags.file_name, "GameTags.cs");
        assert!(tags.content.contains("namespace Game.Constants\n"));
        assert!(tags.content.contains("public static class GameTags\n"));
    }
}
