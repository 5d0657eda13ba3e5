//! Resource discovery and deduplication.
//!
//! Resource roots are directories named after the configured marker
//! (`Resources` by default). Every file below a root becomes a
//! [`ResourceEntry`] whose value is its path relative to the nearest marker
//! ancestor with the extension stripped, which is exactly the key a runtime
//! resource lookup expects.
//!
//! Two files with the same normalized name cannot both become constants: the
//! first one found wins and every later one is reported as a collision.

use crate::diagnostics::Diagnostic;
use crate::error::GenerateResult;
use crate::host::Host;
use crate::model::Member;
use crate::settings::ResourceFilter;
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A resource file found below a marker directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// File name without extension; source of the identifier.
    pub name: String,

    /// Lookup path relative to the marker directory, without extension.
    pub relative_path: String,
}

impl ResourceEntry {
    /// Build an entry for `file`, relative to its nearest ancestor named `marker`.
    ///
    /// Returns `None` when no ancestor carries the marker name or the path
    /// is not valid UTF-8.
    pub fn from_path(file: &Path, marker: &str) -> Option<Self> {
        let components: Vec<&str> = file
            .components()
            .map(|component| match component {
                Component::Normal(part) => part.to_str(),
                _ => Some(""),
            })
            .collect::<Option<_>>()?;

        let (last, dirs) = components.split_last()?;
        let marker_pos = dirs.iter().rposition(|dir| *dir == marker)?;

        let name = file_stem(last).to_string();
        let mut segments: Vec<&str> = dirs[marker_pos + 1..].to_vec();
        segments.push(&name);

        Some(Self {
            relative_path: segments.join("/"),
            name,
        })
    }
}

/// Result of walking every resource root.
#[derive(Debug, Default)]
pub struct ResourceScan {
    /// Entries in discovery order, duplicates included.
    pub entries: Vec<ResourceEntry>,

    /// Roots skipped because of the ignore list.
    pub diagnostics: Vec<Diagnostic>,
}

/// Constants that survived deduplication.
#[derive(Debug, Default)]
pub struct Deduplicated {
    /// One member per distinct identifier, first discovery wins.
    pub members: Vec<Member>,

    /// One collision per dropped entry.
    pub diagnostics: Vec<Diagnostic>,
}

/// Find resource roots below the host's asset root, in walk order.
///
/// Returns the roots to traverse; ignored roots are reported instead.
pub fn discover_roots(
    host: &dyn Host,
    filter: &ResourceFilter,
) -> GenerateResult<(Vec<PathBuf>, Vec<Diagnostic>)> {
    let asset_root = host.asset_root();
    let mut roots = Vec::new();
    let mut diagnostics = Vec::new();

    for dir in host.walk_directories(&asset_root)? {
        if dir.file_name().and_then(|name| name.to_str()) != Some(filter.marker.as_str()) {
            continue;
        }

        let shown = display_path(dir.strip_prefix(&asset_root).unwrap_or(&dir));
        if let Some(pattern) = filter.ignored_by(&shown) {
            warn!(root = %shown, pattern, "Skipping ignored resource folder");
            diagnostics.push(Diagnostic::IgnoredRoot {
                root: PathBuf::from(shown),
                pattern: pattern.to_string(),
            });
            continue;
        }

        debug!(root = %shown, "Found resource folder");
        roots.push(dir);
    }

    Ok((roots, diagnostics))
}

/// Walk every kept root and collect its files as resource entries.
pub fn scan_resources(host: &dyn Host, filter: &ResourceFilter) -> GenerateResult<ResourceScan> {
    let (roots, diagnostics) = discover_roots(host, filter)?;
    let mut entries = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();

    for root in &roots {
        for file in host.walk_files(root)? {
            // Nested roots are walked by their parent root as well.
            if !visited.insert(file.clone()) {
                continue;
            }
            let Some(file_name) = file.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if filter.is_sidecar(file_name) {
                continue;
            }
            if let Some(entry) = ResourceEntry::from_path(&file, &filter.marker) {
                entries.push(entry);
            }
        }
    }

    debug!(
        roots = roots.len(),
        entries = entries.len(),
        "Scanned resource folders"
    );

    Ok(ResourceScan {
        entries,
        diagnostics,
    })
}

/// Turn entries into constants, dropping every entry whose identifier was
/// already taken.
pub fn deduplicate(entries: &[ResourceEntry]) -> GenerateResult<Deduplicated> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut result = Deduplicated::default();

    for entry in entries {
        let member = Member::string(&entry.name, entry.relative_path.as_str())?;

        if let Some(kept) = seen.get(&member.identifier) {
            warn!(
                identifier = %member.identifier,
                skipped = %entry.relative_path,
                "Multiple resources share a name"
            );
            result.diagnostics.push(Diagnostic::Collision {
                identifier: member.identifier,
                kept: kept.to_string(),
                skipped: entry.relative_path.clone(),
            });
            continue;
        }

        seen.insert(member.identifier.clone(), &entry.relative_path);
        result.members.push(member);
    }

    Ok(result)
}

/// File name without its final extension. Dotfiles keep their full name.
fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    }
}

fn display_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
