/// Framebuffer definition loader.
///
/// Reads definitions from a namespaced directory tree:
///
/// ```text
/// <root>/<namespace>/framebuffers/<path>.json  ->  <namespace>:<path>
/// ```
///
/// Files that cannot be read or decoded are logged and skipped, so the
/// returned set only ever contains well-formed definitions. The result is
/// meant to be handed to
/// [`FramebufferRegistry::on_definitions_reloaded`](super::FramebufferRegistry::on_definitions_reloaded).

use std::fs;
use std::path::Path;
use rustc_hash::FxHashMap;
use walkdir::WalkDir;
use crate::error::{Error, Result};
use crate::resource::ResourceName;
use super::definition::FramebufferDefinition;

/// Directory under each namespace that holds framebuffer definitions
pub const FRAMEBUFFER_DIRECTORY: &str = "framebuffers";

const DEFINITION_EXTENSION: &str = "json";

const LOG_SOURCE: &str = "galaxy3d::DefinitionStore";

/// Decoded definitions keyed by name
pub type DefinitionSet = FxHashMap<ResourceName, FramebufferDefinition>;

/// Loader for JSON framebuffer definitions
pub struct DefinitionStore;

impl DefinitionStore {
    /// Load every definition below `root`
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if `root` itself cannot be read. Problems with
    /// individual namespaces or files are logged and skipped.
    pub fn load(root: &Path) -> Result<DefinitionSet> {
        let mut definitions = DefinitionSet::default();

        for entry in fs::read_dir(root)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    crate::engine_warn!(LOG_SOURCE, "Skipping unreadable entry in {}: {}", root.display(), err);
                    continue;
                }
            };

            let directory = entry.path().join(FRAMEBUFFER_DIRECTORY);
            if !directory.is_dir() {
                continue;
            }

            let namespace = entry.file_name().to_string_lossy().into_owned();
            Self::load_namespace(&namespace, &directory, &mut definitions);
        }

        crate::engine_debug!(LOG_SOURCE, "Decoded {} framebuffer definitions from {}",
            definitions.len(), root.display());
        Ok(definitions)
    }

    fn load_namespace(namespace: &str, directory: &Path, definitions: &mut DefinitionSet) {
        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    crate::engine_warn!(LOG_SOURCE, "Skipping unreadable path in {}: {}", directory.display(), err);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(DEFINITION_EXTENSION)
            {
                continue;
            }

            match Self::load_file(namespace, directory, path) {
                Ok((name, definition)) => {
                    definitions.insert(name, definition);
                }
                Err(err) => {
                    crate::engine_warn!(LOG_SOURCE, "Couldn't parse framebuffer definition {}: {}",
                        path.display(), err);
                }
            }
        }
    }

    fn load_file(
        namespace: &str,
        directory: &Path,
        path: &Path,
    ) -> Result<(ResourceName, FramebufferDefinition)> {
        let relative = path
            .strip_prefix(directory)
            .map_err(|err| Error::Io(err.to_string()))?
            .with_extension("");
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let name = ResourceName::new(namespace, &relative)?;
        let json = fs::read_to_string(path)?;
        let definition = Self::parse(&name, &json)?;
        Ok((name, definition))
    }

    /// Decode a single JSON definition
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDefinition` naming `name` if the document is
    /// not a valid definition.
    pub fn parse(name: &ResourceName, json: &str) -> Result<FramebufferDefinition> {
        serde_json::from_str(json)
            .map_err(|err| Error::InvalidDefinition(format!("{}: {}", name, err)))
    }
}

#[cfg(test)]
#[path = "definition_store_tests.rs"]
mod tests;
