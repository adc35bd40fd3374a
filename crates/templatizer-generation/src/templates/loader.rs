//! Template set loading from descriptor files
//!
//! A template set is described by a JSON `*.templatizer` file. `Render`
//! sources are resolved relative to the directory holding the descriptor.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    error::{GenerationError, Result},
    models::{TemplateDescriptor, TemplateSet},
    templates::catalog::validate_token_name,
};

/// File extension of template set descriptors
pub const DESCRIPTOR_EXTENSION: &str = "templatizer";

/// Loads template set descriptors from files and directories
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load one descriptor file
    ///
    /// # Arguments
    /// * `path` - Path to a `.templatizer` descriptor
    ///
    /// # Returns
    /// The template set, with its directory set to the descriptor's parent
    pub fn load_from_file(path: &Path) -> Result<TemplateSet> {
        let content = fs::read_to_string(path)?;
        let set = Self::parse(&content, path)?;
        debug!(template = %set.name(), path = %path.display(), "loaded template set");
        Ok(set)
    }

    /// Parse descriptor text as if it had been read from `path`
    pub fn parse(content: &str, path: &Path) -> Result<TemplateSet> {
        let invalid = |message: String| GenerationError::InvalidDescriptor {
            path: path.display().to_string(),
            message,
        };

        let descriptor: TemplateDescriptor =
            serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;

        if descriptor.name.trim().is_empty() {
            return Err(invalid("`name` must not be empty".to_string()));
        }
        for name in descriptor.tokens.keys().chain(descriptor.constants.keys()) {
            validate_token_name(name).map_err(|e| invalid(e.to_string()))?;
        }

        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(TemplateSet {
            descriptor,
            directory,
        })
    }

    /// Load every descriptor directly inside `dir`
    ///
    /// A missing directory yields no sets. Descriptors that fail to load are
    /// logged and skipped so one broken file does not hide the others.
    pub fn load_from_directory(dir: &Path) -> Result<Vec<TemplateSet>> {
        if !dir.is_dir() {
            debug!(path = %dir.display(), "template directory does not exist");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_descriptor(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut sets = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::load_from_file(&path) {
                Ok(set) => sets.push(set),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping template descriptor"),
            }
        }

        Ok(sets)
    }
}

/// Whether `path` has the descriptor extension
pub fn is_descriptor(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(DESCRIPTOR_EXTENSION)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::Action;

    const DESCRIPTOR: &str = r#"{
        "name": "test",
        "description": "C++ test header",
        "constants": { "AUTHOR": "John Doe" },
        "actions": [
            { "render": { "source": "test.hpp", "target": "%NAME-LOWCASE%_test.hpp" } }
        ]
    }"#;

    #[test]
    fn test_parse_sets_directory() {
        let set = TemplateLoader::parse(DESCRIPTOR, Path::new("/opt/templates/test.templatizer"))
            .unwrap();
        assert_eq!(set.name(), "test");
        assert_eq!(set.directory, PathBuf::from("/opt/templates"));
        assert_eq!(
            set.descriptor.actions,
            vec![Action::Render {
                source: "test.hpp".to_string(),
                target: "%NAME-LOWCASE%_test.hpp".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_missing_actions_is_invalid() {
        let err = TemplateLoader::parse(r#"{ "name": "x" }"#, Path::new("x.templatizer"))
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_token_names() {
        let json = r#"{ "name": "x", "constants": { "author": "me" }, "actions": [] }"#;
        let err = TemplateLoader::parse(json, Path::new("x.templatizer")).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_parse_rejects_blank_name() {
        let json = r#"{ "name": " ", "actions": [] }"#;
        assert!(TemplateLoader::parse(json, Path::new("x.templatizer")).is_err());
    }

    #[test]
    fn test_load_from_directory_skips_broken_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("test.templatizer"), DESCRIPTOR).unwrap();
        fs::write(dir.path().join("broken.templatizer"), "{ not json").unwrap();
        fs::write(dir.path().join("test.hpp"), "%NAME%").unwrap();

        let sets = TemplateLoader::load_from_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name(), "test");
        assert_eq!(sets[0].directory, dir.path());
    }

    #[test]
    fn test_load_from_missing_directory() {
        let dir = TempDir::new().unwrap();
        let sets = TemplateLoader::load_from_directory(&dir.path().join("nope")).unwrap();
        assert!(sets.is_empty());
    }
}
