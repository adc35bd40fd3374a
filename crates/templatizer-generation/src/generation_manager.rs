//! Template set registry and generation planning
//!
//! Planning resolves the catalog, reads every template source and renders
//! all text before returning, so a plan either comes back complete or not at
//! all. Executing the plan (writing files, running commands) is left to the
//! caller.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    error::{GenerationError, Result},
    models::{Action, BaseInputs, GenerationPlan, PlannedAction, TemplateSet},
    templates::{catalog::TokenCatalog, engine::TemplateEngine, loader::TemplateLoader},
};

/// Template sets by name
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    sets: BTreeMap<String, TemplateSet>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template set
    pub fn add(&mut self, set: TemplateSet) -> Result<()> {
        let name = set.name().to_string();
        if self.sets.contains_key(&name) {
            return Err(GenerationError::DuplicateTemplate(name));
        }
        self.sets.insert(name, set);
        Ok(())
    }

    /// Look up a template set by name
    pub fn find(&self, name: &str) -> Result<&TemplateSet> {
        self.sets
            .get(name)
            .ok_or_else(|| GenerationError::TemplateNotFound(name.to_string()))
    }

    /// Register every descriptor in `dir`, returning how many were added
    pub fn load_directory(&mut self, dir: &Path) -> Result<usize> {
        let sets = TemplateLoader::load_from_directory(dir)?;
        let count = sets.len();
        for set in sets {
            self.add(set)?;
        }
        debug!(path = %dir.display(), count, "registered template sets");
        Ok(count)
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Registered sets, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &TemplateSet> {
        self.sets.values()
    }

    /// Number of registered sets
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no sets are registered
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Plans generation runs against a registry
pub struct GenerationManager {
    registry: TemplateRegistry,
    base: TokenCatalog,
}

impl GenerationManager {
    /// Create a manager over a populated registry
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            base: TokenCatalog::new(),
        }
    }

    /// Use `base` instead of the default vocabulary under every descriptor
    pub fn with_base_catalog(mut self, base: TokenCatalog) -> Self {
        self.base = base;
        self
    }

    /// The underlying registry
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Plan the named template set
    pub fn plan(&self, name: &str, inputs: &BaseInputs) -> Result<GenerationPlan> {
        let set = self.registry.find(name)?;
        plan_set_with(set, inputs, &self.base)
    }
}

/// Plan one template set over the default vocabulary
///
/// `TPLDIR` defaults to the set's directory when the inputs leave it unset.
pub fn plan_set(set: &TemplateSet, inputs: &BaseInputs) -> Result<GenerationPlan> {
    plan_set_with(set, inputs, &TokenCatalog::new())
}

/// Plan one template set over `base`
pub fn plan_set_with(
    set: &TemplateSet,
    inputs: &BaseInputs,
    base: &TokenCatalog,
) -> Result<GenerationPlan> {
    let descriptor = &set.descriptor;
    descriptor.check_arguments(inputs)?;

    let mut inputs = inputs.clone();
    if inputs.template_dir.is_none() {
        inputs.template_dir = Some(set.directory.clone());
    }

    let catalog = descriptor.catalog_over(base.clone())?.resolve(&inputs)?;
    let engine = TemplateEngine::new(catalog);

    let jobs = read_jobs(set)?;
    let rendered: Vec<(PlannedAction, Vec<String>)> = jobs
        .into_par_iter()
        .map(|job| job.render(&engine))
        .collect();

    let mut plan = GenerationPlan {
        template: descriptor.name.clone(),
        ..Default::default()
    };
    for (action, unknown) in rendered {
        merge_unknown(&mut plan.unknown_markers, &unknown);
        plan.actions.push(action);
    }

    info!(
        template = %plan.template,
        actions = plan.actions.len(),
        "planned template set"
    );
    Ok(plan)
}

/// An action with its template source already read
enum Job<'a> {
    Render { source: String, target: &'a str },
    Command(&'a str),
}

impl Job<'_> {
    fn render(self, engine: &TemplateEngine) -> (PlannedAction, Vec<String>) {
        match self {
            Job::Render { source, target } => {
                let content = engine.render(&source);
                let path = engine.render(target);
                let mut unknown = content.unknown_markers;
                merge_unknown(&mut unknown, &path.unknown_markers);
                let action = PlannedAction::WriteFile {
                    path: PathBuf::from(path.content),
                    content: content.content,
                };
                (action, unknown)
            }
            Job::Command(command) => {
                let command = engine.render(command);
                let action = PlannedAction::RunCommand {
                    command: command.content,
                };
                (action, command.unknown_markers)
            }
        }
    }
}

fn read_jobs(set: &TemplateSet) -> Result<Vec<Job<'_>>> {
    set.descriptor
        .actions
        .iter()
        .map(|action| match action {
            Action::Render { source, target } => {
                let path = set.directory.join(source);
                debug!(path = %path.display(), "reading template source");
                Ok(Job::Render {
                    source: fs::read_to_string(&path)?,
                    target,
                })
            }
            Action::Command(command) => Ok(Job::Command(command)),
        })
        .collect()
}

fn merge_unknown(into: &mut Vec<String>, markers: &[String]) {
    for marker in markers {
        if !into.contains(marker) {
            into.push(marker.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::TemplateDescriptor;

    fn descriptor(name: &str, actions: Vec<Action>) -> TemplateDescriptor {
        TemplateDescriptor {
            name: name.to_string(),
            description: None,
            tokens: Default::default(),
            constants: Default::default(),
            arguments: Vec::new(),
            actions,
        }
    }

    fn set_in(dir: &Path, descriptor: TemplateDescriptor) -> TemplateSet {
        TemplateSet {
            descriptor,
            directory: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = TemplateRegistry::new();
        registry
            .add(set_in(Path::new("."), descriptor("test", vec![])))
            .unwrap();
        let err = registry
            .add(set_in(Path::new("."), descriptor("test", vec![])))
            .unwrap_err();
        assert!(matches!(err, GenerationError::DuplicateTemplate(name) if name == "test"));
    }

    #[test]
    fn test_registry_find_missing() {
        let registry = TemplateRegistry::new();
        assert!(matches!(
            registry.find("nope"),
            Err(GenerationError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_plan_renders_sources_targets_and_commands() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("test.hpp"),
            "#ifndef %NAME-UPCASE%TEST_HPP\n%UNSET%\n",
        )
        .unwrap();

        let set = set_in(
            dir.path(),
            descriptor(
                "test",
                vec![
                    Action::Render {
                        source: "test.hpp".to_string(),
                        target: "%NAME-LOWCASE%_test.hpp".to_string(),
                    },
                    Action::Command("echo %NAME%".to_string()),
                ],
            ),
        );

        let plan = plan_set(&set, &BaseInputs::new("Widget")).unwrap();
        assert_eq!(plan.template, "test");
        assert_eq!(
            plan.actions,
            vec![
                PlannedAction::WriteFile {
                    path: PathBuf::from("widget_test.hpp"),
                    content: "#ifndef WIDGETTEST_HPP\n%UNSET%\n".to_string(),
                },
                PlannedAction::RunCommand {
                    command: "echo Widget".to_string(),
                },
            ]
        );
        assert_eq!(plan.unknown_markers, vec!["UNSET"]);
    }

    #[test]
    fn test_plan_defaults_template_dir() {
        let dir = TempDir::new().unwrap();
        let set = set_in(
            dir.path(),
            descriptor("test", vec![Action::Command("ls %TPLDIR%".to_string())]),
        );

        let plan = plan_set(&set, &BaseInputs::new("Widget")).unwrap();
        assert_eq!(
            plan.actions,
            vec![PlannedAction::RunCommand {
                command: format!("ls {}", dir.path().display()),
            }]
        );
    }

    #[test]
    fn test_plan_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let set = set_in(
            dir.path(),
            descriptor(
                "test",
                vec![Action::Render {
                    source: "missing.hpp".to_string(),
                    target: "out.hpp".to_string(),
                }],
            ),
        );
        assert!(matches!(
            plan_set(&set, &BaseInputs::new("Widget")),
            Err(GenerationError::IoError(_))
        ));
    }

    #[test]
    fn test_plan_empty_name_fails_before_reading() {
        let dir = TempDir::new().unwrap();
        let set = set_in(
            dir.path(),
            descriptor(
                "test",
                vec![Action::Render {
                    source: "missing.hpp".to_string(),
                    target: "out.hpp".to_string(),
                }],
            ),
        );
        assert!(matches!(
            plan_set(&set, &BaseInputs::new("")),
            Err(GenerationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_plan_requires_declared_arguments() {
        let mut descriptor = descriptor("test", vec![]);
        descriptor.arguments = vec!["license".to_string()];
        let set = set_in(Path::new("."), descriptor);

        assert!(plan_set(&set, &BaseInputs::new("Widget")).is_err());
        assert!(plan_set(&set, &BaseInputs::new("Widget").with_argument("license", "MIT")).is_ok());
    }

    #[test]
    fn test_manager_plans_by_name() {
        let mut registry = TemplateRegistry::new();
        registry
            .add(set_in(
                Path::new("."),
                descriptor("cmd", vec![Action::Command("make %NAME-LOWCASE%".to_string())]),
            ))
            .unwrap();
        let manager = GenerationManager::new(registry);

        let plan = manager.plan("cmd", &BaseInputs::new("Widget")).unwrap();
        assert_eq!(
            plan.actions,
            vec![PlannedAction::RunCommand {
                command: "make widget".to_string(),
            }]
        );
        assert!(manager.plan("other", &BaseInputs::new("Widget")).is_err());
    }

    #[test]
    fn test_manager_base_catalog() {
        let mut registry = TemplateRegistry::new();
        registry
            .add(set_in(
                Path::new("."),
                descriptor("cmd", vec![Action::Command("echo %AUTHOR%".to_string())]),
            ))
            .unwrap();
        let mut base = TokenCatalog::new();
        base.set("AUTHOR", crate::Derivation::Constant("John Doe".to_string()))
            .unwrap();
        let manager = GenerationManager::new(registry).with_base_catalog(base);

        let plan = manager.plan("cmd", &BaseInputs::new("Widget")).unwrap();
        assert_eq!(
            plan.actions,
            vec![PlannedAction::RunCommand {
                command: "echo John Doe".to_string(),
            }]
        );
    }
}
