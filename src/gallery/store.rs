//! File-backed gallery store.
//!
//! The storage file is a JSON object keyed by namespace, each key holding an
//! array of projects. Reading never fails: a missing or corrupt file is an
//! empty gallery. Failed writes are logged and skipped.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::error::Error;
use crate::core::types::Result;
use super::config::GalleryConfig;
use super::project::BuildProject;

/// Saved projects, newest first
pub struct GalleryStore {
    path: PathBuf,
    namespace: String,
    projects: Vec<BuildProject>,
}

impl GalleryStore {
    /// Open the gallery described by `config`
    pub fn open(config: &GalleryConfig) -> Self {
        Self::open_at(&config.path, &config.namespace)
    }

    /// Open the gallery stored under `namespace` in the file at `path`.
    pub fn open_at(path: impl AsRef<Path>, namespace: &str) -> Self {
        let path = path.as_ref().to_path_buf();

        let projects = if path.exists() {
            match read_namespace(&path, namespace) {
                Ok(projects) => projects,
                Err(e) => {
                    log::error!("Failed to load gallery from {}: {}", path.display(), e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        log::info!("Gallery {:?}: {} saved builds", namespace, projects.len());
        Self {
            path,
            namespace: namespace.to_string(),
            projects,
        }
    }

    /// All projects, newest first
    pub fn projects(&self) -> &[BuildProject] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&BuildProject> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects whose name contains `term`, ignoring case. A blank term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<&BuildProject> {
        let term = term.trim().to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect()
    }

    /// Save a project at the front of the gallery. Its id is made unique
    /// within the gallery if needed.
    pub fn add(&mut self, mut project: BuildProject) -> &BuildProject {
        if self.get(&project.id).is_some() {
            let base = project.id.clone();
            let mut n = 1;
            while self.get(&format!("{}-{}", base, n)).is_some() {
                n += 1;
            }
            project.id = format!("{}-{}", base, n);
        }

        log::info!("Saving build {:?} ({} blocks)", project.name, project.block_count());
        self.projects.insert(0, project);
        self.persist();
        &self.projects[0]
    }

    /// Delete a project by id
    pub fn remove(&mut self, id: &str) -> Option<BuildProject> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        let removed = self.projects.remove(index);
        self.persist();
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Write this namespace back to disk, keeping any other namespaces in
    /// the file. Goes through a temporary file and a rename.
    pub fn save(&self) -> Result<()> {
        let mut root = match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str::<Value>(&json) {
                Ok(Value::Object(map)) => map,
                _ => {
                    log::warn!("Overwriting unreadable gallery file {}", self.path.display());
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };
        root.insert(self.namespace.clone(), serde_json::to_value(&self.projects)?);

        let json = serde_json::to_string_pretty(&Value::Object(root))?;
        let storage = |e: std::io::Error| {
            Error::Storage(format!("cannot write {}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(storage)?;
        }
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json).map_err(storage)?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(storage(e));
        }
        Ok(())
    }

    /// Save, logging instead of failing
    fn persist(&self) {
        if let Err(e) = self.save() {
            log::warn!("Skipping gallery save: {}", e);
        }
    }
}

/// Read one namespace's projects from the storage file
fn read_namespace(path: &Path, namespace: &str) -> Result<Vec<BuildProject>> {
    let json = std::fs::read_to_string(path)?;
    let mut root: Value = serde_json::from_str(&json)?;

    match root.get_mut(namespace).map(Value::take) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(projects) => Ok(serde_json::from_value(projects)?),
    }
}
