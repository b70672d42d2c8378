//! Persistence of annotation lists keyed by plan id.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use relative_path::RelativePathBuf;

use crate::models::Annotation;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid plan id: {0:?}")]
    InvalidPlanId(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed annotation file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Durable storage for the annotations of a plan.
///
/// `load` returns an empty list for a plan that was never saved.
pub trait AnnotationStore {
    fn save(&self, plan_id: &str, annotations: &[Annotation]) -> Result<(), StoreError>;
    fn load(&self, plan_id: &str) -> Result<Vec<Annotation>, StoreError>;
}

impl<T: AnnotationStore + ?Sized> AnnotationStore for &T {
    fn save(&self, plan_id: &str, annotations: &[Annotation]) -> Result<(), StoreError> {
        (**self).save(plan_id, annotations)
    }

    fn load(&self, plan_id: &str) -> Result<Vec<Annotation>, StoreError> {
        (**self).load(plan_id)
    }
}

/// In-process store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    plans: Arc<Mutex<HashMap<String, Vec<Annotation>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStore for MemoryStore {
    fn save(&self, plan_id: &str, annotations: &[Annotation]) -> Result<(), StoreError> {
        let mut plans = self.plans.lock().map_err(|_| StoreError::Poisoned)?;
        plans.insert(plan_id.to_string(), annotations.to_vec());
        Ok(())
    }

    fn load(&self, plan_id: &str) -> Result<Vec<Annotation>, StoreError> {
        let plans = self.plans.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(plans.get(plan_id).cloned().unwrap_or_default())
    }
}

/// One `<plan-id>.json` file per plan under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Plan ids become file names, so they may not contain path syntax.
    fn path_for(&self, plan_id: &str) -> Result<PathBuf, StoreError> {
        let valid = !plan_id.is_empty()
            && plan_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !plan_id.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidPlanId(plan_id.to_string()));
        }
        let relative = RelativePathBuf::from(format!("{plan_id}.json"));
        Ok(relative.to_path(&self.root))
    }
}

impl AnnotationStore for FileStore {
    fn save(&self, plan_id: &str, annotations: &[Annotation]) -> Result<(), StoreError> {
        let path = self.path_for(plan_id)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(annotations).map_err(|source| {
            StoreError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json)?;
        log::debug!("saved {} annotations to {}", annotations.len(), path.display());
        Ok(())
    }

    fn load(&self, plan_id: &str) -> Result<Vec<Annotation>, StoreError> {
        let path = self.path_for(plan_id)?;
        if !path.exists() {
            return Ok(vec![]);
        }
        let json = fs::read_to_string(&path)?;
        serde_json::from_str(&json).map_err(|source| StoreError::Malformed { path, source })
    }
}
