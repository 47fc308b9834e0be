use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{CatalogError, ServiceRecord};

/// The read-only list of services a game picks from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    services: Vec<ServiceRecord>,
}

impl Catalog {
    pub fn new(services: Vec<ServiceRecord>) -> Self {
        Self { services }
    }

    /// Used when the real catalog cannot be loaded.
    pub fn fallback() -> Self {
        Self::new(vec![ServiceRecord::new(
            "Amazon EC2",
            "./asset/Res_Amazon-EC2_Instance_48.svg",
            &["Amazon EC2", "Amazon S3", "AWS Lambda", "Amazon RDS"],
        )])
    }

    pub fn from_json(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        debug!(target: "catalog", "Loading service catalog from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        info!(
            target: "catalog",
            "Loaded {} services, e.g. {:?}",
            catalog.len(),
            catalog.services.iter().take(5).map(|s| &s.name).collect::<Vec<_>>()
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.services.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, service) in self.services.iter().enumerate() {
            if let Some(reason) = service.problem() {
                return Err(CatalogError::InvalidRecord {
                    index,
                    name: service.name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ServiceRecord> {
        self.services.get(index)
    }

    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }
}
