//! Remote environment checks.
//!
//! [`RemoteValidator`] is the boundary to whatever answers "does this
//! project/region/zone exist". Each call is a single synchronous round trip;
//! retries and timeouts belong to the implementation. [`StaticInventory`]
//! answers from a recorded YAML inventory.

use crate::error::{BlueprintError, Result};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Existence checks against live environment state.
pub trait RemoteValidator {
    fn test_project_exists(&self, project_id: &str) -> anyhow::Result<()>;

    fn test_region_exists(&self, project_id: &str, region: &str) -> anyhow::Result<()>;

    fn test_zone_exists(&self, project_id: &str, zone: &str) -> anyhow::Result<()>;

    /// Checks that `zone` belongs to `region`, not merely that both exist.
    fn test_zone_in_region(&self, project_id: &str, zone: &str, region: &str)
    -> anyhow::Result<()>;
}

/// A recorded inventory of projects, their regions, and each region's zones.
///
/// ```yaml
/// projects:
///   hpc-dev:
///     regions:
///       us-central1: [us-central1-a, us-central1-b]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticInventory {
    #[serde(default)]
    projects: BTreeMap<String, ProjectInventory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProjectInventory {
    #[serde(default)]
    regions: BTreeMap<String, Vec<String>>,
}

impl StaticInventory {
    /// Load an inventory from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| BlueprintError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let inventory: Option<Self> =
            serde_yaml::from_str(yaml).map_err(BlueprintError::from_yaml)?;
        Ok(inventory.unwrap_or_default())
    }

    /// Record a project with no regions.
    pub fn with_project(mut self, project_id: &str) -> Self {
        self.projects.entry(project_id.to_string()).or_default();
        self
    }

    /// Record a zone in a project's region, creating both as needed.
    pub fn with_zone(mut self, project_id: &str, region: &str, zone: &str) -> Self {
        self.projects
            .entry(project_id.to_string())
            .or_default()
            .regions
            .entry(region.to_string())
            .or_default()
            .push(zone.to_string());
        self
    }

    fn project(&self, project_id: &str) -> anyhow::Result<&ProjectInventory> {
        match self.projects.get(project_id) {
            Some(project) => Ok(project),
            None => bail!(
                "project {} does not exist or your credentials do not have permission to access it",
                project_id
            ),
        }
    }
}

impl RemoteValidator for StaticInventory {
    fn test_project_exists(&self, project_id: &str) -> anyhow::Result<()> {
        self.project(project_id).map(|_| ())
    }

    fn test_region_exists(&self, project_id: &str, region: &str) -> anyhow::Result<()> {
        if !self.project(project_id)?.regions.contains_key(region) {
            bail!("region {} is not available in project {}", region, project_id);
        }
        Ok(())
    }

    fn test_zone_exists(&self, project_id: &str, zone: &str) -> anyhow::Result<()> {
        let project = self.project(project_id)?;
        if !project.regions.values().any(|zones| zones.iter().any(|z| z == zone)) {
            bail!("zone {} is not available in project {}", zone, project_id);
        }
        Ok(())
    }

    fn test_zone_in_region(
        &self,
        project_id: &str,
        zone: &str,
        region: &str,
    ) -> anyhow::Result<()> {
        let project = self.project(project_id)?;
        let Some(zones) = project.regions.get(region) else {
            bail!("region {} is not available in project {}", region, project_id);
        };
        if !zones.iter().any(|z| z == zone) {
            bail!("zone {} is not in region {} in project {}", zone, region, project_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> StaticInventory {
        StaticInventory::from_yaml(
            r#"
projects:
  p1:
    regions:
      us-central1: [us-central1-a, us-central1-b]
      europe-west4: [europe-west4-a]
  empty-project: {}
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_project_checks() {
        let inv = inventory();
        assert!(inv.test_project_exists("p1").is_ok());
        assert!(inv.test_project_exists("empty-project").is_ok());

        let err = inv.test_project_exists("p2").unwrap_err();
        assert!(err.to_string().contains("p2"));
    }

    #[test]
    fn test_region_and_zone_checks() {
        let inv = inventory();
        assert!(inv.test_region_exists("p1", "us-central1").is_ok());
        assert!(inv.test_region_exists("p1", "asia-east1").is_err());
        assert!(inv.test_region_exists("p2", "us-central1").is_err());

        assert!(inv.test_zone_exists("p1", "europe-west4-a").is_ok());
        assert!(inv.test_zone_exists("p1", "us-central1-f").is_err());
    }

    #[test]
    fn test_zone_in_region_requires_membership() {
        let inv = inventory();
        assert!(
            inv.test_zone_in_region("p1", "us-central1-a", "us-central1")
                .is_ok()
        );
        // Both exist individually, but not together.
        let err = inv
            .test_zone_in_region("p1", "europe-west4-a", "us-central1")
            .unwrap_err();
        assert!(err.to_string().contains("is not in region"));
    }

    #[test]
    fn test_builder_and_empty_document() {
        let inv = StaticInventory::from_yaml("")
            .unwrap()
            .with_project("solo")
            .with_zone("p9", "r1", "r1-a");
        assert!(inv.test_project_exists("solo").is_ok());
        assert!(inv.test_zone_in_region("p9", "r1-a", "r1").is_ok());
    }
}
