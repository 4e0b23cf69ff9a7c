//! Weaving-project planning: a declarative YAML description of a warp and
//! its products in, yarn consumption and cost estimates out.

mod calc;
mod model;

#[cfg(test)]
mod tests;

pub use calc::{cm_to_m, estimate, ProjectEstimate, YarnUsage};
pub use model::{Product, ProjectReport, Shrinkage, WarpPlan, Yarn};

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read project file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("warp needs either an explicit length or at least one product")]
    NothingToWeave,

    #[error("yarn {0:?} has no m_per_kg figure, cannot estimate weight")]
    UnknownYarnWeight(String),
}

impl WarpPlan {
    /// Load a plan from a YAML project file; absent fields take the
    /// documented defaults.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

impl ProjectReport {
    /// Write the full report (input plan plus estimate) as YAML.
    pub fn dump(&self, path: &Path) -> Result<(), ProjectError> {
        let text = serde_yaml::to_string(self)?;
        std::fs::write(path, text).map_err(|source| ProjectError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read back a previously dumped report.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }
}
