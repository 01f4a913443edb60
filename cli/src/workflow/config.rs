use anyhow::Context;
use matmaxcore::prelude::{ComputeConfig, Schedule};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub compute: ComputeConfig,
    /// Echo the result record as JSON on stdout.
    pub json: bool,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(sequential: bool, threads: Option<usize>, materialize: bool, json: bool) -> Self {
        let schedule = if sequential {
            Schedule::Sequential
        } else {
            Schedule::Parallel
        };
        Self {
            compute: ComputeConfig {
                schedule,
                threads,
                materialize,
            },
            json,
        }
    }
}
