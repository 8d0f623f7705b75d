//! JSON export of a run.

use crate::runner::RunResult;
use pedigree_core::{CoalescencePoint, SimConfig, SimulationStats};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunExport {
    /// Parameters used
    pub config: SimConfig,

    /// Number of founders
    pub population_size: usize,

    /// Simulation horizon
    pub t_max: f64,

    /// Individuals alive at the end
    pub survivors: usize,

    pub paternal: Vec<CoalescencePoint>,

    pub maternal: Vec<CoalescencePoint>,

    pub stats: SimulationStats,
}

impl From<&RunResult> for RunExport {
    fn from(result: &RunResult) -> Self {
        Self {
            config: result.config.clone(),
            population_size: result.population_size,
            t_max: result.t_max,
            survivors: result.survivors,
            paternal: result.paternal.clone(),
            maternal: result.maternal.clone(),
            stats: result.stats.clone(),
        }
    }
}

impl RunExport {
    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::PedigreeRunner;

    #[test]
    fn test_export_fields() {
        let result = PedigreeRunner::new(SimConfig::default())
            .with_seed(5)
            .run(50, 100.0)
            .unwrap();
        let export = RunExport::from(&result);
        let json = export.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["population_size"], 50);
        assert_eq!(value["config"]["seed"], 5);
        assert_eq!(value["survivors"], result.survivors);
        assert_eq!(value["paternal"][0]["time"], 0.0);
        assert!(value["stats"]["births"].as_u64().unwrap() >= 50);
    }

    #[test]
    fn test_write_to_file() {
        let result = PedigreeRunner::new(SimConfig::default()).run(10, 5.0).unwrap();
        let name = format!("pedigree_export_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);

        RunExport::from(&result).write_to_file(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let back: RunExport = serde_json::from_str(&text).unwrap();
        let counts = |s: &[CoalescencePoint]| s.iter().map(|p| p.lineages).collect::<Vec<_>>();
        assert_eq!(counts(&back.paternal), counts(&result.paternal));
        assert_eq!(counts(&back.maternal), counts(&result.maternal));
        assert_eq!(back.stats.births, result.stats.births);
        assert_eq!(back.config.seed, result.config.seed);
    }
}
