use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use matmaxcore::io::{parse_matrix, write_position, ElementPosition};
use matmaxcore::math::{Matrix, MaxProduct};
use matmaxcore::telemetry::{LogManager, MetricsRecorder};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

/// Loads both operands, reduces their product and writes the result record.
///
/// Files are opened and closed around the compute phase; nothing is held
/// open while the product is evaluated.
#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        Arc::clone(&self.metrics)
    }

    pub fn execute(&self, lhs: &Path, rhs: &Path, output: &Path) -> anyhow::Result<ElementPosition> {
        let result = self.execute_inner(lhs, rhs, output);
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }

    fn execute_inner(&self, lhs: &Path, rhs: &Path, output: &Path) -> anyhow::Result<ElementPosition> {
        let lhs_matrix = self.load_matrix(lhs)?;
        let rhs_matrix = self.load_matrix(rhs)?;

        let position = MaxProduct::new(self.config.compute.clone())
            .run(&lhs_matrix, &rhs_matrix)
            .with_context(|| format!("reducing {} x {}", lhs.display(), rhs.display()))?;
        self.metrics
            .record_product(lhs_matrix.n_rows() * rhs_matrix.n_cols());

        write_result(&position, output)?;
        LogManager::new().record(&format!(
            "max {} at ({}, {}) -> {}",
            position.value,
            position.row,
            position.col,
            output.display()
        ));
        Ok(position)
    }

    fn load_matrix(&self, path: &Path) -> anyhow::Result<Matrix> {
        let file =
            File::open(path).with_context(|| format!("opening matrix {}", path.display()))?;
        let matrix = parse_matrix(BufReader::new(file))
            .with_context(|| format!("parsing matrix {}", path.display()))?;
        log::debug!(
            "loaded {}x{} matrix from {}",
            matrix.n_rows(),
            matrix.n_cols(),
            path.display()
        );
        self.metrics.record_loaded();
        Ok(matrix)
    }
}

fn write_result(position: &ElementPosition, path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating result file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_position(position, &mut writer)
        .with_context(|| format!("writing result {}", path.display()))?;
    writer
        .into_inner()
        .map_err(|err| err.into_error())
        .and_then(|file| file.sync_all())
        .with_context(|| format!("closing result file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_inputs(dir: &TempDir, lhs: &str, rhs: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let lhs_path = dir.path().join("m1.txt");
        let rhs_path = dir.path().join("m2.txt");
        fs::write(&lhs_path, lhs).unwrap();
        fs::write(&rhs_path, rhs).unwrap();
        (lhs_path, rhs_path)
    }

    #[test]
    fn runner_writes_result_record() {
        let dir = TempDir::new().unwrap();
        let (lhs, rhs) = write_inputs(&dir, "2 2\n1 2\n3 4\n", "2 2\n5 6\n7 8\n");
        let out = dir.path().join("out.txt");

        let runner = Runner::new(WorkflowConfig::default());
        let position = runner.execute(&lhs, &rhs, &out).unwrap();

        assert_eq!(position, ElementPosition::new(1, 1, 50.0));
        assert_eq!(fs::read_to_string(&out).unwrap(), "50.000000 1 1");
        let snapshot = runner.metrics().snapshot();
        assert_eq!(snapshot.matrices_loaded, 2);
        assert_eq!(snapshot.cells, 4);
        assert_eq!(snapshot.errors, 0);
    }

    #[test]
    fn missing_input_names_the_file() {
        let dir = TempDir::new().unwrap();
        let (lhs, _) = write_inputs(&dir, "1 1 1", "1 1 1");
        let missing = dir.path().join("absent.txt");
        let out = dir.path().join("out.txt");

        let runner = Runner::new(WorkflowConfig::default());
        let err = runner.execute(&lhs, &missing, &out).unwrap_err();

        assert!(format!("{err:#}").contains("absent.txt"));
        assert!(!out.exists());
        assert_eq!(runner.metrics().snapshot().errors, 1);
    }

    #[test]
    fn truncated_input_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let (lhs, rhs) = write_inputs(&dir, "2 2\n1 2 3", "2 1\n1 1");
        let out = dir.path().join("out.txt");

        let err = Runner::new(WorkflowConfig::default())
            .execute(&lhs, &rhs, &out)
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("parsing matrix"));
        assert!(message.contains("m1.txt"));
    }

    #[test]
    fn mismatched_operands_are_reported() {
        let dir = TempDir::new().unwrap();
        let (lhs, rhs) = write_inputs(&dir, "1 3\n1 2 3", "2 1\n1 1");
        let out = dir.path().join("out.txt");

        let err = Runner::new(WorkflowConfig::default())
            .execute(&lhs, &rhs, &out)
            .unwrap_err();

        assert!(format!("{err:#}").contains("dimension mismatch"));
    }

    #[test]
    fn sequential_config_matches_parallel_result() {
        let dir = TempDir::new().unwrap();
        let (lhs, rhs) = write_inputs(&dir, "1 2\n1 -1\n", "2 1\n-1\n-1\n");
        let out = dir.path().join("out.txt");

        let config = WorkflowConfig::from_args(true, None, true, false);
        let position = Runner::new(config).execute(&lhs, &rhs, &out).unwrap();

        assert_eq!(position, ElementPosition::new(0, 0, 0.0));
        assert_eq!(fs::read_to_string(&out).unwrap(), "0.000000 0 0");
    }
}
