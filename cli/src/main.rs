use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Maximum element of the product of two matrices")]
struct Args {
    /// Left operand matrix file
    matrix1: PathBuf,
    /// Right operand matrix file
    matrix2: PathBuf,
    /// Where to write `<value> <row> <col>`
    output: PathBuf,
    /// Load compute settings from YAML (takes precedence over the flags below)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Worker threads for the product (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
    #[arg(long, default_value_t = false)]
    sequential: bool,
    /// Build the whole product matrix before scanning it
    #[arg(long, default_value_t = false)]
    materialize: bool,
    /// Also print the result as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// A config file replaces the compute flags entirely.
fn resolve_config(args: &Args) -> anyhow::Result<WorkflowConfig> {
    match &args.config {
        Some(path) => WorkflowConfig::load(path),
        None => Ok(WorkflowConfig::from_args(
            args.sequential,
            args.threads,
            args.materialize,
            args.json,
        )),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = resolve_config(&args)?;

    let runner = Runner::new(workflow_config.clone());
    let position = runner.execute(&args.matrix1, &args.matrix2, &args.output)?;

    if workflow_config.json {
        let report =
            serde_json::to_string(&position).context("serializing result record as JSON")?;
        println!("{}", report);
    }

    let metrics = runner.metrics().snapshot();
    log::info!(
        "loaded {} matrices, reduced {} cells",
        metrics.matrices_loaded,
        metrics.cells
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matmaxcore::prelude::Schedule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn flags_build_config_without_file() {
        let args = Args::parse_from(["matmax", "a", "b", "c", "--sequential", "--threads", "2"]);
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.compute.schedule, Schedule::Sequential);
        assert_eq!(cfg.compute.threads, Some(2));
    }

    #[test]
    fn config_file_replaces_flags() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"compute:\n  schedule: parallel\n").unwrap();
        let path = temp.into_temp_path();
        let path_arg = path.to_str().unwrap().to_string();

        let args = Args::parse_from([
            "matmax",
            "a",
            "b",
            "c",
            "--config",
            path_arg.as_str(),
            "--sequential",
            "--threads",
            "8",
            "--materialize",
            "--json",
        ]);
        let cfg = resolve_config(&args).unwrap();

        assert_eq!(cfg.compute.schedule, Schedule::Parallel);
        assert_eq!(cfg.compute.threads, None);
        assert!(!cfg.compute.materialize);
        assert!(!cfg.json);
    }
}
