//! Умножение матриц на OpenCL-устройстве с проверкой на CPU

use anyhow::{Context, Result};
use opencl_matmul::{pipeline, RunConfig};
use std::io::{self, Write};
use std::process::ExitCode;

fn run(config: &RunConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = pipeline::run(config, &mut out)
        .with_context(|| format!("matrix multiplication with kernel {}", config.kernel_path.display()))?;
    out.flush()?;

    log::debug!(
        "GPU {:?}, CPU {:?}, максимальная разница {:e}",
        report.gpu_time,
        report.cpu_time,
        report.comparison.max_diff
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = RunConfig::default();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
