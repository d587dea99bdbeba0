use anyhow::Result;
use clap::Parser;
use fnbench::core::{ConfigError, ExecutionLimit};
use fnbench::server::{Server, ServerConfig};
use fnbench::workloads::{WorkloadKind, WorkloadSpec};
use std::{path::PathBuf, time::Duration};

/// Serve a function until interrupted.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// The function to serve: classify, recognize, transcode or sleep.
    #[clap(short, long, default_value = "classify")]
    workload: WorkloadKind,

    /// Directory holding the sample images or the source video.
    #[clap(long, default_value = ".")]
    inputs_dir: PathBuf,

    /// Replace the default input catalog. Repeat for several inputs.
    #[clap(short, long = "input")]
    inputs: Vec<String>,

    /// ImageNet class index JSON used for predictions.
    #[clap(long)]
    labels: Option<PathBuf>,

    /// Where the transcoder writes its output.
    #[clap(long, default_value_os_t = std::env::temp_dir())]
    out_dir: PathBuf,

    /// Delay of the sleep workload.
    #[clap(long, default_value = "10")]
    delay_ms: u64,

    /// Make every n-th call of the sleep workload fail.
    #[clap(long)]
    fail_every: Option<usize>,

    /// Host or address to bind, all interfaces when left out.
    #[clap(long)]
    host: Option<String>,

    /// Port to listen on. Falls back to $GRPC_PORT, then 50051.
    #[clap(short, long)]
    port: Option<u16>,

    /// Size of the worker pool.
    #[clap(short, long, default_value = "2")]
    threads: usize,

    /// Report calls slower than this as failed. Calls are never cancelled.
    #[clap(long)]
    deadline_ms: Option<u64>,
}

impl Args {
    fn workload_spec(&self) -> WorkloadSpec {
        WorkloadSpec {
            kind: self.workload,
            inputs_dir: self.inputs_dir.clone(),
            labels: self.labels.clone(),
            inputs: self.inputs.clone(),
            out_dir: self.out_dir.clone(),
            delay: Duration::from_millis(self.delay_ms),
            fail_every: self.fail_every,
        }
    }

    fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = ServerConfig::from_env()?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        config.workers = self.threads;
        config.limit = match self.deadline_ms {
            Some(ms) => ExecutionLimit::Report(Duration::from_millis(ms)),
            None => ExecutionLimit::Unbounded,
        };
        Ok(config)
    }
}

pub(super) fn serve(config: Args) -> Result<()> {
    let spec = config.workload_spec();
    let server = Server::start(config.server_config()?, || spec.initialize())?;

    wait_for_signal()?;
    log::info!("shutting down, draining in-flight calls");

    let report = server.shutdown();
    println!("{}", report);
    Ok(())
}

/// Block until SIGINT, or SIGTERM on unix.
fn wait_for_signal() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut terminate = signal(SignalKind::terminate())?;
            tokio::select! {
                res = tokio::signal::ctrl_c() => res?,
                _ = terminate.recv() => {}
            }
        }
        #[cfg(not(unix))]
        tokio::signal::ctrl_c().await?;

        Ok::<(), std::io::Error>(())
    })?;

    Ok(())
}
