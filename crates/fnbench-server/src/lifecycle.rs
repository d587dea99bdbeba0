// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 12 October 2026

use crate::{endpoint::Endpoint, error::StartupError, ServerConfig};
use fnbench_core::{Executor, ServeReport, Workload};
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

/// Flips a running server into drain mode. Cheap to clone and safe to
/// trigger from any thread, a signal handler task included.
#[derive(Clone, Debug, Default)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    pub fn trigger(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Entry point for bringing a function online.
pub struct Server;

impl Server {
    /// Validate `config`, initialize the workload exactly once, bind and
    /// spawn the worker pool. Nothing is accepted before the workload is
    /// ready, and a failure at any step leaves nothing running.
    pub fn start<F>(config: ServerConfig, initialize: F) -> Result<RunningServer, StartupError>
    where
        F: FnOnce() -> anyhow::Result<Arc<dyn Workload>>,
    {
        config.validate()?;
        let addr = config.socket_addr()?;

        log::info!(
            "fnbench {} server has PID {}",
            env!("CARGO_PKG_VERSION"),
            std::process::id()
        );

        let start = Instant::now();
        let workload = initialize().map_err(StartupError::ResourceLoad)?;
        let cold_start = start.elapsed();
        log::info!(
            "{} ready with {} inputs after {:.3} ms cold start",
            workload.identity(),
            workload.catalog().len(),
            cold_start.as_secs_f64() * 1000.0
        );

        let executor = Arc::new(Executor::new(workload).with_limit(config.limit));
        let endpoint = Arc::new(Endpoint::new(executor));

        let server =
            tiny_http::Server::http(addr).map_err(|source| StartupError::Bind { addr, source })?;
        let local_addr = server.server_addr().to_ip().unwrap_or(addr);
        let server = Arc::new(server);

        let shutdown = ShutdownHandle::default();
        let mut workers = Vec::with_capacity(config.workers);
        for id in 0..config.workers {
            let server = server.clone();
            let endpoint = endpoint.clone();
            let worker_shutdown = shutdown.clone();
            let poll = config.poll_interval;

            let spawned = std::thread::Builder::new()
                .name(format!("fnbench-worker-{}", id))
                .spawn(move || run_worker(id, server, endpoint, worker_shutdown, poll));

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    shutdown.trigger();
                    join_all(std::mem::take(&mut workers));
                    return Err(StartupError::Spawn(e));
                }
            }
        }

        log::info!(
            "listening on {} with {} workers, limit {:?}",
            local_addr,
            config.workers,
            config.limit
        );

        Ok(RunningServer {
            local_addr,
            cold_start,
            endpoint,
            shutdown,
            workers,
        })
    }
}

/// A server with its worker pool up.
pub struct RunningServer {
    local_addr: SocketAddr,
    cold_start: Duration,
    endpoint: Arc<Endpoint>,
    shutdown: ShutdownHandle,
    workers: Vec<JoinHandle<()>>,
}

impl RunningServer {
    /// The bound address, with the real port when port 0 was requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Time spent initializing the workload.
    pub fn cold_start(&self) -> Duration {
        self.cold_start
    }

    pub fn executor(&self) -> &Executor {
        self.endpoint.executor()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Block until the shutdown handle fires and every worker has finished
    /// its in-flight call and answered the calls already queued in the
    /// listener.
    pub fn wait(self) -> ServeReport {
        join_all(self.workers);

        let report = self.endpoint.executor().report();
        log::info!("{} stopped: {}", self.endpoint.executor().identity(), report);
        report
    }

    /// Trigger shutdown and drain.
    pub fn shutdown(self) -> ServeReport {
        self.shutdown.trigger();
        self.wait()
    }
}

fn run_worker(
    id: usize,
    server: Arc<tiny_http::Server>,
    endpoint: Arc<Endpoint>,
    shutdown: ShutdownHandle,
    poll: Duration,
) {
    log::debug!("worker {} started", id);

    while !shutdown.is_triggered() {
        match server.recv_timeout(poll) {
            Ok(Some(request)) => endpoint.serve(request),
            Ok(None) => {}
            Err(e) => log::warn!("worker {}: failed receiving request: {}", id, e),
        }
    }

    // answer what was received before the flag flipped
    let mut drained = 0;
    loop {
        match server.try_recv() {
            Ok(Some(request)) => {
                endpoint.serve(request);
                drained += 1;
            }
            Ok(None) => break,
            Err(e) => {
                log::warn!("worker {}: failed receiving request: {}", id, e);
                break;
            }
        }
    }

    log::debug!("worker {} stopped after draining {} calls", id, drained);
}

fn join_all(workers: Vec<JoinHandle<()>>) {
    for worker in workers {
        let name = worker.thread().name().unwrap_or("worker").to_owned();
        if worker.join().is_err() {
            log::error!("{} panicked", name);
        }
    }
}
