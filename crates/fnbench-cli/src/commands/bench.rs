use super::client::Client;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// Drive a served function with repeated calls to estimate round trip latency.
#[derive(Parser, Debug)]
#[clap()]
pub(crate) struct Args {
    /// Address of the server.
    #[clap(short, long, default_value = "127.0.0.1:50051")]
    addr: String,

    /// How many calls to make in total.
    #[clap(short, long, default_value = "100")]
    count: usize,

    /// How many calls to keep in flight at once.
    #[clap(short = 'j', long, default_value = "1")]
    concurrency: usize,

    /// Optional tag sent with every call.
    #[clap(short, long)]
    name: Option<String>,

    /// Output format: text or json.
    #[clap(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

fn std_deviation(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let count = data.len();

    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - value;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(variance.sqrt())
}

#[derive(Serialize, Clone, Debug)]
struct Record {
    calls: usize,
    failed: usize,
    concurrency: usize,
    mean: f64,
    stddev: f64,
    total: f64,
}

fn summarize(samples: &[Result<f64, ()>], concurrency: usize, total: f64) -> Record {
    let times = samples.iter().filter_map(|s| s.ok()).collect::<Vec<_>>();

    Record {
        calls: samples.len(),
        failed: samples.len() - times.len(),
        concurrency,
        mean: mean(&times).unwrap_or(0.0),
        stddev: std_deviation(&times).unwrap_or(0.0),
        total,
    }
}

pub(super) fn run(config: Args) -> Result<()> {
    let client = Client::new(&config.addr);
    let name = config.name.as_deref();

    // warm up the connection and make sure the server is there at all
    client.invoke(name)?.map_err(anyhow::Error::new)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.concurrency.max(1))
        .build()?;

    let start = Instant::now();
    let samples = pool.install(|| {
        (0..config.count)
            .into_par_iter()
            .map(|_| {
                let start = Instant::now();
                match client.invoke(name) {
                    Ok(Ok(_)) => Ok(start.elapsed().as_secs_f64() * 1000.0),
                    Ok(Err(status)) => {
                        log::warn!("call failed: {}", status);
                        Err(())
                    }
                    Err(e) => {
                        log::warn!("call failed: {:#}", e);
                        Err(())
                    }
                }
            })
            .collect::<Vec<_>>()
    });
    let total = start.elapsed().as_secs_f64() * 1000.0;

    let record = summarize(&samples, config.concurrency, total);
    match config.output {
        OutputFormat::Text => println!(
            "{} calls ({} failed, {} in flight): {:.2} ms ± {:.2} per call, {:.2} ms total",
            record.calls,
            record.failed,
            record.concurrency,
            record.mean,
            record.stddev,
            record.total,
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }

    Ok(())
}
