use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use clap::Args;
use tabled::Tabled;
use tessera_config::PoolSettings;
use tessera_pool::{PoolOptions, WorkerPool};

use super::table::{Field, Layout, render};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[derive(Args, Clone, Debug)]
pub struct SquaresArg {
    #[arg(required = true, num_args = 1.., help = "Upper bounds, exclusive")]
    pub values: Vec<u64>,

    #[arg(long, help = "Worker threads (default: pool.workers)")]
    pub workers: Option<usize>,
}

#[derive(Args, Clone, Debug)]
pub struct SleepArg {
    #[arg(long, default_value_t = 4)]
    pub tasks: usize,

    #[arg(long, default_value_t = 200, help = "Sleep per task")]
    pub millis: u64,

    #[arg(long, help = "Worker threads (default: pool.workers)")]
    pub workers: Option<usize>,
}

#[derive(Args, Clone, Debug)]
pub struct GatherArg {
    #[arg(required = true, num_args = 1.., value_parser = parse_delay, help = "Delays in seconds")]
    pub delays: Vec<Duration>,
}

fn parse_delay(raw: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

fn build_pool(settings: &PoolSettings, workers: Option<usize>) -> Result<WorkerPool> {
    let mut options = PoolOptions::new().workers(workers.unwrap_or(settings.workers));
    if let Some(limit) = settings.max_concurrent {
        options = options.max_concurrent(limit);
    }
    Ok(WorkerPool::new(options)?)
}

/// Sum of `i * i` for `i` in `0..n`, `None` once it no longer fits a `u128`.
pub fn sum_of_squares(n: u64) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    let n = u128::from(n);
    n.checked_mul(n - 1)?.checked_mul(2 * n - 1)?.checked_div(6)
}

#[derive(Debug, Tabled)]
struct SquareRow {
    n:      u64,
    result: u128,
}

pub fn squares(arg: SquaresArg, settings: &PoolSettings) -> Result<()> {
    let pool = build_pool(settings, arg.workers)?;
    let started = Instant::now();
    let results = pool.map(arg.values.clone(), sum_of_squares)?;
    let elapsed = started.elapsed();
    pool.shutdown(SHUTDOWN_GRACE);

    let rows = arg
        .values
        .into_iter()
        .zip(results)
        .map(|(n, result)| {
            let result = result.ok_or_else(|| anyhow!("sum of squares below {n} overflows u128"))?;
            Ok(SquareRow { n, result })
        })
        .collect::<Result<Vec<_>>>()?;
    let footer = format!("{elapsed:.2?}");
    println!("{}", render(rows, Layout::titled("sum of squares").footer(footer)));
    Ok(())
}

pub fn sleep(arg: SleepArg, settings: &PoolSettings) -> Result<()> {
    let pool = build_pool(settings, arg.workers)?;
    let per_task = Duration::from_millis(arg.millis);
    let started = Instant::now();

    let handles: Vec<_> = (0..arg.tasks)
        .map(|index| {
            pool.submit(move || {
                std::thread::sleep(per_task);
                index
            })
        })
        .collect();
    let finished = handles
        .into_iter()
        .map(|handle| handle.join())
        .collect::<tessera_pool::Result<Vec<_>>>()?;

    let elapsed = started.elapsed();
    let workers = pool.workers();
    pool.shutdown(SHUTDOWN_GRACE);

    let fields = [
        Field::new("tasks", finished.len()),
        Field::new("workers", workers),
        Field::new("sequential", sequential(per_task, finished.len())),
        Field::new("elapsed", format!("{elapsed:.2?}")),
    ];
    println!("{}", render(fields, Layout::titled("blocking sleeps").hide_header()));
    Ok(())
}

/// What the sleeps would take one after another.
fn sequential(per_task: Duration, tasks: usize) -> String {
    u32::try_from(tasks)
        .ok()
        .and_then(|tasks| per_task.checked_mul(tasks))
        .map_or_else(|| "overflow".to_string(), |total| format!("{total:.2?}"))
}

pub fn gather(arg: GatherArg, settings: &PoolSettings) -> Result<()> {
    let pool = build_pool(settings, None)?;
    let started = Instant::now();

    let delays = arg.delays.into_iter().map(|delay| async move {
        tokio::time::sleep(delay).await;
        delay
    });
    let finished = pool.gather(delays)?;
    let elapsed = started.elapsed();
    pool.shutdown(SHUTDOWN_GRACE);

    let order = finished
        .iter()
        .map(|delay| format!("{:.2}", delay.as_secs_f64()))
        .collect::<Vec<_>>()
        .join(", ");
    let fields = [
        Field::new("results", order),
        Field::new("elapsed", format!("{elapsed:.2?}")),
    ];
    println!("{}", render(fields, Layout::titled("gather").hide_header()));
    Ok(())
}
