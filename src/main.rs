use clap::Parser;
use fixed_pool::ThreadPool;
use std::{
    thread,
    time::{Duration, Instant},
};
use tracing_subscriber::{fmt, EnvFilter};


/// Runs a handful of demonstration tasks on a fixed thread pool.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of worker threads
    #[arg(short, long, default_value_t = 3)]
    threads: usize,

    /// Number of sleeping demo tasks to queue
    #[arg(long, default_value_t = 13)]
    tasks: usize,

    /// Simulated work per demo task, in milliseconds
    #[arg(long, default_value_t = 300)]
    sleep_ms: u64,
}

fn multiply(a: i64, b: i64) -> i64 {
    thread::sleep(Duration::from_millis(100));
    a * b
}

/// Time for `tasks` jobs of length `work` to finish on `threads` workers.
fn drain_time(work: Duration, tasks: usize, threads: usize) -> Duration {
    let waves = tasks.div_ceil(threads.max(1));
    work.saturating_mul(u32::try_from(waves).unwrap_or(u32::MAX))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    let args = Args::parse();
    let now = Instant::now();
    let pool = ThreadPool::new(args.threads)?;

    let product = pool.submit_with_result(|| multiply(2, 3))?;

    let work = Duration::from_millis(args.sleep_ms);
    for task in 0..args.tasks {
        pool.submit_indexed(move |worker| {
            println!("Executing task {task} on worker {worker}");
            thread::sleep(work);
        })?;
    }

    println!("Output of multiply -> 2*3 = {}", product.get()?);

    // Let the queued demo tasks run before tearing the pool down.
    thread::sleep(drain_time(work, args.tasks, args.threads));

    pool.shutdown();
    println!("metrics: {:?}", pool.metrics());
    println!("elapsed: {:?}", now.elapsed());
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_time_rounds_up_to_whole_waves() {
        let work = Duration::from_millis(300);
        assert_eq!(drain_time(work, 13, 3), Duration::from_millis(1_500));
        assert_eq!(drain_time(work, 0, 3), Duration::ZERO);
    }

    #[test]
    fn test_drain_time_saturates_on_huge_task_counts() {
        let work = Duration::from_secs(1);
        assert_eq!(drain_time(work, usize::MAX, 1), Duration::from_secs(u32::MAX as u64));
        assert_eq!(drain_time(Duration::MAX, 10, 1), Duration::MAX);
    }
}
