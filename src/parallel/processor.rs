//! Generic task scheduling, sequentially or across a bounded worker pool.
//!
//! The pool uses crossbeam channels in a producer/consumer arrangement
//! with scoped worker threads. Work items are index-tagged on the way in
//! and outcomes sorted back into input order on the way out, so callers
//! can map every outcome to its item. A failed task stays in its slot as
//! an error; it never cancels or disturbs sibling tasks, and the pool is
//! fully joined before `run_all` returns.

use anyhow::Result;
use crossbeam::channel::{Receiver, Sender, bounded};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a batch of tasks is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// One task after another on the calling thread, in input order.
    Sequential,
    /// All tasks submitted to a bounded worker pool, joined as a batch.
    Parallel,
}

impl RunMode {
    pub fn label(self) -> &'static str {
        match self {
            RunMode::Sequential => "sequential",
            RunMode::Parallel => "parallel",
        }
    }
}

/// Worker pool sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Fixed number of worker threads. 0 derives the size from
    /// `thread_percentage` of the available cores.
    #[serde(default)]
    pub max_threads: usize,
    /// Percentage of available cores to use when `max_threads` is 0.
    #[serde(default = "default_thread_percentage")]
    pub thread_percentage: u8,
    /// Channel capacity multiplier (buffer = workers * multiplier).
    #[serde(default = "default_channel_buffer_multiplier")]
    pub channel_buffer_multiplier: usize,
}

fn default_thread_percentage() -> u8 {
    100
}

fn default_channel_buffer_multiplier() -> usize {
    2
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_threads: 0,
            thread_percentage: default_thread_percentage(),
            channel_buffer_multiplier: default_channel_buffer_multiplier(),
        }
    }
}

/// Outcome of one unit of work: the worker's result, or the failure
/// message if it returned an error. Failures stay in position so callers
/// can always map outcomes back to inputs.
pub type TaskOutcome<R> = std::result::Result<R, String>;

/// Runs batches of independent tasks in either mode.
pub struct TaskScheduler {
    config: PoolConfig,
}

impl TaskScheduler {
    pub fn new(config: PoolConfig) -> Self {
        TaskScheduler { config }
    }

    /// Number of worker threads a parallel batch of `task_count` items
    /// would get: the configured fixed size if set, otherwise the core
    /// share, and never more workers than tasks (or fewer than one).
    pub fn worker_count(&self, task_count: usize) -> usize {
        let sized = if self.config.max_threads > 0 {
            self.config.max_threads
        } else {
            let cores = num_cpus::get();
            std::cmp::max(1, cores * self.config.thread_percentage as usize / 100)
        };
        std::cmp::min(sized, task_count.max(1))
    }

    /// Run `worker` over every item, returning one outcome per item in
    /// input order. The call returns only after every task completed or
    /// failed; one task's failure never affects the others.
    pub fn run_all<T, R, F>(&self, items: Vec<T>, mode: RunMode, worker: F) -> Result<Vec<TaskOutcome<R>>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Send + Sync,
    {
        match mode {
            RunMode::Sequential => Ok(items
                .into_iter()
                .map(|item| worker(item).map_err(|e| e.to_string()))
                .collect()),
            RunMode::Parallel => self.run_pool(items, worker),
        }
    }

    fn run_pool<T, R, F>(&self, items: Vec<T>, worker: F) -> Result<Vec<TaskOutcome<R>>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Send + Sync,
    {
        let task_count = items.len();
        if task_count == 0 {
            return Ok(Vec::new());
        }

        let workers = self.worker_count(task_count);
        debug!(workers, tasks = task_count, "starting worker pool");

        let buffer = (workers * self.config.channel_buffer_multiplier).max(1);
        let (work_tx, work_rx): (Sender<(usize, T)>, Receiver<(usize, T)>) = bounded(buffer);
        let (result_tx, result_rx): (
            Sender<(usize, TaskOutcome<R>)>,
            Receiver<(usize, TaskOutcome<R>)>,
        ) = bounded(buffer);

        let mut outcomes = crossbeam::thread::scope(|s| {
            let worker = &worker;

            for _ in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                s.spawn(move |_| {
                    while let Ok((index, item)) = work_rx.recv() {
                        let outcome = worker(item).map_err(|e| e.to_string());
                        if result_tx.send((index, outcome)).is_err() {
                            break; // Collector gone
                        }
                    }
                });
            }

            // Feed the pool from its own thread so the bounded work
            // channel never blocks against the collector below.
            let feeder_tx = work_tx.clone();
            s.spawn(move |_| {
                for entry in items.into_iter().enumerate() {
                    if feeder_tx.send(entry).is_err() {
                        break; // Workers dropped
                    }
                }
            });

            // Drop the originals so receivers see the channels close once
            // the feeder and all workers finish.
            drop(work_tx);
            drop(result_tx);

            let mut collected = Vec::with_capacity(task_count);
            while collected.len() < task_count {
                match result_rx.recv() {
                    Ok(entry) => collected.push(entry),
                    Err(_) => break, // All workers done
                }
            }
            collected
        })
        .map_err(|_| anyhow::anyhow!("worker thread panicked during parallel run"))?;

        outcomes.sort_by_key(|(index, _)| *index);
        Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> TaskScheduler {
        TaskScheduler::new(PoolConfig::default())
    }

    fn unwrap_all(outcomes: Vec<TaskOutcome<i32>>) -> Vec<i32> {
        outcomes.into_iter().map(|o| o.unwrap()).collect()
    }

    #[test]
    fn sequential_runs_in_input_order() {
        let outcomes = scheduler()
            .run_all(vec![1, 2, 3, 4, 5], RunMode::Sequential, |x| Ok(x * 2))
            .unwrap();
        assert_eq!(unwrap_all(outcomes), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn parallel_outcomes_match_input_order() {
        let items: Vec<i32> = (0..50).collect();
        let outcomes = scheduler()
            .run_all(items, RunMode::Parallel, |x| Ok(x * 2))
            .unwrap();
        let expected: Vec<i32> = (0..50).map(|x| x * 2).collect();
        assert_eq!(unwrap_all(outcomes), expected);
    }

    #[test]
    fn failed_task_stays_in_slot_without_affecting_siblings() {
        for mode in [RunMode::Sequential, RunMode::Parallel] {
            let outcomes = scheduler()
                .run_all(vec![1, 2, 3, 4, 5], mode, |x| {
                    if x == 3 {
                        Err(anyhow::anyhow!("boom at {x}"))
                    } else {
                        Ok(x * 2)
                    }
                })
                .unwrap();

            assert_eq!(outcomes.len(), 5);
            assert_eq!(outcomes[0], Ok(2));
            assert_eq!(outcomes[1], Ok(4));
            assert!(outcomes[2].as_ref().unwrap_err().contains("boom at 3"));
            assert_eq!(outcomes[3], Ok(8));
            assert_eq!(outcomes[4], Ok(10));
        }
    }

    #[test]
    fn empty_batch_returns_empty() {
        let outcomes = scheduler()
            .run_all(Vec::<i32>::new(), RunMode::Parallel, |x| Ok(x))
            .unwrap();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn worker_count_never_exceeds_task_count() {
        let workers = scheduler().worker_count(2);
        assert!(workers >= 1);
        assert!(workers <= 2);
    }

    #[test]
    fn fixed_pool_size_wins_over_core_share() {
        let sched = TaskScheduler::new(PoolConfig {
            max_threads: 3,
            ..PoolConfig::default()
        });
        assert_eq!(sched.worker_count(100), 3);
        assert_eq!(sched.worker_count(2), 2);
    }

    #[test]
    fn single_worker_pool_still_completes_batch() {
        let sched = TaskScheduler::new(PoolConfig {
            max_threads: 1,
            ..PoolConfig::default()
        });
        let outcomes = sched
            .run_all((0..10).collect(), RunMode::Parallel, |x: i32| Ok(x + 1))
            .unwrap();
        assert_eq!(unwrap_all(outcomes), (1..=10).collect::<Vec<i32>>());
    }
}
