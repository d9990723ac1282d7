use std::cell::RefCell;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::thread::available_parallelism;

use eyre::{Result, WrapErr};
use rayon::{ThreadPool, ThreadPoolBuilder};
use thread_local::ThreadLocal;

use crate::caller::Caller;
use crate::config::Config;
use crate::reference::Reference;
use crate::result::SampleCallResult;
use crate::worker::Worker;

/// Number of threads for a requested count: zero means one thread, positive counts are capped by
/// the available parallelism, negative counts leave `|requested| - 1` cores idle.
pub fn threads(requested: isize) -> Result<usize> {
    let available = available_parallelism()
        .wrap_err("Failed to query the available parallelism")?
        .get();
    Ok(clamp_threads(requested, available))
}

fn clamp_threads(requested: isize, available: usize) -> usize {
    let available = available as isize;
    let threads = match requested.cmp(&0) {
        Ordering::Less => available + requested + 1,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(available),
    };
    threads.max(1) as usize
}

/// Calls a batch of traces in parallel against a shared reference.
///
/// Each trace is processed independently and its outcome is reported at the input position:
/// a failing trace never aborts the rest of the batch.
pub struct Genotyper {
    pool: ThreadPool,
    config: Config,
    workers: ThreadLocal<RefCell<Worker>>,
}

impl Genotyper {
    pub fn new(pool: ThreadPool, config: Config) -> Self {
        Self {
            pool,
            config,
            workers: ThreadLocal::new(),
        }
    }

    /// Genotyper with a dedicated pool, see [threads] for the meaning of `threads`.
    pub fn with_threads(threads: isize, config: Config) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self::threads(threads)?)
            .build()?;
        Ok(Self::new(pool, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Genotype every trace. Results are returned in the input order.
    pub fn run<P>(&mut self, reference: &Reference, paths: &[P]) -> Vec<Result<SampleCallResult>>
    where
        P: AsRef<Path> + Sync,
    {
        log::info!(
            "Genotyping {} traces on {} threads",
            paths.len(),
            self.pool.current_num_threads()
        );

        let caller = Caller::new(&self.config, reference);
        let workers = &self.workers;
        let collected = Mutex::new(Vec::with_capacity(paths.len()));

        self.pool.scope(|s| {
            for (ind, path) in paths.iter().enumerate() {
                let collected = &collected;
                s.spawn(move |_| {
                    let path = path.as_ref();
                    let mut worker = workers.get_or_default().borrow_mut();
                    let result = worker
                        .process(&caller, path)
                        .wrap_err_with(|| format!("Failed to genotype {}", path.display()));
                    if let Err(err) = &result {
                        log::error!("{:?}", err);
                    }
                    collected
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push((ind, result));
                });
            }
        });

        let mut collected = collected
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        collected.sort_by_key(|x| x.0);

        let failed = collected.iter().filter(|x| x.1.is_err()).count();
        log::info!(
            "Genotyped {} traces, {} failed",
            collected.len() - failed,
            failed
        );
        collected.into_iter().map(|x| x.1).collect()
    }
}
