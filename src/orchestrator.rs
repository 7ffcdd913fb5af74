use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::{random_cities, City};
use crate::solver::{GeneticSearch, SearchResult};
use crate::tour::Tour;
use fxhash::FxHashMap;
#[cfg(feature = "log")]
use log::{info, warn};
use rand::prelude::StdRng;
use rand::SeedableRng;
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A problem instance. The cities are shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct Problem {
    pub index: usize,
    pub cities: Arc<[City]>,
}

impl Problem {
    pub fn new(index: usize, cities: Vec<City>) -> Self {
        Self {
            index,
            cities: cities.into(),
        }
    }
}

pub fn generate_problems(config: &Config, rng: &mut StdRng) -> Vec<Problem> {
    (0..config.num_problems)
        .map(|index| {
            Problem::new(
                index,
                random_cities(
                    config.num_cities,
                    config.canvas_width,
                    config.canvas_height,
                    rng,
                ),
            )
        })
        .collect()
}

#[derive(Clone, Debug)]
pub struct RunResult {
    pub worker: String,
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub problem: usize,
    pub distance: f64,
    pub elapsed: Duration,
    pub tour: Tour,
}

#[derive(Clone, Debug)]
pub struct RunFailure {
    pub worker: String,
    pub problem: usize,
    pub message: String,
}

#[derive(Clone, Debug)]
pub enum RunOutcome {
    Completed(RunResult),
    Failed(RunFailure),
}

impl RunOutcome {
    pub fn worker(&self) -> &str {
        match self {
            RunOutcome::Completed(result) => &result.worker,
            RunOutcome::Failed(failure) => &failure.worker,
        }
    }

    pub fn problem(&self) -> usize {
        match self {
            RunOutcome::Completed(result) => result.problem,
            RunOutcome::Failed(failure) => failure.problem,
        }
    }

    pub fn completed(&self) -> Option<&RunResult> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            RunOutcome::Failed(_) => None,
        }
    }
}

/// All outcomes of a batch, in the order the collector received them.
#[derive(Clone, Debug)]
pub struct Report {
    pub problems: Vec<Problem>,
    pub outcomes: Vec<RunOutcome>,
}

impl Report {
    pub fn completed(&self) -> impl Iterator<Item = &RunResult> {
        self.outcomes.iter().filter_map(RunOutcome::completed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunFailure> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            RunOutcome::Failed(failure) => Some(failure),
            RunOutcome::Completed(_) => None,
        })
    }

    /// Outcomes grouped by problem index, arrival order kept within a group.
    pub fn by_problem(&self) -> FxHashMap<usize, Vec<&RunOutcome>> {
        let mut groups: FxHashMap<usize, Vec<&RunOutcome>> = FxHashMap::default();
        for outcome in &self.outcomes {
            groups.entry(outcome.problem()).or_default().push(outcome);
        }
        groups
    }

    pub fn best_for(&self, problem: usize) -> Option<&RunResult> {
        self.completed()
            .filter(|result| result.problem == problem)
            .fold(None, |best: Option<&RunResult>, result| match best {
                Some(b) if b.distance <= result.distance => Some(b),
                _ => Some(result),
            })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "run panicked".to_string()
    }
}

/// Runs one search and turns an error or a panic into a failure record, so that
/// every run yields exactly one outcome.
pub fn run_isolated(
    worker: &str,
    problem: &Problem,
    search: &GeneticSearch,
    rng: &mut StdRng,
) -> RunOutcome {
    isolate(worker, problem.index, search, || search.run(&problem.cities, rng))
}

fn isolate<F>(worker: &str, problem: usize, search: &GeneticSearch, run: F) -> RunOutcome
where
    F: FnOnce() -> Result<SearchResult>,
{
    let start = Instant::now();
    let failure = |message: String| {
        RunOutcome::Failed(RunFailure {
            worker: worker.to_string(),
            problem,
            message,
        })
    };
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(found)) => RunOutcome::Completed(RunResult {
            worker: worker.to_string(),
            generations: found.generations,
            population_size: search.population_count(),
            mutation_rate: search.mutation_probability(),
            crossover_rate: search.crossover_probability(),
            problem,
            distance: found.best.distance(),
            elapsed: start.elapsed(),
            tour: found.best,
        }),
        Ok(Err(e)) => failure(e.to_string()),
        Err(payload) => failure(panic_message(payload)),
    }
}

#[cfg(feature = "log")]
fn log_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Completed(result) => info!(
            "{} problem {} distance {:.6} time {:?}",
            result.worker, result.problem, result.distance, result.elapsed
        ),
        RunOutcome::Failed(failure) => warn!(
            "{} problem {} failed: {}",
            failure.worker, failure.problem, failure.message
        ),
    }
}

fn work(
    worker: String,
    problems: Vec<Problem>,
    search: GeneticSearch,
    mut rng: StdRng,
    results: SyncSender<RunOutcome>,
) {
    for problem in &problems {
        let outcome = run_isolated(&worker, problem, &search, &mut rng);
        if results.send(outcome).is_err() {
            // collector is gone, nobody is waiting for the remaining runs
            return;
        }
    }
}

/// Starts workers `1..=count`. When one cannot be started, no further worker is
/// attempted and the handles of those already running are returned with the error.
fn spawn_workers<S>(
    count: usize,
    mut spawn: S,
) -> std::result::Result<Vec<JoinHandle<()>>, (io::Error, Vec<JoinHandle<()>>)>
where
    S: FnMut(usize) -> io::Result<JoinHandle<()>>,
{
    let mut handles = Vec::with_capacity(count);
    for i in 1..=count {
        match spawn(i) {
            Ok(handle) => handles.push(handle),
            Err(e) => return Err((e, handles)),
        }
    }
    Ok(handles)
}

fn join_workers(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if handle.join().is_err() {
            #[cfg(feature = "log")]
            warn!("a worker panicked after delivering its results");
        }
    }
}

/// Runs every problem on every worker thread and collects one outcome per
/// (worker, problem) pair.
pub struct Orchestrator {
    config: Config,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<Report> {
        self.config.validate()?;
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let problems = generate_problems(&self.config, &mut rng);
        self.run_problems(problems)
    }

    /// Blocks until exactly `num_workers * problems.len()` outcomes arrived.
    pub fn run_problems(&self, problems: Vec<Problem>) -> Result<Report> {
        self.config.validate()?;
        let search = self.config.search();
        let expected = self.config.num_workers * problems.len();

        #[cfg(feature = "log")]
        info!(
            "starting {} workers on {} problems",
            self.config.num_workers,
            problems.len()
        );

        let (sender, receiver) = mpsc::sync_channel(expected);
        let spawned = spawn_workers(self.config.num_workers, |i| {
            let name = format!("Thread-{}", i);
            let rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => StdRng::from_entropy(),
            };
            let problems = problems.clone();
            let search = search.clone();
            let sender = sender.clone();
            let worker = name.clone();
            thread::Builder::new()
                .name(name)
                .spawn(move || work(worker, problems, search, rng, sender))
        });
        drop(sender);
        let handles = match spawned {
            Ok(handles) => handles,
            Err((e, started)) => {
                // started workers stop at their next send
                drop(receiver);
                join_workers(started);
                return Err(e.into());
            }
        };

        let mut outcomes = Vec::with_capacity(expected);
        while outcomes.len() < expected {
            let outcome = receiver.recv().map_err(|_| Error::WorkerDisconnected {
                received: outcomes.len(),
                expected,
            })?;
            #[cfg(feature = "log")]
            log_outcome(&outcome);
            outcomes.push(outcome);
        }
        join_workers(handles);

        Ok(Report { problems, outcomes })
    }
}
