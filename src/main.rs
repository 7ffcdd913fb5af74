use gatsp::io::write_report;
use gatsp::{Config, Orchestrator};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gatsp-cli",
    about = "Approximates euclidean TSP tours on random problems with a parallel genetic algorithm."
)]
struct Opt {
    /// Directory for results.txt, results.csv and images/.
    #[structopt(parse(from_os_str), default_value = ".")]
    output: PathBuf,

    /// Number of random problem instances.
    #[structopt(long, default_value = "6")]
    problems: usize,

    /// Number of cities per problem.
    #[structopt(long, default_value = "32")]
    cities: usize,

    /// Number of worker threads, each solves every problem.
    #[structopt(short, long, default_value = "12")]
    workers: usize,

    #[structopt(short, long, default_value = "100000")]
    generations: usize,

    #[structopt(short, long, default_value = "100")]
    population: usize,

    #[structopt(short, long, default_value = "0.05")]
    mutation_rate: f64,

    #[structopt(short, long, default_value = "0.7")]
    crossover_rate: f64,

    /// Stop a run after this many generations without improvement.
    #[structopt(long)]
    stall: Option<usize>,

    /// Width and height of the canvas, cities are placed on it.
    #[structopt(long, default_value = "256")]
    canvas: u32,

    /// Half width of the square drawn for each city.
    #[structopt(long, default_value = "10")]
    node_size: u32,

    /// Seed for reproducible problems and runs.
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[structopt(long, default_value = "info")]
    log_level: log::LevelFilter,
}

impl Opt {
    fn config(&self) -> Config {
        Config::default()
            .num_problems(self.problems)
            .num_cities(self.cities)
            .num_workers(self.workers)
            .generations(self.generations)
            .population_size(self.population)
            .mutation_rate(self.mutation_rate)
            .crossover_rate(self.crossover_rate)
            .stall_generations(self.stall)
            .canvas_width(self.canvas)
            .canvas_height(self.canvas)
            .node_size(self.node_size)
            .seed(self.seed)
            .output_dir(self.output.clone())
    }
}

fn main() {
    let opt = Opt::from_args();
    gatsp::log::build_logger_for_level(opt.log_level);

    #[cfg(feature = "handle-ctrlc")]
    {
        if let Err(e) = gatsp::signals::initialize() {
            log::warn!("could not install Ctrl-C handler: {}", e);
        }
    }

    let config = opt.config();
    log::debug!("{:?}", config);

    let report = match Orchestrator::new(config.clone()).run() {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}", e);
            process::exit(1);
        }
    };
    if let Err(e) = write_report(&report, &config) {
        log::error!("{}", e);
        process::exit(1);
    }
    for index in 0..report.problems.len() {
        if let Some(best) = report.best_for(index) {
            println!(
                "Problem #{}: best distance {:.6} by {}",
                index, best.distance, best.worker
            );
        }
    }
}
