use crate::error::{Error, Result};
use crate::solver::{
    GeneticSearch, DEFAULT_CROSSOVER_RATE, DEFAULT_GENERATIONS,
    DEFAULT_MUTATION_RATE, DEFAULT_POPULATION_SIZE,
};
use std::path::PathBuf;

pub const DEFAULT_NUM_PROBLEMS: usize = 6;
pub const DEFAULT_NUM_CITIES: usize = 32;
pub const DEFAULT_CANVAS_SIZE: u32 = 256;
pub const DEFAULT_NODE_SIZE: u32 = 10;
pub const DEFAULT_NUM_WORKERS: usize = 12;

/// Everything needed for a batch of runs: the problem instances, the worker
/// pool, the genetic parameters and where the output goes.
#[derive(Clone, Debug)]
pub struct Config {
    pub num_problems: usize,
    pub num_cities: usize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Half width of the square drawn for each city.
    pub node_size: u32,
    pub num_workers: usize,
    pub generations: usize,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub stall_generations: Option<usize>,
    /// Worker `i` seeds its generator with `seed + i`, problems use `seed`.
    /// Entropy is used when unset.
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_problems: DEFAULT_NUM_PROBLEMS,
            num_cities: DEFAULT_NUM_CITIES,
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            node_size: DEFAULT_NODE_SIZE,
            num_workers: DEFAULT_NUM_WORKERS,
            generations: DEFAULT_GENERATIONS,
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            stall_generations: None,
            seed: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    impl_setter!(self, num_problems, usize);
    impl_setter!(self, num_cities, usize);
    impl_setter!(self, canvas_width, u32);
    impl_setter!(self, canvas_height, u32);
    impl_setter!(self, node_size, u32);
    impl_setter!(self, num_workers, usize);
    impl_setter!(self, generations, usize);
    impl_setter!(self, population_size, usize);
    impl_setter!(self, mutation_rate, f64);
    impl_setter!(self, crossover_rate, f64);
    impl_setter!(self, stall_generations, Option<usize>);
    impl_setter!(self, seed, Option<u64>);
    impl_setter!(self, output_dir, PathBuf);

    pub fn search(&self) -> GeneticSearch {
        GeneticSearch::new()
            .generations(self.generations)
            .population_size(self.population_size)
            .mutation_rate(self.mutation_rate)
            .crossover_rate(self.crossover_rate)
            .stall_generations(self.stall_generations)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("number of problems", self.num_problems),
            ("number of cities", self.num_cities),
            ("number of workers", self.num_workers),
            ("canvas width", self.canvas_width as usize),
            ("canvas height", self.canvas_height as usize),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(Error::InvalidConfig(format!("{} must be at least 1", name)));
        }
        if self.canvas_width > i32::MAX as u32 || self.canvas_height > i32::MAX as u32 {
            return Err(Error::InvalidConfig("canvas is too large".into()));
        }
        self.search().validate()
    }
}
