use crate::error::{Error, Result};
use crate::geometry::City;
use crate::population::{evolve, normalize_fitness, random_population, refresh_fitness};
#[cfg(feature = "handle-ctrlc")]
use crate::signals::received_ctrl_c;
use crate::tour::Tour;
#[cfg(feature = "log")]
use log::{debug, info};
use rand::Rng;

pub const DEFAULT_GENERATIONS: usize = 100_000;
pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.70;

/// Best tour of a finished search and the number of generations it took.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best: Tour,
    pub generations: usize,
}

/// Generational genetic algorithm over the tours of a single problem.
#[derive(Clone, Debug)]
pub struct GeneticSearch {
    generations: usize,
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    stall_generations: Option<usize>,
}

impl Default for GeneticSearch {
    fn default() -> Self {
        Self {
            generations: DEFAULT_GENERATIONS,
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            stall_generations: None,
        }
    }
}

pub(crate) fn check_rate(name: &str, rate: f64) -> Result<()> {
    if rate.is_finite() && (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must lie in [0, 1], got {}",
            name, rate
        )))
    }
}

impl GeneticSearch {
    pub fn new() -> Self {
        Self::default()
    }

    impl_setter!(self, generations, usize);
    impl_setter!(self, population_size, usize);
    impl_setter!(self, mutation_rate, f64);
    impl_setter!(self, crossover_rate, f64);
    impl_setter!(self, stall_generations, Option<usize>);

    pub fn generation_budget(&self) -> usize {
        self.generations
    }

    pub fn population_count(&self) -> usize {
        self.population_size
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_rate
    }

    pub fn crossover_probability(&self) -> f64 {
        self.crossover_rate
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population size must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(Error::InvalidConfig(
                "generation budget must be at least 1".into(),
            ));
        }
        if self.stall_generations == Some(0) {
            return Err(Error::InvalidConfig(
                "stall limit must be at least 1 generation".into(),
            ));
        }
        check_rate("mutation rate", self.mutation_rate)?;
        check_rate("crossover rate", self.crossover_rate)
    }

    /// Evolves a random population over `cities` for the configured number of
    /// generations and returns the shortest tour of the final population.
    ///
    /// Runs the full budget unless a stall limit is set, or a stop was requested
    /// with the `handle-ctrlc` feature.
    pub fn run<R: Rng + ?Sized>(&self, cities: &[City], rng: &mut R) -> Result<SearchResult> {
        if cities.is_empty() {
            return Err(Error::EmptyCitySet);
        }
        self.validate()?;

        #[cfg(feature = "log")]
        debug!(
            "evolving {} tours over {} cities for {} generations",
            self.population_size,
            cities.len(),
            self.generations
        );

        let mut population = random_population(cities, self.population_size, rng);
        // selection re-sums raw fitness each generation, this has no effect on it
        refresh_fitness(&mut population);
        normalize_fitness(&mut population);

        let mut best_distance = f64::INFINITY;
        let mut last_improvement = 0;
        let mut generations = 0;
        while generations < self.generations {
            #[cfg(feature = "handle-ctrlc")]
            {
                if received_ctrl_c() {
                    #[cfg(feature = "log")]
                    info!("stop requested after {} generations", generations);
                    break;
                }
            }

            refresh_fitness(&mut population);
            population = evolve(
                &population,
                self.crossover_rate,
                self.mutation_rate,
                cities,
                rng,
            );
            generations += 1;

            if let Some(stall) = self.stall_generations {
                let current = population[0].distance();
                if current < best_distance {
                    best_distance = current;
                    last_improvement = generations;
                } else if generations - last_improvement >= stall {
                    #[cfg(feature = "log")]
                    info!(
                        "no improvement for {} generations, stopping at {}",
                        stall, generations
                    );
                    break;
                }
            }
        }

        let best = population
            .iter()
            .fold(None, |best: Option<&Tour>, tour| match best {
                Some(b) if b.distance() <= tour.distance() => Some(b),
                _ => Some(&**tour),
            })
            .cloned()
            .ok_or(Error::EmptyCitySet)?;

        Ok(SearchResult { best, generations })
    }
}
