use crate::geometry::City;
use crate::tour::Tour;
use rand::Rng;
use std::rc::Rc;

/// Tours of one generation, sorted ascending by distance once `evolve` returns.
/// Elites are shared with the previous generation rather than copied.
pub type Population = Vec<Rc<Tour>>;

pub fn random_population<R: Rng + ?Sized>(cities: &[City], size: usize, rng: &mut R) -> Population {
    (0..size)
        .map(|_| Rc::new(Tour::random(cities, rng)))
        .collect()
}

/// Roulette wheel selection over the cached fitness values. Falls back to the
/// first tour if rounding keeps the running total below the draw.
///
/// `population` must not be empty.
pub fn select_tour<'a, R: Rng + ?Sized>(population: &'a [Rc<Tour>], rng: &mut R) -> &'a Rc<Tour> {
    let fitness_sum: f64 = population.iter().map(|tour| tour.fitness()).sum();
    let threshold = rng.gen::<f64>() * fitness_sum;
    let mut running_total = 0.0;
    for tour in population {
        running_total += tour.fitness();
        if running_total >= threshold {
            return tour;
        }
    }
    &population[0]
}

/// Sets every fitness to `1 / distance`. Tours still shared with another
/// generation are cloned first.
pub fn refresh_fitness(population: &mut Population) {
    for tour in population.iter_mut() {
        Rc::make_mut(tour).calculate_fitness();
    }
}

/// Divides every fitness by the population's fitness sum.
pub fn normalize_fitness(population: &mut Population) {
    let fitness_sum: f64 = population.iter().map(|tour| tour.fitness()).sum();
    for tour in population.iter_mut() {
        let tour = Rc::make_mut(tour);
        let fitness = tour.fitness() / fitness_sum;
        tour.set_fitness(fitness);
    }
}

/// One generation: the first half of `population` survives as is, the second
/// half is refilled with offspring of roulette selected parents. With
/// probability `crossover_rate` an offspring is the crossover of its parents,
/// otherwise it is a fresh random tour. Each offspring is then mutated with
/// probability `mutation_rate`.
///
/// The returned population has the same size and is sorted ascending by distance.
pub fn evolve<R: Rng + ?Sized>(
    population: &[Rc<Tour>],
    crossover_rate: f64,
    mutation_rate: f64,
    cities: &[City],
    rng: &mut R,
) -> Population {
    let elites = population.len() / 2;
    let mut next: Population = Vec::with_capacity(population.len());
    next.extend(population[..elites].iter().cloned());

    for _ in elites..population.len() {
        let a = select_tour(population, rng);
        let b = select_tour(population, rng);
        let mut child = if rng.gen::<f64>() < crossover_rate {
            Tour::crossover(a, b, cities)
        } else {
            Tour::random(cities, rng)
        };
        if rng.gen::<f64>() < mutation_rate {
            child.mutate(cities, rng);
        }
        next.push(Rc::new(child));
    }

    next.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
    next
}
