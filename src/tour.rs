use crate::datastructures::BitSet;
use crate::geometry::{City, CityId};
use crate::util::is_permutation;
use rand::seq::SliceRandom;
use rand::Rng;

/// A closed circuit over all cities of a problem, stored as a permutation of
/// city ids. `distance` and `fitness` are caches that are only refreshed by
/// explicit calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    order: Vec<CityId>,
    distance: f64,
    fitness: f64,
}

impl Tour {
    /// Tour with a uniformly random order over `cities`.
    pub fn random<R: Rng + ?Sized>(cities: &[City], rng: &mut R) -> Self {
        let mut order: Vec<CityId> = (0..cities.len()).collect();
        order.shuffle(rng);
        Self::from_order(order, cities)
    }

    pub(crate) fn from_order(order: Vec<CityId>, cities: &[City]) -> Self {
        debug_assert!(is_permutation(&order, cities.len()));
        let mut tour = Self {
            order,
            distance: 0.0,
            fitness: 0.0,
        };
        tour.distance = tour.calculate_distance(cities);
        tour
    }

    pub fn order(&self) -> &[CityId] {
        self.order.as_slice()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Length of the circuit, including the edge from the last city back to the first.
    pub fn calculate_distance(&self, cities: &[City]) -> f64 {
        let (first, last) = match (self.order.first(), self.order.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };
        let open: f64 = self
            .order
            .windows(2)
            .map(|w| cities[w[0]].distance(&cities[w[1]]))
            .sum();
        open + cities[last].distance(&cities[first])
    }

    /// Sets `fitness = 1 / distance`. A zero length tour gets infinite fitness.
    pub fn calculate_fitness(&mut self) {
        self.fitness = 1.0 / self.distance;
    }

    /// Swaps two positions drawn independently (possibly the same one) and
    /// refreshes the cached distance.
    pub fn mutate<R: Rng + ?Sized>(&mut self, cities: &[City], rng: &mut R) {
        let n = self.order.len();
        if n == 0 {
            return;
        }
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        self.order.swap(i, j);
        self.distance = self.calculate_distance(cities);
    }

    /// Ordered crossover: the first half of `a` verbatim, then the cities of `b`
    /// not yet placed, in the order `b` visits them.
    pub fn crossover(a: &Tour, b: &Tour, cities: &[City]) -> Tour {
        debug_assert_eq!(a.len(), b.len());
        let n = a.len();
        let mut placed = BitSet::new(cities.len());
        let mut order: Vec<CityId> = Vec::with_capacity(n);

        for id in &a.order[..n / 2] {
            placed.set_bit(*id);
            order.push(*id);
        }
        for id in &b.order {
            if order.len() == n {
                break;
            }
            if !placed.set_bit(*id) {
                order.push(*id);
            }
        }
        Self::from_order(order, cities)
    }
}
