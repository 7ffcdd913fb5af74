use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gatsp::geometry::random_cities;
use gatsp::population::{evolve, random_population, refresh_fitness};
use gatsp::{GeneticSearch, Tour};
use rand::prelude::StdRng;
use rand::SeedableRng;

fn operators(c: &mut Criterion) {
    let mut rng: StdRng = SeedableRng::seed_from_u64(1337);
    let cities = random_cities(32, 256, 256, &mut rng);
    let a = Tour::random(&cities, &mut rng);
    let b = Tour::random(&cities, &mut rng);

    c.bench_function("crossover_32", |bench| {
        bench.iter(|| Tour::crossover(black_box(&a), black_box(&b), &cities))
    });

    c.bench_function("distance_32", |bench| {
        bench.iter(|| black_box(&a).calculate_distance(&cities))
    });
}

fn generations(c: &mut Criterion) {
    let mut rng: StdRng = SeedableRng::seed_from_u64(1337);
    let cities = random_cities(32, 256, 256, &mut rng);
    let mut population = random_population(&cities, 100, &mut rng);
    population.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
    refresh_fitness(&mut population);

    c.bench_function("evolve_100x32", |bench| {
        bench.iter(|| evolve(black_box(&population), 0.7, 0.05, &cities, &mut rng))
    });

    c.bench_function("search_1000_generations", |bench| {
        let search = GeneticSearch::new().generations(1000);
        bench.iter(|| search.run(&cities, &mut rng))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = operators, generations
}
criterion_main!(benches);
