use rand::Rng;

/// Index of a city inside the shared city array of a problem. Two cities are the
/// same city iff their ids are equal, regardless of coordinates.
pub type CityId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct City {
    pub x: i32,
    pub y: i32,
}

impl City {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &City) -> f64 {
        distance(self, other)
    }
}

#[inline]
pub fn distance(a: &City, b: &City) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// `n` cities with coordinates drawn uniformly from `[0, width) x [0, height)`.
pub fn random_cities<R: Rng + ?Sized>(n: usize, width: u32, height: u32, rng: &mut R) -> Vec<City> {
    (0..n)
        .map(|_| {
            City::new(
                rng.gen_range(0..width.max(1)) as i32,
                rng.gen_range(0..height.max(1)) as i32,
            )
        })
        .collect()
}
