use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::City;
use crate::tour::Tour;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::Path;

/// Draws a tour as black squares for the cities joined by a closed polyline.
#[derive(Clone, Copy, Debug)]
pub struct TourRenderer {
    width: u32,
    height: u32,
    node_size: u32,
}

impl TourRenderer {
    pub fn new(width: u32, height: u32, node_size: u32) -> Self {
        Self {
            width,
            height,
            node_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.canvas_width, config.canvas_height, config.node_size)
    }

    /// Writes a PNG to `path`. Fails if the file cannot be written.
    pub fn render_to_file(&self, tour: &Tour, cities: &[City], path: &Path) -> Result<()> {
        let area = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(&area, tour, cities)
            .and_then(|_| area.present())
            .map_err(|e| Error::Render(format!("{}: {}", path.display(), e)))
    }

    /// Draws into an RGB buffer of `width * height * 3` bytes.
    pub fn render_to_buffer(&self, tour: &Tour, cities: &[City], buffer: &mut [u8]) -> Result<()> {
        let area =
            BitMapBackend::with_buffer(buffer, (self.width, self.height)).into_drawing_area();
        self.draw(&area, tour, cities)
            .and_then(|_| area.present())
            .map_err(|e| Error::Render(e.to_string()))
    }

    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        tour: &Tour,
        cities: &[City],
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        area.fill(&WHITE)?;
        let s = self.node_size as i32;
        let mut points: Vec<(i32, i32)> = tour
            .order()
            .iter()
            .map(|id| (cities[*id].x, cities[*id].y))
            .collect();
        for (x, y) in &points {
            area.draw(&Rectangle::new(
                [(x - s, y - s), (x + s, y + s)],
                BLACK.filled(),
            ))?;
        }
        if let Some(first) = points.first().copied() {
            points.push(first);
            area.draw(&PathElement::new(points, BLACK.stroke_width(1)))?;
        }
        Ok(())
    }
}
