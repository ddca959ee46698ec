use super::types::{GraphConfig, Point};

/// Maps grid units to drawing-surface pixels.
///
/// Grid Y grows upward while pixel Y grows downward, so vertical positions are
/// flipped against the surface height. Displacements flip sign instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
	cell_size: f64,
	width: f64,
	height: f64,
}

impl CoordinateTransform {
	pub fn new(cell_size: f64, num_x_ticks: u32, num_y_ticks: u32) -> Self {
		Self {
			cell_size,
			width: cell_size * num_x_ticks as f64,
			height: cell_size * num_y_ticks as f64,
		}
	}

	pub fn from_config(config: &GraphConfig) -> Self {
		Self::new(config.cell_size, config.num_x_ticks, config.num_y_ticks)
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn to_pixels(&self, units: f64) -> f64 {
		units * self.cell_size
	}

	pub fn to_units(&self, pixels: f64) -> f64 {
		pixels / self.cell_size
	}

	pub fn to_pixel_point(&self, grid: Point) -> Point {
		Point::new(self.to_pixels(grid.x), self.height - self.to_pixels(grid.y))
	}

	/// Pixel displacement to grid-unit components, upward-positive.
	pub fn displacement_to_units(&self, pixel: Point) -> Point {
		Point::new(self.to_units(pixel.x), -self.to_units(pixel.y))
	}

	pub fn displacement_to_pixels(&self, grid: Point) -> Point {
		Point::new(self.to_pixels(grid.x), -self.to_pixels(grid.y))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn transform() -> CoordinateTransform {
		CoordinateTransform::new(10.0, 50, 30)
	}

	#[test]
	fn surface_size() {
		let t = transform();
		assert_eq!(t.width(), 500.0);
		assert_eq!(t.height(), 300.0);
	}

	#[test]
	fn vertical_axis_is_flipped() {
		let t = transform();
		assert_eq!(t.to_pixel_point(Point::ORIGIN), Point::new(0.0, 300.0));
		assert_eq!(t.to_pixel_point(Point::new(3.0, 6.0)), Point::new(30.0, 240.0));
		// Moving up the grid moves up the screen.
		assert!(t.to_pixel_point(Point::new(0.0, 7.0)).y < t.to_pixel_point(Point::new(0.0, 6.0)).y);
	}

	#[test]
	fn points_convert_back() {
		let t = transform();
		let pixel = t.to_pixel_point(Point::new(14.0, 12.0));
		assert_eq!(t.to_units(pixel.x), 14.0);
		assert_eq!(t.to_units(t.height() - pixel.y), 12.0);
	}

	#[test]
	fn displacements_flip_sign() {
		let t = transform();
		assert_eq!(t.displacement_to_units(Point::new(30.0, -40.0)), Point::new(3.0, 4.0));
		assert_eq!(t.displacement_to_pixels(Point::new(3.0, 4.0)), Point::new(30.0, -40.0));
	}
}
