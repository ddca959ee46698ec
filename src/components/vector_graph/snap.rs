use super::types::Point;

/// Rounds surface positions to the nearest grid line, halves rounding up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSnapper {
	cell_size: f64,
}

impl GridSnapper {
	pub fn new(cell_size: f64) -> Self {
		Self { cell_size }
	}

	pub fn snap(&self, value: f64) -> f64 {
		(value / self.cell_size + 0.5).floor() * self.cell_size
	}

	pub fn snap_point(&self, point: Point) -> Point {
		Point::new(self.snap(point.x), self.snap(point.y))
	}
}

/// Sub-cell drag remainder carried between pointer events.
///
/// Rounding each delta on its own would never cross a grid line for slow drags;
/// dropping the remainder would drift. Carrying it moves the point exactly one
/// cell per cell of pointer travel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragAccumulator {
	residual: Point,
}

impl DragAccumulator {
	pub fn reset(&mut self) {
		self.residual = Point::ORIGIN;
	}

	/// Feeds one pointer delta and returns the snapped position for `current`.
	pub fn advance(&mut self, snapper: &GridSnapper, current: Point, delta: Point) -> Point {
		self.residual += delta;
		let candidate = current + self.residual;
		let snapped = snapper.snap_point(candidate);
		self.residual = candidate - snapped;
		snapped
	}
}
