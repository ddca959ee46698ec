use std::fmt;
use std::rc::Rc;

use super::snap::{DragAccumulator, GridSnapper};
use super::types::Point;

/// Name reserved for the resultant vector.
pub const RESULTANT_NAME: char = 's';

/// Capability a vector uses to report changes back to whoever owns it.
pub trait VectorEvents {
	/// Endpoints of the named vector moved.
	fn on_geometry_changed(&self, name: char);
	/// The named vector was clicked or grabbed.
	fn on_selected(&self, name: char);
}

/// One arrow on the drawing surface. Endpoints are in pixels.
pub struct Vector {
	name: char,
	color: &'static str,
	start: Point,
	end: Point,
	is_resultant: bool,
	accumulator: DragAccumulator,
	events: Rc<dyn VectorEvents>,
}

impl fmt::Debug for Vector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Vector")
			.field("name", &self.name)
			.field("color", &self.color)
			.field("start", &self.start)
			.field("end", &self.end)
			.field("is_resultant", &self.is_resultant)
			.finish_non_exhaustive()
	}
}

impl Vector {
	pub fn new(
		name: char,
		color: &'static str,
		start: Point,
		end: Point,
		is_resultant: bool,
		events: Rc<dyn VectorEvents>,
	) -> Self {
		Self {
			name,
			color,
			start,
			end,
			is_resultant,
			accumulator: DragAccumulator::default(),
			events,
		}
	}

	pub fn name(&self) -> char {
		self.name
	}

	pub fn color(&self) -> &'static str {
		self.color
	}

	pub fn start(&self) -> Point {
		self.start
	}

	pub fn end(&self) -> Point {
		self.end
	}

	pub fn is_resultant(&self) -> bool {
		self.is_resultant
	}

	pub fn displacement(&self) -> Point {
		self.end - self.start
	}

	/// Length in grid units.
	pub fn magnitude(&self, cell_size: f64) -> f64 {
		self.displacement().length() / cell_size
	}

	/// Direction on the surface in degrees. Pixel Y points down, so this is the
	/// on-screen rotation rather than the conventional angle.
	pub fn angle(&self) -> f64 {
		let d = self.displacement();
		d.y.atan2(d.x).to_degrees()
	}

	pub fn label_text(&self, cell_size: f64) -> String {
		format!("|{}| = {:.2}", self.name, self.magnitude(cell_size))
	}

	pub fn head_contains(&self, point: Point, radius: f64) -> bool {
		!self.is_resultant && self.end.distance_to(point) <= radius
	}

	/// Distance from `point` to the shaft segment.
	pub fn distance_to_body(&self, point: Point) -> f64 {
		let d = self.displacement();
		let len_sq = d.x * d.x + d.y * d.y;
		if len_sq < 1e-9 {
			return self.start.distance_to(point);
		}
		let rel = point - self.start;
		let t = ((rel.x * d.x + rel.y * d.y) / len_sq).clamp(0.0, 1.0);
		(self.start + d.scale(t)).distance_to(point)
	}

	/// Starts a pointer gesture on this vector.
	pub fn begin_drag(&mut self) {
		self.accumulator.reset();
		self.events.on_selected(self.name);
	}

	/// Translates the whole vector. With a snapper both endpoints move by the
	/// same grid-aligned shift. Returns `false` for the resultant.
	pub fn drag_body(&mut self, delta: Point, snapper: Option<&GridSnapper>) -> bool {
		if self.is_resultant {
			return false;
		}
		let shift = match snapper {
			Some(snapper) => self.accumulator.advance(snapper, self.start, delta) - self.start,
			None => delta,
		};
		self.start += shift;
		self.end += shift;
		self.events.on_geometry_changed(self.name);
		self.events.on_selected(self.name);
		true
	}

	/// Moves only the head. Returns `false` for the resultant, which has none.
	pub fn drag_head(&mut self, delta: Point, snapper: Option<&GridSnapper>) -> bool {
		if self.is_resultant {
			return false;
		}
		self.end = match snapper {
			Some(snapper) => self.accumulator.advance(snapper, self.end, delta),
			None => self.end + delta,
		};
		self.events.on_geometry_changed(self.name);
		self.events.on_selected(self.name);
		true
	}

	pub fn update_coordinates(&mut self, start: Point, end: Point) {
		self.start = start;
		self.end = end;
		self.events.on_geometry_changed(self.name);
	}

	pub fn set_end(&mut self, end: Point) {
		self.end = end;
		self.events.on_geometry_changed(self.name);
	}

	pub(crate) fn rename(&mut self, name: char) {
		self.name = name;
	}

	pub(crate) fn recolor(&mut self, color: &'static str) {
		self.color = color;
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::cell::RefCell;

	use super::*;

	#[derive(Debug, PartialEq)]
	pub(crate) enum Recorded {
		Geometry(char),
		Selected(char),
	}

	#[derive(Default)]
	pub(crate) struct Recorder(pub RefCell<Vec<Recorded>>);

	impl VectorEvents for Recorder {
		fn on_geometry_changed(&self, name: char) {
			self.0.borrow_mut().push(Recorded::Geometry(name));
		}

		fn on_selected(&self, name: char) {
			self.0.borrow_mut().push(Recorded::Selected(name));
		}
	}

	fn vector(start: Point, end: Point, is_resultant: bool) -> (Vector, Rc<Recorder>) {
		let recorder = Rc::new(Recorder::default());
		let v = Vector::new('a', "blue", start, end, is_resultant, recorder.clone());
		(v, recorder)
	}

	#[test]
	fn derived_values() {
		let (v, _) = vector(Point::new(0.0, 300.0), Point::new(30.0, 260.0), false);
		assert_eq!(v.displacement(), Point::new(30.0, -40.0));
		assert_eq!(v.magnitude(10.0), 5.0);
		assert_eq!(v.label_text(10.0), "|a| = 5.00");
		assert!((v.angle() - (-53.130102)).abs() < 1e-5);
	}

	#[test]
	fn body_drag_keeps_shape() {
		let snapper = GridSnapper::new(10.0);
		let (mut v, events) = vector(Point::new(10.0, 10.0), Point::new(40.0, 15.0), false);
		v.begin_drag();
		assert!(v.drag_body(Point::new(7.0, 2.0), Some(&snapper)));
		assert_eq!(v.start(), Point::new(20.0, 10.0));
		assert_eq!(v.end(), Point::new(50.0, 15.0));
		assert_eq!(
			*events.0.borrow(),
			vec![Recorded::Selected('a'), Recorded::Geometry('a'), Recorded::Selected('a')]
		);
	}

	#[test]
	fn head_drag_snaps_only_the_head() {
		let snapper = GridSnapper::new(10.0);
		let (mut v, _) = vector(Point::new(3.0, 3.0), Point::new(40.0, 40.0), false);
		v.begin_drag();
		v.drag_head(Point::new(6.0, -6.0), Some(&snapper));
		assert_eq!(v.start(), Point::new(3.0, 3.0));
		assert_eq!(v.end(), Point::new(50.0, 30.0));
	}

	#[test]
	fn free_drag_applies_raw_delta() {
		let (mut v, _) = vector(Point::ORIGIN, Point::new(10.0, 10.0), false);
		v.drag_body(Point::new(1.5, -2.25), None);
		assert_eq!(v.start(), Point::new(1.5, -2.25));
		assert_eq!(v.end(), Point::new(11.5, 7.75));
		v.drag_head(Point::new(0.5, 0.25), None);
		assert_eq!(v.end(), Point::new(12.0, 8.0));
	}

	#[test]
	fn resultant_cannot_be_dragged() {
		let (mut v, events) = vector(Point::ORIGIN, Point::new(10.0, 10.0), true);
		assert!(!v.drag_body(Point::new(10.0, 0.0), None));
		assert!(!v.drag_head(Point::new(10.0, 0.0), None));
		assert_eq!(v.end(), Point::new(10.0, 10.0));
		assert!(events.0.borrow().is_empty());
		assert!(!v.head_contains(Point::new(10.0, 10.0), 10.0));
	}

	#[test]
	fn hit_testing() {
		let (v, _) = vector(Point::ORIGIN, Point::new(100.0, 0.0), false);
		assert!(v.head_contains(Point::new(95.0, 5.0), 10.0));
		assert!(!v.head_contains(Point::new(80.0, 0.0), 10.0));
		assert_eq!(v.distance_to_body(Point::new(50.0, 4.0)), 4.0);
		assert_eq!(v.distance_to_body(Point::new(-3.0, -4.0)), 5.0);
	}
}
