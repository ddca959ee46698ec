use indexmap::IndexMap;
use log::debug;

use super::types::Point;
use super::vector::Vector;

pub const STROKE_WIDTH: f64 = 4.0;
/// Arrowhead length, in stroke widths.
pub const ARROWHEAD_SIZE: f64 = 4.0;
pub const HEAD_HIT_RADIUS: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LabelVisual {
	pub anchor: Point,
	/// Degrees, kept within ±90 so the text never reads upside down.
	pub rotation: f64,
	pub text: String,
}

/// Everything the painter needs for one arrow.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorVisual {
	pub name: char,
	pub color: &'static str,
	pub start: Point,
	/// Where the shaft stops so the arrowhead covers the tip.
	pub shaft_end: Point,
	pub tip: Point,
	/// Unit direction from tail to tip; zero for a degenerate arrow.
	pub direction: Point,
	pub label: LabelVisual,
	pub head_hitbox: Option<Point>,
}

impl VectorVisual {
	pub fn arrow_length() -> f64 {
		STROKE_WIDTH * ARROWHEAD_SIZE
	}

	fn from_vector(vector: &Vector, cell_size: f64) -> Self {
		let (start, tip) = (vector.start(), vector.end());
		let length = start.distance_to(tip);
		let direction = if length < 0.001 {
			Point::ORIGIN
		} else {
			(tip - start).scale(1.0 / length)
		};
		let inset = (Self::arrow_length() / 2.0).min(length);
		Self {
			name: vector.name(),
			color: vector.color(),
			start,
			shaft_end: tip - direction.scale(inset),
			tip,
			direction,
			label: LabelVisual {
				anchor: start.midpoint(tip),
				rotation: readable_rotation(vector.angle()),
				text: vector.label_text(cell_size),
			},
			head_hitbox: (!vector.is_resultant()).then_some(tip),
		}
	}
}

pub fn readable_rotation(angle: f64) -> f64 {
	if angle > 90.0 {
		angle - 180.0
	} else if angle < -90.0 {
		angle + 180.0
	} else {
		angle
	}
}

/// Retained display list, one visual per vector, painted in insertion order.
#[derive(Clone, Debug)]
pub struct Scene {
	visuals: IndexMap<char, VectorVisual>,
	cell_size: f64,
	dirty: bool,
}

impl Scene {
	pub fn new(cell_size: f64) -> Self {
		Self {
			visuals: IndexMap::new(),
			cell_size,
			dirty: true,
		}
	}

	pub fn draw_vector(&mut self, vector: &Vector) {
		debug!("Drawing vector {}", vector.name());
		self.visuals
			.insert(vector.name(), VectorVisual::from_vector(vector, self.cell_size));
		self.dirty = true;
	}

	pub fn redraw_vector(&mut self, vector: &Vector) {
		match self.visuals.get_mut(&vector.name()) {
			Some(visual) => *visual = VectorVisual::from_vector(vector, self.cell_size),
			None => {
				self.draw_vector(vector);
				return;
			}
		}
		self.dirty = true;
	}

	pub fn remove_vector_visual(&mut self, name: char) {
		if self.visuals.shift_remove(&name).is_some() {
			debug!("Removed visual for vector {name}");
			self.dirty = true;
		}
	}

	/// Re-keys a visual after renaming; call `redraw_vector` to refresh its text and color.
	pub fn rename_vector_visual(&mut self, from: char, to: char) {
		if let Some(index) = self.visuals.get_index_of(&from) {
			if let Some((_, visual)) = self.visuals.shift_remove_index(index) {
				self.visuals.shift_insert(index, to, visual);
				self.dirty = true;
			}
		}
	}

	pub fn visuals(&self) -> impl Iterator<Item = &VectorVisual> {
		self.visuals.values()
	}

	pub fn mark_dirty(&mut self) {
		self.dirty = true;
	}

	/// Returns whether a repaint is due and clears the flag.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::*;
	use crate::components::vector_graph::vector::tests::Recorder;

	fn vector(name: char, start: Point, end: Point, is_resultant: bool) -> Vector {
		Vector::new(name, "blue", start, end, is_resultant, Rc::new(Recorder::default()))
	}

	fn visual(scene: &Scene, name: char) -> &VectorVisual {
		scene.visuals().find(|v| v.name == name).unwrap()
	}

	#[test]
	fn visual_geometry() {
		let mut scene = Scene::new(10.0);
		scene.draw_vector(&vector('a', Point::ORIGIN, Point::new(100.0, 0.0), false));
		let visual = visual(&scene, 'a');
		assert_eq!(visual.tip, Point::new(100.0, 0.0));
		assert_eq!(visual.shaft_end, Point::new(92.0, 0.0));
		assert_eq!(visual.direction, Point::new(1.0, 0.0));
		assert_eq!(visual.label.anchor, Point::new(50.0, 0.0));
		assert_eq!(visual.label.text, "|a| = 10.00");
		assert_eq!(visual.head_hitbox, Some(Point::new(100.0, 0.0)));
	}

	#[test]
	fn resultant_has_no_hitbox() {
		let mut scene = Scene::new(10.0);
		scene.draw_vector(&vector('s', Point::ORIGIN, Point::new(0.0, 10.0), true));
		assert_eq!(visual(&scene, 's').head_hitbox, None);
	}

	#[test]
	fn degenerate_arrow() {
		let mut scene = Scene::new(10.0);
		scene.draw_vector(&vector('a', Point::new(5.0, 5.0), Point::new(5.0, 5.0), false));
		let visual = visual(&scene, 'a');
		assert_eq!(visual.direction, Point::ORIGIN);
		assert_eq!(visual.shaft_end, Point::new(5.0, 5.0));
	}

	#[test]
	fn labels_stay_upright() {
		assert_eq!(readable_rotation(45.0), 45.0);
		assert_eq!(readable_rotation(180.0), 0.0);
		assert_eq!(readable_rotation(135.0), -45.0);
		assert_eq!(readable_rotation(-135.0), 45.0);
		assert_eq!(readable_rotation(-90.0), -90.0);
	}

	#[test]
	fn remove_and_rename_keep_paint_order() {
		let mut scene = Scene::new(10.0);
		for name in ['s', 'a', 'b', 'c'] {
			scene.draw_vector(&vector(name, Point::ORIGIN, Point::new(10.0, 0.0), name == 's'));
		}
		assert!(scene.take_dirty());
		assert!(!scene.take_dirty());

		scene.remove_vector_visual('b');
		scene.rename_vector_visual('c', 'b');
		let order: Vec<char> = scene.visuals().map(|v| v.name).collect();
		// Keys move immediately; the stored name follows on the next redraw.
		assert_eq!(scene.visuals.get(&'b').map(|v| v.name), Some('c'));
		assert_eq!(order, vec!['s', 'a', 'c']);
		assert!(scene.take_dirty());

		scene.redraw_vector(&vector('b', Point::ORIGIN, Point::new(20.0, 0.0), false));
		let order: Vec<char> = scene.visuals().map(|v| v.name).collect();
		assert_eq!(order, vec!['s', 'a', 'b']);
	}
}
