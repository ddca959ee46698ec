use super::snap::GridSnapper;
use super::transform::CoordinateTransform;
use super::types::{FieldValue, Point, VectorDetails, VectorField};
use super::vector::Vector;

/// Fractional digits kept on recomputed components.
pub const FIELD_PRECISION: i32 = 6;

pub fn round_to_precision(value: f64) -> f64 {
	let factor = 10f64.powi(FIELD_PRECISION);
	let rounded = (value * factor).round() / factor;
	// Avoid showing "-0".
	if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn magnitude_of(x: f64, y: f64) -> f64 {
	(x * x + y * y).sqrt()
}

pub fn angle_degrees_of(x: f64, y: f64) -> f64 {
	y.atan2(x).to_degrees()
}

pub fn components_from_polar(magnitude: f64, angle_degrees: f64) -> (f64, f64) {
	let radians = angle_degrees.to_radians();
	(
		round_to_precision(magnitude * radians.cos()),
		round_to_precision(magnitude * radians.sin()),
	)
}

/// Reads the fields off a vector's endpoints.
pub fn details_from_geometry(vector: &Vector, transform: &CoordinateTransform) -> VectorDetails {
	let units = transform.displacement_to_units(vector.displacement());
	let (x, y) = (round_to_precision(units.x), round_to_precision(units.y));
	VectorDetails {
		magnitude: magnitude_of(x, y).into(),
		angle: angle_degrees_of(x, y).into(),
		x_component: x.into(),
		y_component: y.into(),
	}
}

/// Applies one field edit and recomputes the dependent fields.
///
/// Blank input only clears the edited field. A component edit derives
/// magnitude and angle; a magnitude edit keeps the angle and an angle edit
/// keeps the magnitude, re-deriving both components.
pub fn adjust_field(details: &VectorDetails, field: VectorField, raw: &str) -> VectorDetails {
	let mut updated = *details;
	let value = FieldValue::parse(raw);
	updated.set(field, value);
	let Some(number) = value.number() else {
		return updated;
	};

	let (x, y) = (details.x_component.or_zero(), details.y_component.or_zero());
	match field {
		VectorField::XComponent | VectorField::YComponent => {
			let (x, y) = (updated.x_component.or_zero(), updated.y_component.or_zero());
			updated.magnitude = magnitude_of(x, y).into();
			updated.angle = angle_degrees_of(x, y).into();
		}
		VectorField::Magnitude => {
			let angle = details.angle.number().unwrap_or_else(|| angle_degrees_of(x, y));
			let (nx, ny) = components_from_polar(number, angle);
			updated.x_component = nx.into();
			updated.y_component = ny.into();
		}
		VectorField::Angle => {
			let magnitude = details.magnitude.number().unwrap_or_else(|| magnitude_of(x, y));
			let (nx, ny) = components_from_polar(magnitude, number);
			updated.x_component = nx.into();
			updated.y_component = ny.into();
		}
	}
	updated
}

/// Endpoints a commit writes back: the start stays (snapped when locked) and
/// the head is placed by the components. `None` while a component is blank.
pub fn committed_endpoints(
	start: Point,
	details: &VectorDetails,
	transform: &CoordinateTransform,
	snapper: Option<&GridSnapper>,
) -> Option<(Point, Point)> {
	let components = Point::new(details.x_component.number()?, details.y_component.number()?);
	let start = snapper.map_or(start, |s| s.snap_point(start));
	let end = start + transform.displacement_to_pixels(components);
	let end = snapper.map_or(end, |s| s.snap_point(end));
	Some((start, end))
}

/// Where the active vector sits in the edit cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
	/// Fields mirror the geometry.
	Selected,
	/// Fields hold edits not yet written to the geometry.
	Editing,
}

/// Tracks the active vector and its field view model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailSynchronizer {
	active: Option<(char, EditPhase)>,
	details: VectorDetails,
}

impl DetailSynchronizer {
	pub fn active(&self) -> Option<char> {
		self.active.map(|(name, _)| name)
	}

	pub fn phase(&self) -> Option<EditPhase> {
		self.active.map(|(_, phase)| phase)
	}

	pub fn details(&self) -> Option<&VectorDetails> {
		self.active.map(|_| &self.details)
	}

	pub fn select(&mut self, vector: &Vector, transform: &CoordinateTransform) {
		self.active = Some((vector.name(), EditPhase::Selected));
		self.details = details_from_geometry(vector, transform);
	}

	/// Geometry moved under the fields; pending edits are discarded.
	pub fn refresh(&mut self, vector: &Vector, transform: &CoordinateTransform) {
		if self.active() == Some(vector.name()) {
			self.select(vector, transform);
		}
	}

	pub fn edit(&mut self, field: VectorField, raw: &str) -> bool {
		let Some((name, _)) = self.active else {
			return false;
		};
		self.details = adjust_field(&self.details, field, raw);
		self.active = Some((name, EditPhase::Editing));
		true
	}

	pub fn clear(&mut self) {
		self.active = None;
		self.details = VectorDetails::default();
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use proptest::prelude::*;

	use super::*;
	use crate::components::vector_graph::vector::tests::Recorder;

	fn number(value: FieldValue) -> f64 {
		value.number().unwrap()
	}

	fn transform() -> CoordinateTransform {
		CoordinateTransform::new(10.0, 50, 30)
	}

	fn vector(start: Point, end: Point) -> Vector {
		Vector::new('a', "blue", start, end, false, Rc::new(Recorder::default()))
	}

	#[test]
	fn three_four_five() {
		let v = vector(Point::new(0.0, 300.0), Point::new(30.0, 260.0));
		let d = details_from_geometry(&v, &transform());
		assert_eq!(d.x_component, FieldValue::Number(3.0));
		assert_eq!(d.y_component, FieldValue::Number(4.0));
		assert_eq!(d.magnitude, FieldValue::Number(5.0));
		assert!((number(d.angle) - 53.13).abs() < 0.01);
	}

	#[test]
	fn component_edit_derives_polar() {
		let start = VectorDetails {
			x_component: 3.0.into(),
			y_component: 0.0.into(),
			magnitude: 3.0.into(),
			angle: 0.0.into(),
		};
		let d = adjust_field(&start, VectorField::YComponent, "4");
		assert_eq!(d.magnitude, FieldValue::Number(5.0));
		assert!((number(d.angle) - 53.130102).abs() < 1e-5);
		assert_eq!(d.x_component, FieldValue::Number(3.0));
	}

	#[test]
	fn magnitude_edit_keeps_angle() {
		let start = adjust_field(&VectorDetails::default(), VectorField::XComponent, "3");
		let start = adjust_field(&start, VectorField::YComponent, "4");
		let d = adjust_field(&start, VectorField::Magnitude, "10");
		assert_eq!(d.x_component, FieldValue::Number(6.0));
		assert_eq!(d.y_component, FieldValue::Number(8.0));
		assert_eq!(d.angle, start.angle);
	}

	#[test]
	fn angle_edit_keeps_magnitude() {
		let start = adjust_field(&VectorDetails::default(), VectorField::XComponent, "2");
		let d = adjust_field(&start, VectorField::Angle, "90");
		assert_eq!(d.x_component, FieldValue::Number(0.0));
		assert_eq!(d.y_component, FieldValue::Number(2.0));
		assert_eq!(d.magnitude, FieldValue::Number(2.0));
	}

	#[test]
	fn zero_magnitude_keeps_direction() {
		let start = adjust_field(&VectorDetails::default(), VectorField::YComponent, "5");
		let zeroed = adjust_field(&start, VectorField::Magnitude, "0");
		let regrown = adjust_field(&zeroed, VectorField::Magnitude, "3");
		assert_eq!(regrown.x_component, FieldValue::Number(0.0));
		assert_eq!(regrown.y_component, FieldValue::Number(3.0));
	}

	#[test]
	fn blank_input_clears_only_that_field() {
		let start = adjust_field(&VectorDetails::default(), VectorField::XComponent, "3");
		let d = adjust_field(&start, VectorField::XComponent, "");
		assert_eq!(d.x_component, FieldValue::Empty);
		assert_eq!(d.magnitude, start.magnitude);
		assert_eq!(d.angle, start.angle);
	}

	#[test]
	fn commit_places_head_from_components() {
		let details = adjust_field(&VectorDetails::default(), VectorField::XComponent, "3");
		let details = adjust_field(&details, VectorField::YComponent, "4");
		let start = Point::new(12.0, 298.0);
		let t = transform();

		let free = committed_endpoints(start, &details, &t, None);
		assert_eq!(free, Some((start, Point::new(42.0, 258.0))));

		let snapper = GridSnapper::new(10.0);
		let locked = committed_endpoints(start, &details, &t, Some(&snapper));
		assert_eq!(locked, Some((Point::new(10.0, 300.0), Point::new(40.0, 260.0))));

		let blank = adjust_field(&details, VectorField::YComponent, "");
		assert_eq!(committed_endpoints(start, &blank, &t, None), None);
	}

	#[test]
	fn synchronizer_phases() {
		let t = transform();
		let v = vector(Point::new(0.0, 300.0), Point::new(30.0, 260.0));
		let mut sync = DetailSynchronizer::default();
		assert!(!sync.edit(VectorField::Angle, "10"));
		assert_eq!(sync.phase(), None);

		sync.select(&v, &t);
		assert_eq!(sync.phase(), Some(EditPhase::Selected));
		assert!(sync.edit(VectorField::Angle, "0"));
		assert_eq!(sync.phase(), Some(EditPhase::Editing));
		assert_eq!(sync.details().map(|d| d.x_component), Some(FieldValue::Number(5.0)));

		sync.refresh(&v, &t);
		assert_eq!(sync.phase(), Some(EditPhase::Selected));
		assert_eq!(sync.details().map(|d| d.x_component), Some(FieldValue::Number(3.0)));

		sync.clear();
		assert_eq!(sync.active(), None);
		assert_eq!(sync.details(), None);
	}

	proptest! {
		#[test]
		fn polar_round_trip(magnitude in 0.1f64..1000.0, angle in -720.0f64..720.0) {
			let (x, y) = components_from_polar(magnitude, angle);
			let m = magnitude_of(x, y);
			let theta = angle_degrees_of(x, y);
			prop_assert!((m - magnitude).abs() < 1e-5);
			let diff = (theta - angle).rem_euclid(360.0);
			let diff = diff.min(360.0 - diff);
			prop_assert!(diff < 1e-3, "angle {} came back as {}", angle, theta);
		}
	}
}
