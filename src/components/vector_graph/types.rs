use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A position or displacement on the drawing surface, in pixels unless noted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance_to(self, other: Point) -> f64 {
		(other - self).length()
	}

	pub fn scale(self, k: f64) -> Self {
		Self::new(self.x * k, self.y * k)
	}

	pub fn midpoint(self, other: Point) -> Self {
		Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

impl Add for Point {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Self) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Neg for Point {
	type Output = Self;

	fn neg(self) -> Self::Output {
		Self::new(-self.x, -self.y)
	}
}

/// The operation folded over the operand vectors to produce the resultant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Operation {
	#[default]
	Addition,
	Subtraction,
}

impl Operation {
	pub const ALL: [Operation; 2] = [Operation::Addition, Operation::Subtraction];

	pub fn label(self) -> &'static str {
		match self {
			Operation::Addition => "Addition",
			Operation::Subtraction => "Subtraction",
		}
	}

	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|op| op.label() == label)
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// One of the editable numeric fields of the details panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorField {
	Magnitude,
	Angle,
	XComponent,
	YComponent,
}

impl VectorField {
	pub const ALL: [VectorField; 4] = [
		VectorField::Magnitude,
		VectorField::Angle,
		VectorField::XComponent,
		VectorField::YComponent,
	];
}

/// Contents of a numeric field. Blank or unparseable text is `Empty`, never zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum FieldValue {
	#[default]
	Empty,
	Number(f64),
}

impl FieldValue {
	/// Parses raw input text. Anything that is not a finite number is `Empty`.
	pub fn parse(raw: &str) -> Self {
		match raw.trim().parse::<f64>() {
			Ok(value) if value.is_finite() => FieldValue::Number(value),
			_ => FieldValue::Empty,
		}
	}

	pub fn number(self) -> Option<f64> {
		match self {
			FieldValue::Number(value) => Some(value),
			FieldValue::Empty => None,
		}
	}

	/// Value used when a blank field takes part in a derived computation.
	pub fn or_zero(self) -> f64 {
		self.number().unwrap_or(0.0)
	}

	/// Text shown in the input element.
	pub fn display(self) -> String {
		match self {
			FieldValue::Number(value) => value.to_string(),
			FieldValue::Empty => String::new(),
		}
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		FieldValue::Number(value)
	}
}

/// The numeric view model of the active vector, in grid units and degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VectorDetails {
	pub magnitude: FieldValue,
	pub angle: FieldValue,
	pub x_component: FieldValue,
	pub y_component: FieldValue,
}

impl VectorDetails {
	pub fn get(&self, field: VectorField) -> FieldValue {
		match field {
			VectorField::Magnitude => self.magnitude,
			VectorField::Angle => self.angle,
			VectorField::XComponent => self.x_component,
			VectorField::YComponent => self.y_component,
		}
	}

	pub fn set(&mut self, field: VectorField, value: FieldValue) {
		match field {
			VectorField::Magnitude => self.magnitude = value,
			VectorField::Angle => self.angle = value,
			VectorField::XComponent => self.x_component = value,
			VectorField::YComponent => self.y_component = value,
		}
	}
}

/// Which part of a vector a pointer gesture grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
	/// The shaft: translates tail and head together.
	Body,
	/// The arrowhead: moves only the head.
	Head,
}

/// Fixed parameters of one graph instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphConfig {
	pub num_x_ticks: u32,
	pub num_y_ticks: u32,
	/// Pixels per grid unit.
	pub cell_size: f64,
	pub lock_to_grid: bool,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			num_x_ticks: 50,
			num_y_ticks: 30,
			cell_size: 10.0,
			lock_to_grid: true,
		}
	}
}

/// Request for a new vector, in grid units. Missing coordinates take the default placement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NewVector {
	pub start: Option<Point>,
	pub end: Option<Point>,
	pub is_resultant: bool,
	pub name: Option<char>,
}

impl NewVector {
	pub fn operand(start: Point, end: Point) -> Self {
		Self {
			start: Some(start),
			end: Some(end),
			..Self::default()
		}
	}
}
