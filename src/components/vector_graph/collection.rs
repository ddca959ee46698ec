use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use super::error::GraphError;
use super::types::Point;
use super::vector::{RESULTANT_NAME, Vector, VectorEvents};

/// Slot 0 belongs to the resultant; operand `i` takes slot `i + 1`.
pub const PALETTE: [&str; 11] = [
	"red",
	"blue",
	"green",
	"purple",
	"orange",
	"black",
	"brown",
	"#fcba03",
	"magenta",
	"darkgreen",
	"darkorange",
];

pub const MAX_OPERANDS: usize = 10;
pub const MIN_OPERANDS: usize = 2;

/// A name change produced by renumbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rename {
	pub from: char,
	pub to: char,
}

pub fn operand_name(index: usize) -> Option<char> {
	('a'..='z').filter(|&c| c != RESULTANT_NAME).nth(index)
}

pub fn is_operand_name(name: char) -> bool {
	name.is_ascii_lowercase() && name != RESULTANT_NAME
}

pub fn operand_color(index: usize) -> &'static str {
	PALETTE[(index + 1) % PALETTE.len()]
}

/// Owns every vector, keyed by name in creation order. The resultant is
/// tracked by name only and is excluded from operand iteration.
pub struct VectorCollection {
	vectors: IndexMap<char, Vector>,
	resultant: Option<char>,
	events: Rc<dyn VectorEvents>,
}

impl VectorCollection {
	pub fn new(events: Rc<dyn VectorEvents>) -> Self {
		Self {
			vectors: IndexMap::new(),
			resultant: None,
			events,
		}
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn operand_count(&self) -> usize {
		self.len() - usize::from(self.resultant.is_some())
	}

	pub fn get(&self, name: char) -> Option<&Vector> {
		self.vectors.get(&name)
	}

	pub fn get_mut(&mut self, name: char) -> Option<&mut Vector> {
		self.vectors.get_mut(&name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Vector> {
		self.vectors.values()
	}

	pub fn operands(&self) -> impl Iterator<Item = &Vector> {
		self.vectors.values().filter(|v| !v.is_resultant())
	}

	pub fn resultant_name(&self) -> Option<char> {
		self.resultant
	}

	pub fn resultant(&self) -> Option<&Vector> {
		self.resultant.and_then(|name| self.vectors.get(&name))
	}

	pub fn resultant_mut(&mut self) -> Option<&mut Vector> {
		self.resultant.and_then(|name| self.vectors.get_mut(&name))
	}

	pub fn is_resultant(&self, name: char) -> bool {
		self.resultant_name() == Some(name)
	}

	pub fn can_add(&self) -> bool {
		self.operand_count() < MAX_OPERANDS
	}

	pub fn can_delete(&self, name: char) -> bool {
		!self.is_resultant(name) && self.vectors.contains_key(&name) && self.operand_count() > MIN_OPERANDS
	}

	/// Lowest letter no vector holds yet.
	fn first_free_name(&self) -> Option<char> {
		(0..)
			.map_while(operand_name)
			.find(|name| !self.vectors.contains_key(name))
	}

	/// Creates a vector from pixel endpoints and returns its name.
	pub fn insert(
		&mut self,
		start: Point,
		end: Point,
		is_resultant: bool,
		explicit_name: Option<char>,
	) -> Result<char, GraphError> {
		let (name, color) = if is_resultant {
			if self.resultant.is_some() {
				return Err(GraphError::ResultantExists);
			}
			(explicit_name.unwrap_or(RESULTANT_NAME), PALETTE[0])
		} else {
			let index = self.operand_count();
			if index >= MAX_OPERANDS {
				return Err(GraphError::CapacityReached { max: MAX_OPERANDS });
			}
			let name = match explicit_name {
				Some(name) if !is_operand_name(name) => return Err(GraphError::InvalidName(name)),
				Some(name) => name,
				None => self
					.first_free_name()
					.ok_or(GraphError::CapacityReached { max: MAX_OPERANDS })?,
			};
			(name, operand_color(index))
		};
		if self.vectors.contains_key(&name) {
			return Err(GraphError::NameTaken(name));
		}

		let vector = Vector::new(name, color, start, end, is_resultant, self.events.clone());
		self.vectors.insert(name, vector);
		if is_resultant {
			self.resultant = Some(name);
		}
		Ok(name)
	}

	/// Removes an operand and renumbers the rest. Returns the removed vector and
	/// the renames applied to the survivors.
	pub fn remove(&mut self, name: char) -> Result<(Vector, Vec<Rename>), GraphError> {
		if self.is_resultant(name) {
			return Err(GraphError::ResultantReadOnly);
		}
		if !self.vectors.contains_key(&name) {
			return Err(GraphError::UnknownVector(name));
		}
		if self.operand_count() <= MIN_OPERANDS {
			return Err(GraphError::MinimumOperands { min: MIN_OPERANDS });
		}
		let Some(removed) = self.vectors.shift_remove(&name) else {
			return Err(GraphError::UnknownVector(name));
		};
		let renames = self.renumber();
		Ok((removed, renames))
	}

	/// Reassigns letters and colors to operands by position so they stay
	/// contiguous. The resultant is kept first and untouched.
	pub fn renumber(&mut self) -> Vec<Rename> {
		let old = std::mem::take(&mut self.vectors);
		let mut renames = Vec::new();
		let mut operands = Vec::with_capacity(old.len());

		for (name, vector) in old {
			if Some(name) == self.resultant {
				self.vectors.insert(name, vector);
			} else {
				operands.push(vector);
			}
		}

		for (index, mut vector) in operands.into_iter().enumerate() {
			let from = vector.name();
			// Bounded by MAX_OPERANDS, well inside the alphabet.
			let to = operand_name(index).unwrap_or(from);
			vector.rename(to);
			vector.recolor(operand_color(index));
			if from != to {
				debug!("Renamed vector {from} to {to}");
				renames.push(Rename { from, to });
			}
			self.vectors.insert(to, vector);
		}
		renames
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::vector_graph::vector::tests::Recorder;

	fn collection_with(operands: usize) -> VectorCollection {
		let mut c = VectorCollection::new(Rc::new(Recorder::default()));
		c.insert(Point::ORIGIN, Point::ORIGIN, true, None).unwrap();
		for i in 0..operands {
			let end = Point::new(10.0 * (i + 1) as f64, 0.0);
			c.insert(Point::ORIGIN, end, false, None).unwrap();
		}
		c
	}

	fn names(c: &VectorCollection) -> Vec<char> {
		c.operands().map(|v| v.name()).collect()
	}

	fn colors(c: &VectorCollection) -> Vec<&'static str> {
		c.operands().map(|v| v.color()).collect()
	}

	#[test]
	fn letters_skip_the_resultant_name() {
		let letters: Vec<char> = (0..20).filter_map(operand_name).collect();
		assert!(!letters.contains(&RESULTANT_NAME));
		assert_eq!(operand_name(0), Some('a'));
		assert_eq!(operand_name(18), Some('t'));
		assert_eq!(operand_name(25), None);
	}

	#[test]
	fn names_and_colors_follow_creation_order() {
		let c = collection_with(3);
		assert_eq!(names(&c), vec!['a', 'b', 'c']);
		assert_eq!(colors(&c), vec!["blue", "green", "purple"]);
		assert_eq!(c.resultant().map(|v| v.color()), Some("red"));
		assert_eq!(c.operand_count(), 3);
		assert_eq!(c.len(), 4);
	}

	#[test]
	fn eleventh_operand_is_refused() {
		let mut c = collection_with(MAX_OPERANDS);
		assert!(!c.can_add());
		assert_eq!(
			c.insert(Point::ORIGIN, Point::ORIGIN, false, None),
			Err(GraphError::CapacityReached { max: MAX_OPERANDS })
		);
		assert_eq!(c.len(), MAX_OPERANDS + 1);
	}

	#[test]
	fn only_one_resultant() {
		let mut c = collection_with(2);
		assert_eq!(
			c.insert(Point::ORIGIN, Point::ORIGIN, true, None),
			Err(GraphError::ResultantExists)
		);
	}

	#[test]
	fn explicit_names_must_be_free() {
		let mut c = collection_with(2);
		assert_eq!(
			c.insert(Point::ORIGIN, Point::ORIGIN, false, Some('a')),
			Err(GraphError::NameTaken('a'))
		);
		assert_eq!(c.insert(Point::ORIGIN, Point::ORIGIN, false, Some('z')), Ok('z'));
	}

	#[test]
	fn explicit_names_must_be_operand_letters() {
		let mut c = collection_with(2);
		for bad in [RESULTANT_NAME, '7', 'A', 'é'] {
			assert_eq!(
				c.insert(Point::ORIGIN, Point::ORIGIN, false, Some(bad)),
				Err(GraphError::InvalidName(bad))
			);
		}
		assert_eq!(c.operand_count(), 2);
	}

	#[test]
	fn auto_names_skip_letters_taken_explicitly() {
		let mut c = collection_with(2);
		assert_eq!(c.insert(Point::ORIGIN, Point::ORIGIN, false, Some('d')), Ok('d'));
		assert!(c.can_add());
		assert_eq!(c.insert(Point::ORIGIN, Point::ORIGIN, false, None), Ok('c'));
		assert_eq!(c.insert(Point::ORIGIN, Point::ORIGIN, false, None), Ok('e'));
		while c.can_add() {
			c.insert(Point::ORIGIN, Point::ORIGIN, false, None).unwrap();
		}
		assert_eq!(c.operand_count(), MAX_OPERANDS);
	}

	#[test]
	fn delete_renumbers_contiguously() {
		let mut c = collection_with(4);
		let (removed, renames) = c.remove('b').unwrap();
		assert_eq!(removed.name(), 'b');
		assert_eq!(names(&c), vec!['a', 'b', 'c']);
		assert_eq!(colors(&c), vec!["blue", "green", "purple"]);
		assert_eq!(
			renames,
			vec![Rename { from: 'c', to: 'b' }, Rename { from: 'd', to: 'c' }]
		);
		// Former `c` kept its geometry under its new name.
		assert_eq!(c.get('b').map(|v| v.end()), Some(Point::new(30.0, 0.0)));
		assert_eq!(c.resultant_name(), Some(RESULTANT_NAME));
	}

	#[test]
	fn delete_every_position() {
		for k in 3..=MAX_OPERANDS {
			for victim in 0..k {
				let mut c = collection_with(k);
				let name = operand_name(victim).unwrap();
				c.remove(name).unwrap();
				let expected: Vec<char> = (0..k - 1).filter_map(operand_name).collect();
				let expected_colors: Vec<&str> = (0..k - 1).map(operand_color).collect();
				assert_eq!(names(&c), expected);
				assert_eq!(colors(&c), expected_colors);
			}
		}
	}

	#[test]
	fn delete_guards() {
		let mut c = collection_with(2);
		assert_eq!(c.remove(RESULTANT_NAME).err(), Some(GraphError::ResultantReadOnly));
		assert_eq!(c.remove('a').err(), Some(GraphError::MinimumOperands { min: MIN_OPERANDS }));
		assert_eq!(c.remove('q').err(), Some(GraphError::UnknownVector('q')));
		assert!(!c.can_delete('a'));
		assert_eq!(c.operand_count(), 2);
	}
}
