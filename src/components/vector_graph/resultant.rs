use super::collection::{MIN_OPERANDS, VectorCollection};
use super::types::{Operation, Point};

/// Folds operand displacements under `operation`.
///
/// Subtraction negates the sum of every operand, i.e. all operands are taken
/// away from zero rather than from the first one. Returns `None` below
/// [`MIN_OPERANDS`].
pub fn fold_displacements(
	operation: Operation,
	displacements: impl IntoIterator<Item = Point>,
) -> Option<Point> {
	let (count, sum) = displacements
		.into_iter()
		.fold((0usize, Point::ORIGIN), |(n, acc), d| (n + 1, acc + d));
	if count < MIN_OPERANDS {
		return None;
	}
	Some(match operation {
		Operation::Addition => sum,
		Operation::Subtraction => -sum,
	})
}

/// Moves the resultant's head to its fixed start plus the folded displacement.
/// Returns `false` when nothing changed.
pub fn recompute(collection: &mut VectorCollection, operation: Operation) -> bool {
	let Some(displacement) = fold_displacements(operation, collection.operands().map(|v| v.displacement()))
	else {
		return false;
	};
	let Some(resultant) = collection.resultant_mut() else {
		return false;
	};
	let end = resultant.start() + displacement;
	resultant.set_end(end);
	true
}
