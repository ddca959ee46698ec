/// Reasons the graph refused an action. A refusal never changes any state.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
	/// The graph already holds the maximum number of operand vectors.
	#[error("Cannot hold more than {max} operand vectors")]
	CapacityReached {
		/// Operand limit.
		max: usize,
	},
	/// Deleting would leave too few operands to fold.
	#[error("At least {min} operand vectors are required")]
	MinimumOperands {
		/// Operand floor.
		min: usize,
	},
	/// The resultant is computed and cannot be deleted, dragged, or edited.
	#[error("The resultant vector is read-only")]
	ResultantReadOnly,
	/// A second resultant was requested.
	#[error("The graph already has a resultant vector")]
	ResultantExists,
	/// No vector carries this name.
	#[error("No vector named {0}")]
	UnknownVector(char),
	/// An explicit name collides with an existing vector.
	#[error("The name {0} is already taken")]
	NameTaken(char),
	/// Operand names must be a lowercase letter other than the resultant's.
	#[error("{0} is not a valid operand name")]
	InvalidName(char),
	/// The action needs an active vector and none is selected.
	#[error("No vector is selected")]
	NoActiveVector,
	/// Commit needs both components to be numbers.
	#[error("Both components must be numbers before committing")]
	IncompleteComponents,
}
