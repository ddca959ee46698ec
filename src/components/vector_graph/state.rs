use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, info, warn};

use super::collection::VectorCollection;
use super::details::{DetailSynchronizer, EditPhase, committed_endpoints};
use super::error::GraphError;
use super::resultant;
use super::scene::{HEAD_HIT_RADIUS, STROKE_WIDTH, Scene};
use super::snap::GridSnapper;
use super::transform::CoordinateTransform;
use super::types::{DragTarget, GraphConfig, NewVector, Operation, Point, VectorDetails, VectorField};
use super::vector::{RESULTANT_NAME, VectorEvents};

/// Extra reach around a shaft when picking it with the pointer.
pub const BODY_HIT_TOLERANCE: f64 = 3.0;

pub const DEFAULT_START: Point = Point { x: 0.0, y: 0.0 };
pub const DEFAULT_END: Point = Point { x: 10.0, y: 10.0 };

/// Operands placed tip-to-tail when the graph opens, in grid units.
const INITIAL_OPERANDS: [(Point, Point); 2] = [
	(Point { x: 0.0, y: 0.0 }, Point { x: 3.0, y: 6.0 }),
	(Point { x: 3.0, y: 6.0 }, Point { x: 14.0, y: 12.0 }),
];

#[derive(Clone, Copy, Debug)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

pub const MARGIN: Margin = Margin {
	top: 10.0,
	right: 30.0,
	bottom: 30.0,
	left: 60.0,
};

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub vector: Option<(char, DragTarget)>,
	pub last_x: f64,
	pub last_y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VectorEvent {
	GeometryChanged(char),
	Selected(char),
}

/// Collects vector notifications until the graph drains them.
#[derive(Default)]
struct EventQueue {
	pending: RefCell<VecDeque<VectorEvent>>,
}

impl EventQueue {
	fn pop(&self) -> Option<VectorEvent> {
		self.pending.borrow_mut().pop_front()
	}
}

impl VectorEvents for EventQueue {
	fn on_geometry_changed(&self, name: char) {
		self.pending.borrow_mut().push_back(VectorEvent::GeometryChanged(name));
	}

	fn on_selected(&self, name: char) {
		self.pending.borrow_mut().push_back(VectorEvent::Selected(name));
	}
}

/// The active vector as the details panel shows it.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSnapshot {
	pub name: char,
	pub read_only: bool,
	pub editing: bool,
	pub details: VectorDetails,
}

/// Plain-data view of the graph for the reactive UI layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSnapshot {
	pub operation: Operation,
	pub lock_to_grid: bool,
	pub operand_count: usize,
	pub can_add: bool,
	pub can_delete: bool,
	pub active: Option<ActiveSnapshot>,
}

/// Owns the coordinate space, the vectors, and the interaction state.
pub struct VectorGraphState {
	pub config: GraphConfig,
	pub transform: CoordinateTransform,
	pub scene: Scene,
	pub drag: DragState,
	snapper: GridSnapper,
	operation: Operation,
	collection: VectorCollection,
	details: DetailSynchronizer,
	events: Rc<EventQueue>,
}

impl VectorGraphState {
	/// An empty graph with only the resultant anchored at the origin.
	pub fn empty(config: GraphConfig) -> Self {
		let events = Rc::new(EventQueue::default());
		let mut state = Self {
			config,
			transform: CoordinateTransform::from_config(&config),
			scene: Scene::new(config.cell_size),
			drag: DragState::default(),
			snapper: GridSnapper::new(config.cell_size),
			operation: Operation::default(),
			collection: VectorCollection::new(events.clone()),
			details: DetailSynchronizer::default(),
			events,
		};
		let resultant = NewVector {
			end: Some(DEFAULT_START),
			is_resultant: true,
			name: Some(RESULTANT_NAME),
			..NewVector::default()
		};
		if let Err(err) = state.add_vector(resultant) {
			warn!("Could not create the resultant vector: {err}");
		}
		state
	}

	/// A graph holding the resultant and the two starting operands.
	pub fn new(config: GraphConfig) -> Self {
		let mut state = Self::empty(config);
		for (start, end) in INITIAL_OPERANDS {
			if let Err(err) = state.add_vector(NewVector::operand(start, end)) {
				warn!("Could not create initial vector: {err}");
			}
		}
		state.details.clear();
		info!(
			"Vector graph ready: {}x{} cells of {}px",
			config.num_x_ticks, config.num_y_ticks, config.cell_size
		);
		state
	}

	pub fn operation(&self) -> Operation {
		self.operation
	}

	pub fn lock_to_grid(&self) -> bool {
		self.config.lock_to_grid
	}

	pub fn collection(&self) -> &VectorCollection {
		&self.collection
	}

	pub fn operand_count(&self) -> usize {
		self.collection.operand_count()
	}

	pub fn active_vector(&self) -> Option<char> {
		self.details.active()
	}

	pub fn edit_phase(&self) -> Option<EditPhase> {
		self.details.phase()
	}

	fn snapper(&self) -> Option<&GridSnapper> {
		self.lock_to_grid().then_some(&self.snapper)
	}

	/// Creates a vector from grid-unit coordinates and makes it active.
	pub fn add_vector(&mut self, request: NewVector) -> Result<char, GraphError> {
		let start = self.transform.to_pixel_point(request.start.unwrap_or(DEFAULT_START));
		let end = self.transform.to_pixel_point(request.end.unwrap_or(DEFAULT_END));
		let name = self
			.collection
			.insert(start, end, request.is_resultant, request.name)
			.inspect_err(|err| debug!("Add refused: {err}"))?;

		if let Some(vector) = self.collection.get(name) {
			self.scene.draw_vector(vector);
			if !vector.is_resultant() {
				self.details.select(vector, &self.transform);
			}
		}
		info!("Added vector {name} ({} operands)", self.operand_count());
		self.recompute_resultant();
		self.dispatch_events();
		Ok(name)
	}

	/// Deletes an operand, renumbers the rest, and clears the selection.
	pub fn delete_vector(&mut self, name: char) -> Result<(), GraphError> {
		let (removed, renames) = self
			.collection
			.remove(name)
			.inspect_err(|err| debug!("Delete refused: {err}"))?;
		self.scene.remove_vector_visual(removed.name());
		for rename in &renames {
			self.scene.rename_vector_visual(rename.from, rename.to);
		}
		for vector in self.collection.operands() {
			self.scene.redraw_vector(vector);
		}
		self.details.clear();
		info!("Deleted vector {name} ({} operands left)", self.operand_count());
		self.recompute_resultant();
		self.dispatch_events();
		Ok(())
	}

	pub fn delete_active_vector(&mut self) -> Result<(), GraphError> {
		let name = self.active_vector().ok_or(GraphError::NoActiveVector)?;
		self.delete_vector(name)
	}

	pub fn set_operation(&mut self, operation: Operation) {
		if self.operation != operation {
			info!("Operation set to {operation}");
		}
		self.operation = operation;
		self.recompute_resultant();
		self.dispatch_events();
	}

	pub fn set_lock_to_grid(&mut self, lock: bool) {
		debug!("Lock to grid: {lock}");
		self.config.lock_to_grid = lock;
	}

	pub fn toggle_lock_to_grid(&mut self) {
		self.set_lock_to_grid(!self.config.lock_to_grid);
	}

	pub fn select_vector(&mut self, name: char) -> Result<(), GraphError> {
		let vector = self.collection.get(name).ok_or(GraphError::UnknownVector(name))?;
		self.details.select(vector, &self.transform);
		debug!("Selected vector {name}");
		Ok(())
	}

	pub fn close_details(&mut self) {
		self.details.clear();
	}

	pub fn active_vector_details(&self) -> Option<VectorDetails> {
		self.details.details().copied()
	}

	/// Stores a raw field edit for the active vector without touching geometry.
	pub fn adjust_active_vector_field(&mut self, field: VectorField, raw: &str) -> Result<(), GraphError> {
		let name = self.details.active().ok_or(GraphError::NoActiveVector)?;
		if self.collection.is_resultant(name) {
			return Err(GraphError::ResultantReadOnly);
		}
		self.details.edit(field, raw);
		Ok(())
	}

	/// Writes the active vector's components back into its endpoints.
	pub fn commit_active_vector(&mut self) -> Result<(), GraphError> {
		let name = self.details.active().ok_or(GraphError::NoActiveVector)?;
		if self.collection.is_resultant(name) {
			return Err(GraphError::ResultantReadOnly);
		}
		let details = self.active_vector_details().unwrap_or_default();
		let vector = self.collection.get(name).ok_or(GraphError::UnknownVector(name))?;
		let (start, end) = committed_endpoints(vector.start(), &details, &self.transform, self.snapper())
			.ok_or(GraphError::IncompleteComponents)?;

		if let Some(vector) = self.collection.get_mut(name) {
			vector.update_coordinates(start, end);
		}
		debug!("Committed vector {name}");
		self.dispatch_events();
		Ok(())
	}

	/// Canvas size including the axis margins.
	pub fn surface_size(&self) -> (f64, f64) {
		(
			self.transform.width() + MARGIN.left + MARGIN.right,
			self.transform.height() + MARGIN.top + MARGIN.bottom,
		)
	}

	pub fn screen_to_surface(&self, sx: f64, sy: f64) -> Point {
		Point::new(sx - MARGIN.left, sy - MARGIN.top)
	}

	/// Finds what lies under a surface point. Heads win over shafts and later
	/// vectors, painted on top, win over earlier ones.
	pub fn vector_at_position(&self, point: Point) -> Option<(char, DragTarget)> {
		let vectors: Vec<_> = self.collection.iter().collect();
		if let Some(v) = vectors.iter().rev().find(|v| v.head_contains(point, HEAD_HIT_RADIUS)) {
			return Some((v.name(), DragTarget::Head));
		}
		let reach = STROKE_WIDTH / 2.0 + BODY_HIT_TOLERANCE;
		vectors
			.iter()
			.rev()
			.map(|v| (v.name(), v.distance_to_body(point)))
			.filter(|&(_, distance)| distance <= reach)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(name, _)| (name, DragTarget::Body))
	}

	/// Pointer cursor at screen coordinates: a pointer over a draggable head,
	/// a move cursor over any shaft.
	pub fn cursor_at(&self, sx: f64, sy: f64) -> &'static str {
		let point = self.screen_to_surface(sx, sy);
		let over_head = self
			.scene
			.visuals()
			.filter_map(|v| v.head_hitbox)
			.any(|tip| tip.distance_to(point) <= HEAD_HIT_RADIUS);
		if over_head {
			"pointer"
		} else if self.vector_at_position(point).is_some() {
			"move"
		} else {
			"default"
		}
	}

	/// Starts a gesture at screen coordinates. Returns whether a vector was hit.
	pub fn begin_drag(&mut self, sx: f64, sy: f64) -> bool {
		let point = self.screen_to_surface(sx, sy);
		let Some((name, target)) = self.vector_at_position(point) else {
			return false;
		};
		self.drag = DragState {
			active: true,
			vector: Some((name, target)),
			last_x: sx,
			last_y: sy,
		};
		if let Some(vector) = self.collection.get_mut(name) {
			vector.begin_drag();
		}
		self.dispatch_events();
		true
	}

	/// Feeds the pointer's new screen position to the grabbed vector.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			return;
		}
		let Some((name, target)) = self.drag.vector else {
			return;
		};
		let delta = Point::new(sx - self.drag.last_x, sy - self.drag.last_y);
		self.drag.last_x = sx;
		self.drag.last_y = sy;
		self.drag_vector(name, target, delta);
	}

	/// Applies one pointer delta, in pixels, to a vector's body or head.
	pub fn drag_vector(&mut self, name: char, target: DragTarget, delta: Point) -> bool {
		let snapper = self.snapper().copied();
		let Some(vector) = self.collection.get_mut(name) else {
			return false;
		};
		let moved = match target {
			DragTarget::Body => vector.drag_body(delta, snapper.as_ref()),
			DragTarget::Head => vector.drag_head(delta, snapper.as_ref()),
		};
		self.dispatch_events();
		moved
	}

	pub fn end_drag(&mut self) {
		if let Some((name, _)) = self.drag.vector {
			debug!("Finished dragging vector {name}");
		}
		self.drag = DragState::default();
	}

	pub fn snapshot(&self) -> PanelSnapshot {
		let active = self.active_vector().map(|name| ActiveSnapshot {
			name,
			read_only: self.collection.is_resultant(name),
			editing: self.edit_phase() == Some(EditPhase::Editing),
			details: self.active_vector_details().unwrap_or_default(),
		});
		PanelSnapshot {
			operation: self.operation(),
			lock_to_grid: self.lock_to_grid(),
			operand_count: self.operand_count(),
			can_add: self.collection.can_add(),
			can_delete: active.as_ref().is_some_and(|a| self.collection.can_delete(a.name)),
			active,
		}
	}

	fn recompute_resultant(&mut self) {
		let operation = self.operation();
		resultant::recompute(&mut self.collection, operation);
	}

	/// Drains vector notifications: redraw what moved, keep the resultant and
	/// the details panel in step. The resultant is folded only after the
	/// operand's own update has been applied.
	fn dispatch_events(&mut self) {
		while let Some(event) = self.events.pop() {
			match event {
				VectorEvent::GeometryChanged(name) => {
					let Some(vector) = self.collection.get(name) else {
						continue;
					};
					self.scene.redraw_vector(vector);
					self.details.refresh(vector, &self.transform);
					if !vector.is_resultant() {
						self.recompute_resultant();
					}
				}
				VectorEvent::Selected(name) => {
					if self.active_vector() != Some(name) {
						if let Err(err) = self.select_vector(name) {
							debug!("Selection dropped: {err}");
						}
					}
				}
			}
		}
	}
}
