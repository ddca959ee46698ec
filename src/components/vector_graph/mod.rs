mod collection;
mod component;
mod controls;
mod details;
mod error;
mod panel;
mod render;
mod resultant;
mod scene;
mod snap;
mod state;
mod transform;
mod types;
mod vector;

pub use component::VectorWorkbench;
pub use types::GraphConfig;
