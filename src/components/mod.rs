pub mod github_link;
pub mod vector_graph;
