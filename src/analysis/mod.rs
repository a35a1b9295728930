//! Read-only algorithms over a [`KnowledgeGraph`](crate::graph::KnowledgeGraph).
//!
//! Path lengths are hop counts; edge weights are never used as costs.
//! Unknown node ids produce empty results rather than errors.

pub mod centrality;
pub mod neighborhood;
pub mod paths;
pub mod statistics;


pub use centrality::{compute_betweenness_centrality, compute_degree_distribution, find_hub_nodes};
pub use neighborhood::{
    get_all_connected_components, get_connected_component, get_neighborhood, Neighborhood,
};
pub use paths::{find_all_paths, find_shortest_path, get_path_edges};
pub use statistics::{get_graph_statistics, GraphStatistics};
