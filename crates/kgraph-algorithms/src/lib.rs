pub mod common;
pub mod centrality;
pub mod pagerank;
pub mod community;
pub mod louvain;
pub mod greedy;
pub mod pathfinding;
pub mod mst;

pub use common::{GraphView, NodeId};
pub use centrality::{betweenness_centrality, closeness_centrality, degree_centrality, ClosenessDirection};
pub use pagerank::{page_rank, PageRankConfig, PageRankResult};
pub use community::{modularity, weakly_connected_components, CommunityError, CommunityResult, WccResult};
pub use louvain::{louvain, LouvainConfig};
pub use greedy::greedy_modularity;
pub use pathfinding::{bfs, dijkstra, PathResult};
pub use mst::{prim_mst, MSTResult};
