pub mod builder;
pub mod dfs;
pub mod finder;
pub mod graph;
pub mod planner;
pub mod render;
pub mod selector;
pub mod traits;

pub use builder::GraphBuilder;
pub use finder::PathStackFinder;
pub use graph::RegionGraph;
pub use planner::{PatrolPlan, PatrolPlanner};
pub use selector::{DedupMode, RouteSelector};
