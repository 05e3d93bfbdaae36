//! Traversal types for task property graphs.

use crate::GraphNode;

/// A topologically sorted sequence of task nodes.
///
/// Every task that produces a location comes before the tasks that consume it.
pub type TopologicalOrder = Vec<GraphNode>;

/// Groups of tasks that can execute in parallel.
///
/// Each inner vector contains tasks that have no dependencies on each other
/// and can safely execute concurrently. The outer vector is ordered by
/// dependency level - all tasks in group N must complete before tasks
/// in group N+1 can start.
pub type ParallelGroups = Vec<Vec<GraphNode>>;
