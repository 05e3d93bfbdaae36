//! Task property graph built on petgraph.
//!
//! Each node holds one task's collected specs. Edges run from the task that
//! produces a location to every task whose inputs overlap it, which gives
//! the execution order the staleness engine needs.

use crate::{Error, ParallelGroups, Result, TaskProperties, TaskPropertiesCollector, TopologicalOrder};
use petgraph::Direction;
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::IntoNodeReferences;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use taskprops_properties::{DeclaredPropertySpec, PropertyBean, PropertyWalker};
use tracing::{debug, trace};

/// A node in the task graph.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Name of the task.
    pub name: String,
    /// The task's declared properties.
    pub properties: TaskProperties,
}

/// Graph of tasks linked by the locations they produce and consume.
#[derive(Debug, Default)]
pub struct PropertyGraph {
    /// The directed graph of tasks.
    graph: DiGraph<GraphNode, ()>,
    /// Map from task names to node indices.
    name_to_node: HashMap<String, NodeIndex>,
}

impl PropertyGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task's collected properties.
    ///
    /// If a task with the same name already exists, returns the existing node index.
    ///
    /// # Errors
    ///
    /// Currently infallible, but returns `Result` for API consistency.
    pub fn add_task(&mut self, properties: TaskProperties) -> Result<NodeIndex> {
        let name = properties.name().to_string();
        if let Some(&node) = self.name_to_node.get(&name) {
            return Ok(node);
        }

        let node_index = self.graph.add_node(GraphNode {
            name: name.clone(),
            properties,
        });
        self.name_to_node.insert(name.clone(), node_index);
        debug!("Added task node '{}'", name);

        Ok(node_index)
    }

    /// Walk `bean`'s declared properties and add the result as task `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Property`] if classification fails and
    /// [`Error::DuplicatePropertyName`] if two specs share a name.
    pub fn configure_task(
        &mut self,
        name: &str,
        bean: &dyn PropertyBean,
        walker: &PropertyWalker,
    ) -> Result<NodeIndex> {
        let mut collector = TaskPropertiesCollector::new(name);
        walker
            .visit_properties(bean, &mut collector)
            .map_err(|e| Error::property(name, e))?;
        self.add_task(collector.finish()?)
    }

    /// Get a reference to a task node by name.
    #[must_use]
    pub fn get_node_by_name(&self, name: &str) -> Option<&GraphNode> {
        self.name_to_node
            .get(name)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Get the number of tasks in the graph.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if a task exists in the graph.
    #[must_use]
    pub fn contains_task(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Get the node index for a task by name.
    #[must_use]
    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.name_to_node.get(name).copied()
    }

    /// Iterate over all nodes in the graph.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph.node_references()
    }

    /// Names of the tasks `name` consumes outputs from, sorted.
    #[must_use]
    pub fn producers_of(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.name_to_node.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Add producer → consumer edges for overlapping locations.
    ///
    /// A consumer depends on a producer when one of its file inputs lies
    /// inside one of the producer's outputs, or contains it. This is the
    /// first point where spec values are read; values that cannot be read
    /// yet are skipped here and reported by [`validate`](Self::validate).
    ///
    /// Returns the number of new edges.
    pub fn link_producers(&mut self) -> usize {
        let mut produced: Vec<(PathBuf, NodeIndex)> = Vec::new();
        for (idx, node) in self.graph.node_references() {
            for spec in node.properties.outputs() {
                for path in readable_paths(&node.name, spec) {
                    produced.push((path, idx));
                }
            }
        }

        let mut edges_to_add = Vec::new();
        let mut seen = HashSet::new();
        for (consumer, node) in self.graph.node_references() {
            let file_inputs = node
                .properties
                .inputs()
                .iter()
                .filter(|spec| spec.spec_kind().is_file());
            for spec in file_inputs {
                for input in readable_paths(&node.name, spec) {
                    for (output, producer) in &produced {
                        if *producer != consumer
                            && overlaps(&input, output)
                            && seen.insert((*producer, consumer))
                        {
                            edges_to_add.push((*producer, consumer));
                        }
                    }
                }
            }
        }

        let mut added = 0;
        for (from, to) in edges_to_add {
            if self.graph.find_edge(from, to).is_none() {
                self.graph.add_edge(from, to, ());
                added += 1;
            }
        }
        debug!(edges = added, "Linked producers to consumers");
        added
    }

    /// Check if the graph has cycles.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Get topologically sorted list of tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains cycles.
    pub fn topological_sort(&self) -> Result<TopologicalOrder> {
        if self.has_cycles() {
            return Err(Error::CycleDetected {
                message: "Task property graph contains cycles".to_string(),
            });
        }

        match toposort(&self.graph, None) {
            Ok(sorted_indices) => Ok(sorted_indices
                .into_iter()
                .map(|idx| self.graph[idx].clone())
                .collect()),
            Err(_) => Err(Error::TopologicalSortFailed {
                reason: "petgraph toposort failed".to_string(),
            }),
        }
    }

    /// Get all tasks that can run in parallel (no dependencies between them).
    ///
    /// Returns a vector of parallel groups, where each group contains tasks
    /// that can execute concurrently. Groups are ordered by dependency level.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph contains cycles.
    pub fn parallel_groups(&self) -> Result<ParallelGroups> {
        let sorted = self.topological_sort()?;

        let mut groups: ParallelGroups = vec![];
        let mut processed: HashMap<String, usize> = HashMap::new();

        for task in sorted {
            // One level past the deepest producer
            let level = self
                .producers_of(&task.name)
                .into_iter()
                .filter_map(|producer| processed.get(producer))
                .map(|level| level + 1)
                .max()
                .unwrap_or(0);

            if level >= groups.len() {
                groups.resize(level + 1, vec![]);
            }
            processed.insert(task.name.clone(), level);
            groups[level].push(task);
        }

        Ok(groups)
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }
}

fn overlaps(input: &Path, output: &Path) -> bool {
    input.starts_with(output) || output.starts_with(input)
}

fn readable_paths(task: &str, spec: &DeclaredPropertySpec) -> Vec<PathBuf> {
    match spec.value().get() {
        Ok(Some(value)) => value
            .file_paths()
            .map(|paths| paths.into_iter().map(Path::to_path_buf).collect())
            .unwrap_or_default(),
        Ok(None) => Vec::new(),
        Err(reason) => {
            trace!(task, property = spec.property_name(), %reason, "Skipping unreadable value");
            Vec::new()
        }
    }
}
