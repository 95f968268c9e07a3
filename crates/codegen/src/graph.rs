//! Arena of schema nodes with reference links and cycle detection.

use crate::node::{Node, NodeId};
use graphql_introspect::TypeKind;
use std::collections::{HashMap, HashSet};
use std::ops::Index;

/// Collected nodes in first-collect order, indexed by name.
///
/// Nodes refer to each other through [`NodeId`]s into the arena, so
/// back-references and self-references need no shared ownership.
#[derive(Debug, Default, Clone)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
}

impl NodeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node unless one with the same name is already present.
    ///
    /// Returns the id of the registered node, which is the earlier one for
    /// a duplicate name.
    pub fn collect(&mut self, node: Node) -> NodeId {
        if let Some(&existing) = self.index.get(&node.name) {
            tracing::debug!(name = %node.name, "Skipping duplicate type");
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    /// Connects every node to the collected nodes its fields reference,
    /// then marks the fields that take part in a reference cycle.
    ///
    /// Children and cycle flags are rebuilt from scratch, so linking again
    /// after more collects gives the same result as linking once.
    #[tracing::instrument(skip(self), fields(nodes = self.nodes.len()))]
    pub fn link(&mut self) {
        for i in 0..self.nodes.len() {
            let mut children = Vec::new();
            for field in &self.nodes[i].fields {
                if let Some(&child) = self.index.get(&field.mapped_type) {
                    if !children.contains(&child) {
                        children.push(child);
                    }
                }
            }
            self.nodes[i].children = children;
        }

        self.mark_cycles();
    }

    fn mark_cycles(&mut self) {
        let mut flagged = 0usize;

        for i in 0..self.nodes.len() {
            let id = NodeId(i);
            let cyclic: Vec<String> = self.nodes[i]
                .children
                .iter()
                .filter(|&&child| self.reaches(child, id))
                .map(|&child| self.nodes[child.0].name.clone())
                .collect();

            for field in &mut self.nodes[i].fields {
                field.has_cycle = cyclic.contains(&field.mapped_type);
                flagged += usize::from(field.has_cycle);
            }
        }

        tracing::debug!(flagged, "Marked cyclic fields");
    }

    /// Whether `to` is reachable from `from` through child links.
    ///
    /// Only `OBJECT` and `INPUT_OBJECT` nodes take part: both endpoints and
    /// every node on the path must be one of those kinds. A node reaches
    /// itself.
    #[must_use]
    pub fn reaches(&self, from: NodeId, to: NodeId) -> bool {
        if !self.is_traversable(from) || !self.is_traversable(to) {
            return false;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            for &child in &self.nodes[current.0].children {
                if self.is_traversable(child) && !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }

        false
    }

    fn is_traversable(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.0)
            .is_some_and(|node| matches!(node.kind, TypeKind::Object | TypeKind::InputObject))
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Node> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Nodes in collection order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// The linked children of `id`.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.get(id)
            .map(Node::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.get(child))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for NodeGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl FromIterator<Node> for NodeGraph {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut graph = Self::new();
        for node in iter {
            graph.collect(node);
        }
        graph
    }
}
