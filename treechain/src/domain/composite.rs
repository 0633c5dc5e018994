//! Arena-backed composite tree of leaves and containers.
//!
//! Every node lives in one [`Composite`] arena and is addressed by a [`NodeId`].
//! Containers store child ids, so the same subtree may appear under several
//! containers (or several times under one) without any ownership question.
//! Cycles are rejected when a child is added.

use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{CompositeError, CompositeResult};

/// Handle to a node stored in a [`Composite`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "node#{slot}.{generation}")
    }
}

/// Tree node: either a terminal value or a labelled, ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { value: i64 },
    Container { name: String, children: Vec<NodeId> },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Children in insertion order; always empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Container { children, .. } => children,
        }
    }

    /// Text shown for this node alone: the value of a leaf, the name of a container.
    pub fn label(&self) -> String {
        match self {
            Node::Leaf { value } => value.to_string(),
            Node::Container { name, .. } => name.clone(),
        }
    }
}

/// Arena owning every node of one or more composite trees.
#[derive(Debug, Clone)]
pub struct Composite {
    arena: Arena<Node>,
}

impl Default for Composite {
    fn default() -> Self {
        Self::new()
    }
}

impl Composite {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn leaf(&mut self, value: i64) -> NodeId {
        NodeId(self.arena.insert(Node::Leaf { value }))
    }

    #[instrument(level = "trace", skip(self, name), fields(name = %name.as_ref()))]
    pub fn container(&mut self, name: impl AsRef<str>) -> NodeId {
        NodeId(self.arena.insert(Node::Container {
            name: name.as_ref().to_string(),
            children: Vec::new(),
        }))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    fn node(&self, id: NodeId) -> CompositeResult<&Node> {
        self.get(id).ok_or(CompositeError::UnknownNode(id))
    }

    /// Children of `id` in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn children(&self, id: NodeId) -> CompositeResult<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// Appends `child` to the end of `parent`'s children.
    ///
    /// Duplicates are allowed. Fails if either handle is unknown, if `parent`
    /// is a leaf, or if `parent` is reachable from `child` (which would make
    /// traversal recurse forever).
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> CompositeResult<()> {
        if self.node(parent)?.is_leaf() {
            return Err(CompositeError::NotAContainer(parent));
        }
        self.node(child)?;
        if self.reaches(child, parent) {
            return Err(CompositeError::CycleDetected { parent, child });
        }

        match self.arena.get_mut(parent.0) {
            Some(Node::Container { children, .. }) => {
                children.push(child);
                debug!(count = children.len(), "child added");
                Ok(())
            }
            Some(Node::Leaf { .. }) => Err(CompositeError::NotAContainer(parent)),
            None => Err(CompositeError::UnknownNode(parent)),
        }
    }

    /// Removes the first occurrence of `child` from `parent`'s children.
    ///
    /// Returns `Ok(false)` when `child` is not among them; that is not an error.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> CompositeResult<bool> {
        match self.arena.get_mut(parent.0) {
            Some(Node::Container { children, .. }) => {
                match children.iter().position(|&c| c == child) {
                    Some(pos) => {
                        children.remove(pos);
                        debug!(pos, "child removed");
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            Some(Node::Leaf { .. }) => Err(CompositeError::NotAContainer(parent)),
            None => Err(CompositeError::UnknownNode(parent)),
        }
    }

    /// True if `target` is `from` or lies somewhere below it.
    #[instrument(level = "trace", skip(self))]
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(node) = self.get(current) {
                stack.extend(node.children().iter().copied());
            }
        }
        false
    }

    /// Renders the subtree at `id`.
    ///
    /// A leaf renders as `"<value> "`, a container as `"<name>: ["`, followed by
    /// each child in order, then `"] "`.
    #[instrument(level = "debug", skip(self))]
    pub fn operate(&self, id: NodeId) -> CompositeResult<String> {
        let mut out = String::new();
        self.operate_into(id, &mut out)?;
        Ok(out)
    }

    /// Same as [`Composite::operate`], writing into `out`.
    pub fn operate_into<W: fmt::Write>(&self, id: NodeId, out: &mut W) -> CompositeResult<()> {
        match self.node(id)? {
            Node::Leaf { value } => write!(out, "{value} ")?,
            Node::Container { name, children } => {
                write!(out, "{name}: [")?;
                for &child in children {
                    self.operate_into(child, out)?;
                }
                write!(out, "] ")?;
            }
        }
        Ok(())
    }

    /// Number of levels in the subtree at `id`; a single leaf has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> CompositeResult<usize> {
        let node = self.node(id)?;
        let mut deepest = 0;
        for &child in node.children() {
            deepest = deepest.max(self.depth(child)?);
        }
        Ok(1 + deepest)
    }

    /// Leaf values of the subtree at `id`, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self, id: NodeId) -> CompositeResult<Vec<i64>> {
        self.node(id)?;
        Ok(self
            .iter(id)
            .filter_map(|(_, node, _)| match node {
                Node::Leaf { value } => Some(*value),
                Node::Container { .. } => None,
            })
            .collect())
    }

    /// Pre-order walk of the subtree at `id`, yielding each node with its depth
    /// (the start node has depth 0). Unknown ids yield nothing.
    pub fn iter(&self, id: NodeId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, id)
    }
}

pub struct PreOrderIterator<'a> {
    composite: &'a Composite,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(composite: &'a Composite, start: NodeId) -> Self {
        Self {
            composite,
            stack: vec![(start, 0)],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.stack.pop() {
            if let Some(node) = self.composite.get(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children().iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current, node, depth));
            }
        }
        None
    }
}
