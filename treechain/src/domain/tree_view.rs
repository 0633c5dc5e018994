//! Box-drawing view of a composite subtree via `termtree`.

use termtree::Tree;
use tracing::instrument;

use crate::domain::composite::{Composite, NodeId};
use crate::domain::error::{CompositeError, CompositeResult};

pub trait TreeViewConvert {
    fn to_tree(&self, id: NodeId) -> CompositeResult<Tree<String>>;
}

impl TreeViewConvert for Composite {
    #[instrument(level = "debug", skip(self))]
    fn to_tree(&self, id: NodeId) -> CompositeResult<Tree<String>> {
        let node = self.get(id).ok_or(CompositeError::UnknownNode(id))?;

        let leaves = node
            .children()
            .iter()
            .map(|&child| self.to_tree(child))
            .collect::<CompositeResult<Vec<_>>>()?;

        Ok(Tree::new(node.label()).with_leaves(leaves))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_containers_when_converting_then_mirrors_structure() {
        let mut tree = Composite::new();
        let root = tree.container("root");
        let inner = tree.container("inner");
        let leaf = tree.leaf(3);
        tree.add_child(inner, leaf).unwrap();
        tree.add_child(root, inner).unwrap();

        let view = tree.to_tree(root).unwrap();
        assert_eq!(view.root, "root");
        assert_eq!(view.leaves.len(), 1);
        assert_eq!(view.leaves[0].root, "inner");
        assert_eq!(view.leaves[0].leaves[0].root, "3");
    }
}
