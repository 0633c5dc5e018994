//! The fixed demonstration data: one nested composite and one three-link chain.

use tracing::instrument;

use crate::domain::{Chain, Composite, DomainResult, HandlerId, HandlerKind, NodeId};

/// Requests pushed through the sample chain by the default run.
pub const SAMPLE_REQUESTS: [i64; 2] = [5, 15];

/// Builds `Composite1` holding leaves 1 and 2, followed by `Composite2`
/// holding leaves 3, 4 and 5. Returns the arena and the root id.
#[instrument(level = "debug")]
pub fn sample_tree() -> DomainResult<(Composite, NodeId)> {
    let mut tree = Composite::new();

    let leaves: Vec<NodeId> = (1..=5).map(|value| tree.leaf(value)).collect();

    let composite1 = tree.container("Composite1");
    let composite2 = tree.container("Composite2");

    tree.add_child(composite1, leaves[0])?;
    tree.add_child(composite1, leaves[1])?;

    for &leaf in &leaves[2..] {
        tree.add_child(composite2, leaf)?;
    }

    tree.add_child(composite1, composite2)?;

    Ok((tree, composite1))
}

/// Builds `handler1 -> handler2 -> handler3`, each accepting `0..10`.
/// Returns the chain and its head.
#[instrument(level = "debug")]
pub fn sample_chain() -> DomainResult<(Chain, HandlerId)> {
    let mut chain = Chain::new();
    let ids: Vec<HandlerId> = (1..=3)
        .map(|n| chain.add_handler(format!("handler{n}"), HandlerKind::concrete()))
        .collect();
    chain.link(&ids)?;
    Ok((chain, ids[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_sample_tree_then_root_has_three_children() {
        let (tree, root) = sample_tree().unwrap();
        assert_eq!(tree.children(root).unwrap().len(), 3);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn given_sample_chain_then_tail_has_no_successor() {
        let (chain, head) = sample_chain().unwrap();
        let second = chain.successor(head).unwrap().unwrap();
        let third = chain.successor(second).unwrap().unwrap();
        assert_eq!(chain.successor(third).unwrap(), None);
    }
}
