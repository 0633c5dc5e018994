//! Domain layer: composite trees and handler chains
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod chain;
pub mod composite;
pub mod error;
pub mod tree_view;

pub use chain::{Chain, Handler, HandlerId, HandlerKind, Outcome};
pub use composite::{Composite, Node, NodeId, PreOrderIterator};
pub use error::{ChainError, CompositeError, DomainError, DomainResult};
pub use tree_view::TreeViewConvert;
