//! # nodewalk
//!
//! Type-directed traversal of caller-owned object graphs.
//!
//! Tool authors attach handlers to node types and to (node type, attribute)
//! pairs without touching the graph's type definitions. The engine walks the
//! graph depth-first in attribute order and lets each handler decide whether
//! the default descent continues below it.
//!
//! ## Architecture
//!
//! - [`Node`] / [`NodeType`] / [`Shape`] - What the engine sees of a value:
//!   a type tag with an ancestor chain, and how to descend into it
//! - [`Registry`] - Frozen handler tables for one visitor kind, resolved
//!   most-specific-first along the ancestor chain
//! - [`Visitor`] / [`Traversal`] - The traversal policy and the state of one
//!   `visit` call
//!
//! Traversal is synchronous and recursive. Recursion depth is bounded by
//! [`TraversalConfig::max_depth`]; there is no cycle detection, so cyclic
//! graphs end with [`VisitError::DepthExceeded`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use nodewalk::{Node, Registry, VisitError, Visitor};
//!
//! struct Sum {
//!     registry: Arc<Registry<Sum>>,
//!     total: i64,
//! }
//!
//! impl Visitor for Sum {
//!     type Error = VisitError;
//!
//!     fn registry(&self) -> Arc<Registry<Self>> {
//!         Arc::clone(&self.registry)
//!     }
//!
//!     fn visit_leaf(&mut self, node: &dyn Node) -> Result<(), VisitError> {
//!         if let Some(value) = node.downcast_ref::<i64>() {
//!             self.total += value;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut sum = Sum { registry: Arc::new(Registry::default()), total: 0 };
//! sum.visit(&vec![vec![1i64, 2], vec![3]]).unwrap();
//! assert_eq!(sum.total, 6);
//! ```

mod config;
mod error;
mod node;
mod node_type;
pub mod registry;
pub mod visitor;

pub use config::TraversalConfig;
pub use error::{ConfigError, VisitError};
pub use node::{Attribute, Node, Shape};
pub use node_type::NodeType;
pub use registry::{AttrHandler, ObjectHandler, Registry, RegistryBuilder};

// Re-export commonly used visitor items for convenience
pub use visitor::{Flow, HandlerResult, Traversal, Visitor};
