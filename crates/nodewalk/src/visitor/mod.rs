//! Type-directed traversal.
//!
//! This module provides the [`Visitor`] trait and the walk functions behind
//! its default hooks.
//!
//! # Overview
//!
//! - [`Visitor`] - A traversal policy bound to one [`Registry`](crate::Registry)
//! - [`Traversal`] - State of one `visit` call, handed to every handler
//! - [`Flow`] - Handler verdict: keep descending or stop
//! - [`walk_object`], [`walk_attr`], [`walk_sequence`], [`walk_mapping`] -
//!   The default descent for each shape
//!
//! # Dispatch order
//!
//! For every value reached, the engine:
//!
//! 1. Resolves an object handler for the value's [`NodeType`](crate::NodeType)
//!    or its nearest ancestor and calls it. [`Flow::Stop`] ends the work on
//!    this value.
//! 2. Otherwise descends according to the value's [`Shape`](crate::Shape):
//!    object attributes (skipping private ones, consulting attribute
//!    handlers), sequence elements, mapping values, or the leaf hook.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use nodewalk::{Flow, Node, NodeType, Registry, Traversal, VisitError, Visitor, node_object};
//!
//! static GLYPH: NodeType = NodeType::new("Glyph");
//!
//! struct Glyph {
//!     name: String,
//!     advance: u16,
//!     _cached_bounds: [i16; 4],
//! }
//!
//! node_object!(Glyph => GLYPH { name, advance, _cached_bounds });
//!
//! struct NameCollector {
//!     registry: Arc<Registry<NameCollector>>,
//!     names: Vec<String>,
//! }
//!
//! impl Visitor for NameCollector {
//!     type Error = VisitError;
//!
//!     fn registry(&self) -> Arc<Registry<Self>> {
//!         Arc::clone(&self.registry)
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .register_attr(
//!         GLYPH,
//!         "name",
//!         |cx: &mut Traversal<'_, NameCollector>, _: &dyn Node, _: &str, value: &dyn Node| {
//!             if let Some(name) = value.downcast_ref::<String>() {
//!                 cx.names.push(name.clone());
//!             }
//!             Ok(Flow::Stop)
//!         },
//!     )
//!     .build();
//!
//! let glyphs = vec![
//!     Glyph { name: "A".into(), advance: 600, _cached_bounds: [0; 4] },
//!     Glyph { name: "B".into(), advance: 620, _cached_bounds: [0; 4] },
//! ];
//!
//! let mut collector = NameCollector { registry: Arc::new(registry), names: Vec::new() };
//! collector.visit(&glyphs).unwrap();
//! assert_eq!(collector.names, vec!["A", "B"]);
//! ```

mod visit;
mod walk;

pub use visit::{Flow, HandlerResult, Visitor};
pub use walk::{Traversal, walk_attr, walk_mapping, walk_object, walk_sequence};
