//! The `Visitor` trait and handler results.

use std::sync::Arc;

use tracing::debug;

use crate::{Attribute, Node, Registry, VisitError};

use super::walk::{Traversal, walk_attr, walk_mapping, walk_object, walk_sequence};

/// What a handler asks the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Descend into the node's (or attribute's) children as usual.
    #[default]
    Continue,
    /// Skip the children. The handler has either walked them itself or
    /// wants them left alone.
    Stop,
}

impl Flow {
    /// Returns true for [`Flow::Continue`].
    #[inline]
    pub fn is_continue(self) -> bool {
        self == Flow::Continue
    }

    /// Returns true for [`Flow::Stop`].
    #[inline]
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}

/// Return type of object and attribute handlers for visitor `V`.
pub type HandlerResult<V> = Result<Flow, <V as Visitor>::Error>;

/// A traversal policy with its own handler registry.
///
/// Implementors provide the registry and, optionally, override the
/// per-shape hooks. Every hook has a default that calls the matching
/// `walk_*` function, so an override can still run the default descent.
///
/// Hooks other than [`visit_leaf`](Visitor::visit_leaf) take the active
/// [`Traversal`] instead of `self`; the traversal derefs to the visitor.
pub trait Visitor: Sized {
    /// Error returned by handlers and by [`visit`](Visitor::visit).
    ///
    /// Engine failures such as the depth limit arrive via `From<VisitError>`.
    type Error: From<VisitError>;

    /// Returns the registry of this visitor kind.
    fn registry(&self) -> Arc<Registry<Self>>;

    /// Runs a full traversal starting at `root`.
    fn visit(&mut self, root: &dyn Node) -> Result<(), Self::Error> {
        let registry = self.registry();
        let root_type = root.node_type();
        debug!(root = %root_type, "Starting traversal");
        let result = Traversal::new(self, registry.as_ref()).visit(root);
        debug!(root = %root_type, ok = result.is_ok(), "Finished traversal");
        result
    }

    /// Default descent into an object: each public attribute in order.
    fn visit_object(
        cx: &mut Traversal<'_, Self>,
        node: &dyn Node,
        attributes: &[Attribute<'_>],
    ) -> Result<(), Self::Error> {
        walk_object(cx, node, attributes)
    }

    /// Visits one public attribute of `owner`.
    fn visit_attr(
        cx: &mut Traversal<'_, Self>,
        owner: &dyn Node,
        name: &str,
        value: &dyn Node,
    ) -> Result<(), Self::Error> {
        walk_attr(cx, owner, name, value)
    }

    /// Visits the elements of an ordered collection.
    fn visit_sequence(
        cx: &mut Traversal<'_, Self>,
        _node: &dyn Node,
        items: &[&dyn Node],
    ) -> Result<(), Self::Error> {
        walk_sequence(cx, items)
    }

    /// Visits the values of a key/value collection.
    fn visit_mapping(
        cx: &mut Traversal<'_, Self>,
        _node: &dyn Node,
        values: &[&dyn Node],
    ) -> Result<(), Self::Error> {
        walk_mapping(cx, values)
    }

    /// Called for terminal values. Does nothing by default.
    fn visit_leaf(&mut self, _node: &dyn Node) -> Result<(), Self::Error> {
        Ok(())
    }
}
