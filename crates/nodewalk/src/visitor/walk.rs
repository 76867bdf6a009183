//! Walk functions for graph traversal.
//!
//! These functions provide the descent logic behind the default
//! implementations of the `Visitor` hooks. [`Traversal`] carries the state
//! of one `visit` call.

use std::ops::{Deref, DerefMut};

use tracing::{trace, warn};

use crate::{Attribute, Node, Registry, Shape, VisitError};

use super::visit::Visitor;

/// State of one traversal: the visitor, its frozen registry and the
/// current depth.
///
/// Handlers receive the traversal and reach the visitor's own state through
/// `Deref`/`DerefMut`.
pub struct Traversal<'a, V: Visitor> {
    visitor: &'a mut V,
    registry: &'a Registry<V>,
    depth: usize,
}

impl<'a, V: Visitor> Traversal<'a, V> {
    /// Starts a traversal at depth zero.
    pub fn new(visitor: &'a mut V, registry: &'a Registry<V>) -> Self {
        Self {
            visitor,
            registry,
            depth: 0,
        }
    }

    /// Returns the registry driving this traversal.
    #[inline]
    pub fn registry(&self) -> &'a Registry<V> {
        self.registry
    }

    /// Number of nodes currently being dispatched, the current one included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Dispatches `node` with full handler resolution.
    ///
    /// This is the recursion entry used for the root, sequence elements,
    /// mapping values and attribute values.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::DepthExceeded`] (converted into `V::Error`) when
    /// the configured maximum depth is reached, and any error a handler or
    /// hook returns, unchanged.
    pub fn visit(&mut self, node: &dyn Node) -> Result<(), V::Error> {
        let limit = self.registry.config().max_depth;
        if self.depth >= limit {
            warn!(limit, node_type = %node.node_type(), "Traversal depth limit reached");
            return Err(VisitError::DepthExceeded { limit }.into());
        }

        self.depth += 1;
        let result = self.dispatch(node);
        self.depth -= 1;
        result
    }

    /// Runs the default object descent on `node`.
    ///
    /// Intended for object handlers that want the attributes walked before
    /// doing more work; such a handler should then return
    /// [`Flow::Stop`](super::Flow::Stop) so the engine does not walk them a
    /// second time.
    ///
    /// Nodes whose shape is not [`Shape::Object`] have no attributes and are
    /// left untouched.
    pub fn visit_object(&mut self, node: &dyn Node) -> Result<(), V::Error> {
        let Shape::Object(attributes) = node.shape() else {
            trace!(node_type = %node.node_type(), "Not an object, no attributes to walk");
            return Ok(());
        };
        V::visit_object(self, node, &attributes)
    }

    fn dispatch(&mut self, node: &dyn Node) -> Result<(), V::Error> {
        let registry = self.registry;
        let node_type = node.node_type();

        if let Some(handler) = registry.resolve_object(node_type) {
            trace!(%node_type, depth = self.depth, "Calling object handler");
            if handler(self, node)?.is_stop() {
                return Ok(());
            }
        }

        let shape = node.shape();
        trace!(%node_type, shape = shape.kind(), depth = self.depth, "Descending");
        match shape {
            Shape::Object(attributes) => V::visit_object(self, node, &attributes),
            Shape::Sequence(items) => V::visit_sequence(self, node, &items),
            Shape::Mapping(values) => V::visit_mapping(self, node, &values),
            Shape::Leaf => self.visitor.visit_leaf(node),
        }
    }
}

impl<V: Visitor> Deref for Traversal<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &*self.visitor
    }
}

impl<V: Visitor> DerefMut for Traversal<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.visitor
    }
}

/// Walks the public attributes of an object node in declaration order.
///
/// Attributes carrying the configured private prefix are skipped.
pub fn walk_object<V>(
    cx: &mut Traversal<'_, V>,
    node: &dyn Node,
    attributes: &[Attribute<'_>],
) -> Result<(), V::Error>
where
    V: Visitor,
{
    let prefix = cx.registry().config().private_prefix.as_str();
    for attribute in attributes {
        if attribute.is_private(prefix) {
            continue;
        }
        V::visit_attr(cx, node, attribute.name, attribute.value)?;
    }
    Ok(())
}

/// Walks one attribute: its handler first, if any, then the value.
pub fn walk_attr<V>(
    cx: &mut Traversal<'_, V>,
    owner: &dyn Node,
    name: &str,
    value: &dyn Node,
) -> Result<(), V::Error>
where
    V: Visitor,
{
    let registry = cx.registry();
    if let Some(handler) = registry.resolve_attr(owner.node_type(), name) {
        trace!(owner = %owner.node_type(), attr = name, "Calling attribute handler");
        if handler(cx, owner, name, value)?.is_stop() {
            return Ok(());
        }
    }
    cx.visit(value)
}

/// Walks each element of a sequence in order.
#[inline]
pub fn walk_sequence<V>(cx: &mut Traversal<'_, V>, items: &[&dyn Node]) -> Result<(), V::Error>
where
    V: Visitor,
{
    for item in items {
        cx.visit(*item)?;
    }
    Ok(())
}

/// Walks each value of a mapping in iteration order. Keys are not visited.
#[inline]
pub fn walk_mapping<V>(cx: &mut Traversal<'_, V>, values: &[&dyn Node]) -> Result<(), V::Error>
where
    V: Visitor,
{
    for value in values {
        cx.visit(*value)?;
    }
    Ok(())
}
