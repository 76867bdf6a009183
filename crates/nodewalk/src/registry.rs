//! Handler registries.
//!
//! A [`Registry`] holds the handlers of one visitor kind. It is assembled
//! with a [`RegistryBuilder`] and frozen by [`RegistryBuilder::build`], so a
//! traversal never observes a registration in progress.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use nodewalk::{Flow, Node, NodeType, Registry, Traversal, VisitError, Visitor};
//!
//! struct Counter {
//!     registry: Arc<Registry<Counter>>,
//!     ints: usize,
//! }
//!
//! impl Visitor for Counter {
//!     type Error = VisitError;
//!
//!     fn registry(&self) -> Arc<Registry<Self>> {
//!         Arc::clone(&self.registry)
//!     }
//! }
//!
//! let registry = Registry::builder()
//!     .register_type(NodeType::INT, |cx: &mut Traversal<'_, Counter>, _node: &dyn Node| {
//!         cx.ints += 1;
//!         Ok(Flow::Continue)
//!     })
//!     .build();
//!
//! let mut counter = Counter { registry: Arc::new(registry), ints: 0 };
//! counter.visit(&vec![1u8, 2, 3]).unwrap();
//! assert_eq!(counter.ints, 3);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::visitor::{Flow, Traversal, Visitor};
use crate::{ConfigError, Node, NodeType, TraversalConfig};

/// Handler bound to a node type.
pub type ObjectHandler<V> = Arc<
    dyn Fn(&mut Traversal<'_, V>, &dyn Node) -> Result<Flow, <V as Visitor>::Error> + Send + Sync,
>;

/// Handler bound to a (node type, attribute name) pair.
///
/// Receives the owning object, the attribute name and the attribute value.
pub type AttrHandler<V> = Arc<
    dyn Fn(&mut Traversal<'_, V>, &dyn Node, &str, &dyn Node) -> Result<Flow, <V as Visitor>::Error>
        + Send
        + Sync,
>;

/// The frozen handler tables of one visitor kind.
///
/// Resolution walks the runtime type's ancestor chain, most-derived first,
/// and returns the first match. Attribute names never fall back.
pub struct Registry<V: Visitor> {
    config: TraversalConfig,
    object_handlers: HashMap<NodeType, ObjectHandler<V>>,
    attr_handlers: HashMap<NodeType, HashMap<String, AttrHandler<V>>>,
}

impl<V: Visitor> Registry<V> {
    /// Starts an empty builder with the default configuration.
    pub fn builder() -> RegistryBuilder<V> {
        RegistryBuilder::new()
    }

    /// Starts a builder pre-populated with this registry's handlers and
    /// configuration.
    ///
    /// Registrations on the returned builder do not affect `self`, which
    /// makes this the way to derive a specialised kind from a base one.
    pub fn to_builder(&self) -> RegistryBuilder<V> {
        RegistryBuilder {
            config: self.config.clone(),
            object_handlers: self.object_handlers.clone(),
            attr_handlers: self.attr_handlers.clone(),
        }
    }

    /// Returns the traversal configuration.
    #[inline]
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Finds the object handler for `node_type` or its nearest ancestor.
    pub fn resolve_object(&self, node_type: NodeType) -> Option<&ObjectHandler<V>> {
        node_type
            .ancestors()
            .find_map(|ancestor| self.object_handlers.get(&ancestor))
    }

    /// Finds the attribute handler for `attr` on `node_type` or its nearest
    /// ancestor.
    pub fn resolve_attr(&self, node_type: NodeType, attr: &str) -> Option<&AttrHandler<V>> {
        node_type
            .ancestors()
            .find_map(|ancestor| self.attr_handlers.get(&ancestor)?.get(attr))
    }

    /// Number of registered object handlers.
    pub fn object_handler_count(&self) -> usize {
        self.object_handlers.len()
    }

    /// Number of registered attribute handlers.
    pub fn attr_handler_count(&self) -> usize {
        self.attr_handlers.values().map(HashMap::len).sum()
    }

    /// Returns true if no handler of either kind is registered.
    pub fn is_empty(&self) -> bool {
        self.object_handlers.is_empty() && self.attr_handlers.is_empty()
    }
}

impl<V: Visitor> Default for Registry<V> {
    fn default() -> Self {
        RegistryBuilder::new().build()
    }
}

impl<V: Visitor> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.object_handlers.keys().map(NodeType::name).collect();
        types.sort_unstable();
        let mut attrs: Vec<_> = self
            .attr_handlers
            .iter()
            .flat_map(|(node_type, by_name)| {
                by_name
                    .keys()
                    .map(move |name| format!("{}.{}", node_type.name(), name))
            })
            .collect();
        attrs.sort_unstable();

        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("object_handlers", &types)
            .field("attr_handlers", &attrs)
            .finish()
    }
}

/// Collects handlers for a [`Registry`].
///
/// Registering twice for the same exact key replaces the earlier handler.
pub struct RegistryBuilder<V: Visitor> {
    config: TraversalConfig,
    object_handlers: HashMap<NodeType, ObjectHandler<V>>,
    attr_handlers: HashMap<NodeType, HashMap<String, AttrHandler<V>>>,
}

impl<V: Visitor> RegistryBuilder<V> {
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: TraversalConfig::default(),
            object_handlers: HashMap::new(),
            attr_handlers: HashMap::new(),
        }
    }

    /// Sets the configuration frozen into the built registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `config` fails
    /// [`TraversalConfig::validate`]; the builder keeps its previous
    /// configuration.
    pub fn with_config(&mut self, config: TraversalConfig) -> Result<&mut Self, ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Binds `handler` to `node_type`.
    pub fn register_type<F>(&mut self, node_type: NodeType, handler: F) -> &mut Self
    where
        F: Fn(&mut Traversal<'_, V>, &dyn Node) -> Result<Flow, V::Error> + Send + Sync + 'static,
    {
        self.insert_object(node_type, Arc::new(handler));
        self
    }

    /// Binds `handler` to `node_type` and hands it back unchanged.
    ///
    /// Lets a handler be defined, registered and kept for direct calls in
    /// one expression.
    pub fn handler_for_type<F>(&mut self, node_type: NodeType, handler: F) -> F
    where
        F: Fn(&mut Traversal<'_, V>, &dyn Node) -> Result<Flow, V::Error>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        self.insert_object(node_type, Arc::new(handler.clone()));
        handler
    }

    /// Binds `handler` to the attribute `attr` of `node_type`.
    pub fn register_attr<F>(
        &mut self,
        node_type: NodeType,
        attr: impl Into<String>,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&mut Traversal<'_, V>, &dyn Node, &str, &dyn Node) -> Result<Flow, V::Error>
            + Send
            + Sync
            + 'static,
    {
        self.insert_attr(node_type, attr.into(), Arc::new(handler));
        self
    }

    /// Binds `handler` to the attribute `attr` of `node_type` and hands it
    /// back unchanged.
    pub fn handler_for_attr<F>(
        &mut self,
        node_type: NodeType,
        attr: impl Into<String>,
        handler: F,
    ) -> F
    where
        F: Fn(&mut Traversal<'_, V>, &dyn Node, &str, &dyn Node) -> Result<Flow, V::Error>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        self.insert_attr(node_type, attr.into(), Arc::new(handler.clone()));
        handler
    }

    /// Binds one `handler` to every `(node_type, attr)` pair.
    pub fn register_attrs<I, S, F>(&mut self, pairs: I, handler: F) -> &mut Self
    where
        I: IntoIterator<Item = (NodeType, S)>,
        S: Into<String>,
        F: Fn(&mut Traversal<'_, V>, &dyn Node, &str, &dyn Node) -> Result<Flow, V::Error>
            + Send
            + Sync
            + 'static,
    {
        let handler: AttrHandler<V> = Arc::new(handler);
        for (node_type, attr) in pairs {
            self.insert_attr(node_type, attr.into(), Arc::clone(&handler));
        }
        self
    }

    /// Binds one `handler` to every attribute in `attrs` on every type in
    /// `node_types`.
    pub fn register_attr_matrix<F>(
        &mut self,
        node_types: &[NodeType],
        attrs: &[&str],
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&mut Traversal<'_, V>, &dyn Node, &str, &dyn Node) -> Result<Flow, V::Error>
            + Send
            + Sync
            + 'static,
    {
        let pairs = node_types
            .iter()
            .flat_map(|node_type| attrs.iter().map(move |attr| (*node_type, *attr)));
        self.register_attrs(pairs, handler)
    }

    /// Freezes the collected handlers into a registry.
    ///
    /// The builder keeps its contents and can go on to build further,
    /// independent registries.
    pub fn build(&self) -> Registry<V> {
        let registry = Registry {
            config: self.config.clone(),
            object_handlers: self.object_handlers.clone(),
            attr_handlers: self.attr_handlers.clone(),
        };
        debug!(
            object_handlers = registry.object_handler_count(),
            attr_handlers = registry.attr_handler_count(),
            "Built handler registry"
        );
        registry
    }

    fn insert_object(&mut self, node_type: NodeType, handler: ObjectHandler<V>) {
        if self.object_handlers.insert(node_type, handler).is_some() {
            debug!(%node_type, "Replacing object handler");
        }
    }

    fn insert_attr(&mut self, node_type: NodeType, attr: String, handler: AttrHandler<V>) {
        let by_name = self.attr_handlers.entry(node_type).or_default();
        if by_name.insert(attr.clone(), handler).is_some() {
            debug!(%node_type, attr = %attr, "Replacing attribute handler");
        }
    }
}

impl<V: Visitor> Default for RegistryBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
