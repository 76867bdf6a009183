//! Type tags used for handler dispatch.
//!
//! Rust has no runtime class hierarchy, so every [`Node`](crate::Node)
//! reports a [`NodeType`]: a name plus an optional parent tag. The chain of
//! parents is the ancestor chain walked by handler resolution.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A type tag with an optional parent.
///
/// Tags are identified by name. Two tags with the same name are the same
/// type as far as dispatch is concerned, so names must be unique across a
/// graph model. Names starting with `std::` are reserved for the built-in
/// tags below.
///
/// # Example
///
/// ```rust
/// use nodewalk::NodeType;
///
/// static TABLE: NodeType = NodeType::new("Table");
/// static GLYPH_TABLE: NodeType = NodeType::with_parent("GlyphTable", &TABLE);
///
/// let chain: Vec<_> = GLYPH_TABLE.ancestors().map(|t| t.name()).collect();
/// assert_eq!(chain, vec!["GlyphTable", "Table"]);
/// ```
#[derive(Clone, Copy)]
pub struct NodeType {
    name: &'static str,
    parent: Option<&'static NodeType>,
}

impl NodeType {
    /// Root of every built-in ordered collection tag.
    pub const SEQUENCE: NodeType = NodeType::new("std::sequence");
    /// Root of every built-in key/value collection tag.
    pub const MAPPING: NodeType = NodeType::new("std::mapping");
    /// Root of the built-in numeric tags.
    pub const NUMBER: NodeType = NodeType::new("std::number");

    /// `Vec<T>` and `[T; N]`.
    pub const LIST: NodeType = NodeType::with_parent("std::list", &NodeType::SEQUENCE);
    /// `VecDeque<T>`.
    pub const DEQUE: NodeType = NodeType::with_parent("std::deque", &NodeType::SEQUENCE);
    /// `BTreeMap<K, V>`.
    pub const BTREE_MAP: NodeType = NodeType::with_parent("std::btree_map", &NodeType::MAPPING);
    /// `HashMap<K, V>`.
    pub const HASH_MAP: NodeType = NodeType::with_parent("std::hash_map", &NodeType::MAPPING);

    /// Signed and unsigned integers.
    pub const INT: NodeType = NodeType::with_parent("std::int", &NodeType::NUMBER);
    /// `f32` and `f64`.
    pub const FLOAT: NodeType = NodeType::with_parent("std::float", &NodeType::NUMBER);
    /// `bool`.
    pub const BOOL: NodeType = NodeType::new("std::bool");
    /// `char`.
    pub const CHAR: NodeType = NodeType::new("std::char");
    /// `String` and `&'static str`.
    pub const STR: NodeType = NodeType::new("std::str");
    /// `()`.
    pub const UNIT: NodeType = NodeType::new("std::unit");

    /// `Option<T>`.
    pub const OPTION: NodeType = NodeType::new("std::option");
    /// `Box<T>`, `Rc<T>` and `Arc<T>`.
    pub const POINTER: NodeType = NodeType::new("std::pointer");

    /// Creates a root tag with no parent.
    pub const fn new(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Creates a tag deriving from `parent`.
    pub const fn with_parent(name: &'static str, parent: &'static NodeType) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Returns the tag name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the direct parent tag, if any.
    #[inline]
    pub fn parent(&self) -> Option<NodeType> {
        self.parent.copied()
    }

    /// Iterates over this tag and its ancestors, most-derived first.
    pub fn ancestors(self) -> impl Iterator<Item = NodeType> {
        std::iter::successors(Some(self), |node_type| node_type.parent())
    }

    /// Returns true if `self` is `other` or derives from it.
    pub fn is_subtype_of(self, other: NodeType) -> bool {
        self.ancestors().any(|ancestor| ancestor == other)
    }
}

impl PartialEq for NodeType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NodeType {}

impl Hash for NodeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeType({})", self.name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
