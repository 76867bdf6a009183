//! The node model seen by the traversal engine.
//!
//! Graph types stay owned by the caller. The engine only needs two things
//! from each value: its [`NodeType`] for handler dispatch and its [`Shape`]
//! for the default descent. Implement [`Node`] by hand or with
//! [`node_object!`](crate::node_object) for plain structs.

use std::any::Any;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::NodeType;

/// A value reachable during traversal.
///
/// # Example
///
/// ```rust
/// use nodewalk::{Attribute, Node, NodeType, Shape};
///
/// static POINT: NodeType = NodeType::new("Point");
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Node for Point {
///     fn node_type(&self) -> NodeType {
///         POINT
///     }
///
///     fn shape(&self) -> Shape<'_> {
///         Shape::Object(vec![
///             Attribute::new("x", &self.x),
///             Attribute::new("y", &self.y),
///         ])
///     }
/// }
/// ```
pub trait Node: Any + 'static {
    /// Returns the tag used to resolve handlers for this value.
    fn node_type(&self) -> NodeType;

    /// Classifies this value for the default descent.
    fn shape(&self) -> Shape<'_>;
}

impl dyn Node {
    /// Returns true if the concrete type behind this node is `T`.
    #[inline]
    pub fn is<T: Node>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcasts to the concrete type behind this node.
    #[inline]
    pub fn downcast_ref<T: Node>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

/// How the engine descends into a value once handler dispatch falls through.
pub enum Shape<'a> {
    /// A record with named attributes, in declaration order.
    ///
    /// Private attributes are listed too; the engine filters them by prefix.
    Object(Vec<Attribute<'a>>),
    /// An ordered collection, in iteration order.
    Sequence(Vec<&'a dyn Node>),
    /// The values of a key/value collection, in iteration order.
    ///
    /// Keys are never visited.
    Mapping(Vec<&'a dyn Node>),
    /// A terminal value.
    Leaf,
}

impl Shape<'_> {
    /// Short name of the variant, used in trace output.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Object(_) => "object",
            Shape::Sequence(_) => "sequence",
            Shape::Mapping(_) => "mapping",
            Shape::Leaf => "leaf",
        }
    }
}

/// A named attribute of an object node.
#[derive(Clone, Copy)]
pub struct Attribute<'a> {
    /// Attribute name.
    pub name: &'a str,
    /// Attribute value.
    pub value: &'a dyn Node,
}

impl<'a> Attribute<'a> {
    /// Creates an attribute.
    #[inline]
    pub fn new(name: &'a str, value: &'a dyn Node) -> Self {
        Self { name, value }
    }

    /// Returns true if the name starts with `prefix`.
    ///
    /// An empty prefix marks nothing as private.
    #[inline]
    pub fn is_private(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.name.starts_with(prefix)
    }
}

/// Implements [`Node`] for a struct as an object with the listed fields.
///
/// The tag is given as a path to a `NodeType` constant or static, such as
/// `HEADER`, `tags::HEADER` or `NodeType::FLOAT`. Fields are reported in the
/// order given, which becomes the traversal order. Every listed field must
/// itself implement [`Node`].
///
/// ```rust
/// use nodewalk::{node_object, NodeType};
///
/// static HEADER: NodeType = NodeType::new("Header");
///
/// struct Header {
///     version: u16,
///     tables: Vec<String>,
///     _checksum: u32,
/// }
///
/// node_object!(Header => HEADER { version, tables, _checksum });
/// ```
#[macro_export]
macro_rules! node_object {
    ($ty:ty => $node_type:path { $($field:ident),* $(,)? }) => {
        impl $crate::Node for $ty {
            fn node_type(&self) -> $crate::NodeType {
                $node_type
            }

            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Object(vec![
                    $($crate::Attribute::new(stringify!($field), &self.$field)),*
                ])
            }
        }
    };
}

macro_rules! leaf_node {
    ($node_type:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Node for $ty {
                fn node_type(&self) -> NodeType {
                    $node_type
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Leaf
                }
            }
        )+
    };
}

leaf_node!(NodeType::INT => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
leaf_node!(NodeType::FLOAT => f32, f64);
leaf_node!(NodeType::BOOL => bool);
leaf_node!(NodeType::CHAR => char);
leaf_node!(NodeType::STR => String, &'static str);
leaf_node!(NodeType::UNIT => ());

impl<T: Node> Node for Vec<T> {
    fn node_type(&self) -> NodeType {
        NodeType::LIST
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Node).collect())
    }
}

impl<T: Node, const N: usize> Node for [T; N] {
    fn node_type(&self) -> NodeType {
        NodeType::LIST
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Node).collect())
    }
}

impl<T: Node> Node for VecDeque<T> {
    fn node_type(&self) -> NodeType {
        NodeType::DEQUE
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Node).collect())
    }
}

impl<K: 'static, V: Node> Node for BTreeMap<K, V> {
    fn node_type(&self) -> NodeType {
        NodeType::BTREE_MAP
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self.values().map(|value| value as &dyn Node).collect())
    }
}

impl<K: 'static, V: Node, S: 'static> Node for HashMap<K, V, S> {
    fn node_type(&self) -> NodeType {
        NodeType::HASH_MAP
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self.values().map(|value| value as &dyn Node).collect())
    }
}

// `Some` passes through to the inner value; `None` is a terminal.
impl<T: Node> Node for Option<T> {
    fn node_type(&self) -> NodeType {
        NodeType::OPTION
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => Shape::Sequence(vec![inner as &dyn Node]),
            None => Shape::Leaf,
        }
    }
}

macro_rules! pointer_node {
    ($($ptr:ident),+) => {
        $(
            impl<T: Node> Node for $ptr<T> {
                fn node_type(&self) -> NodeType {
                    NodeType::POINTER
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Sequence(vec![&**self as &dyn Node])
                }
            }
        )+
    };
}

pointer_node!(Box, Rc, Arc);
