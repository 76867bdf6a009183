//! Traversal of a small font-like model.
//!
//! Tables share a common `Table` ancestor, glyphs are stored in a mapping
//! and composite glyphs reference other glyphs by name.

mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::thread;

use nodewalk::{
    Flow, Node, NodeType, Registry, Traversal, TraversalConfig, VisitError, Visitor, node_object,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

static FONT: NodeType = NodeType::new("Font");
static TABLE: NodeType = NodeType::new("Table");
static HEAD: NodeType = NodeType::with_parent("head", &TABLE);
static MAXP: NodeType = NodeType::with_parent("maxp", &TABLE);
static GLYF: NodeType = NodeType::with_parent("glyf", &TABLE);
static GLYPH: NodeType = NodeType::new("Glyph");
static COMPONENT: NodeType = NodeType::new("Component");
static POINT: NodeType = NodeType::new("Point");

struct Head {
    units_per_em: u16,
    _checksum_adjustment: u32,
}

node_object!(Head => HEAD { units_per_em, _checksum_adjustment });

struct Maxp {
    num_glyphs: u16,
}

node_object!(Maxp => MAXP { num_glyphs });

struct Point {
    x: i16,
    y: i16,
}

node_object!(Point => POINT { x, y });

struct Component {
    glyph_name: String,
    x_offset: i16,
}

node_object!(Component => COMPONENT { glyph_name, x_offset });

struct Glyph {
    points: Vec<Point>,
    components: Vec<Component>,
}

node_object!(Glyph => GLYPH { points, components });

struct Glyf {
    glyphs: BTreeMap<String, Glyph>,
}

node_object!(Glyf => GLYF { glyphs });

struct Font {
    head: Head,
    maxp: Maxp,
    glyf: Option<Box<Glyf>>,
    _source_path: String,
}

node_object!(Font => FONT { head, maxp, glyf, _source_path });

fn simple(points: &[(i16, i16)]) -> Glyph {
    Glyph {
        points: points.iter().map(|&(x, y)| Point { x, y }).collect(),
        components: Vec::new(),
    }
}

fn composite(components: &[(&str, i16)]) -> Glyph {
    Glyph {
        points: Vec::new(),
        components: components
            .iter()
            .map(|&(name, x_offset)| Component {
                glyph_name: name.to_string(),
                x_offset,
            })
            .collect(),
    }
}

fn sample_font() -> Font {
    let glyphs = BTreeMap::from([
        ("A".to_string(), simple(&[(0, 0), (300, 700), (600, 0)])),
        ("acute".to_string(), simple(&[(250, 750), (350, 850)])),
        ("Aacute".to_string(), composite(&[("A", 0), ("acute", 20)])),
    ]);
    Font {
        head: Head {
            units_per_em: 1000,
            _checksum_adjustment: 0xB1B0_AFBA,
        },
        maxp: Maxp { num_glyphs: 3 },
        glyf: Some(Box::new(Glyf { glyphs })),
        _source_path: "Sample.ttf".to_string(),
    }
}

/// Lists the tables it meets without looking inside them.
struct TableLister {
    registry: Arc<Registry<TableLister>>,
    tables: Vec<&'static str>,
}

impl Visitor for TableLister {
    type Error = VisitError;

    fn registry(&self) -> Arc<Registry<Self>> {
        Arc::clone(&self.registry)
    }
}

#[test]
fn table_handler_catches_every_table_subtype() {
    common::init_tracing();

    let registry = Registry::builder()
        .register_type(TABLE, |cx: &mut Traversal<'_, TableLister>, node: &dyn Node| {
            cx.tables.push(node.node_type().name());
            Ok(Flow::Stop)
        })
        .build();
    let mut lister = TableLister {
        registry: Arc::new(registry),
        tables: Vec::new(),
    };

    lister.visit(&sample_font()).unwrap();

    assert_eq!(lister.tables, vec!["head", "maxp", "glyf"]);
}

#[derive(Debug, thiserror::Error)]
enum SubsetError {
    #[error(transparent)]
    Visit(#[from] VisitError),
    #[error("component references missing glyph '{0}'")]
    MissingGlyph(String),
}

/// Collects the glyph names that composite glyphs depend on.
struct ComponentCollector {
    registry: Arc<Registry<ComponentCollector>>,
    available: BTreeSet<String>,
    referenced: Vec<String>,
    points: usize,
}

impl ComponentCollector {
    fn new(registry: Arc<Registry<ComponentCollector>>, available: &[&str]) -> Self {
        Self {
            registry,
            available: available.iter().map(|name| name.to_string()).collect(),
            referenced: Vec::new(),
            points: 0,
        }
    }
}

impl Visitor for ComponentCollector {
    type Error = SubsetError;

    fn registry(&self) -> Arc<Registry<Self>> {
        Arc::clone(&self.registry)
    }
}

fn component_registry() -> Registry<ComponentCollector> {
    Registry::builder()
        .register_type(HEAD, |_: &mut Traversal<'_, ComponentCollector>, _: &dyn Node| {
            Ok(Flow::Stop)
        })
        .register_type(POINT, |cx: &mut Traversal<'_, ComponentCollector>, _: &dyn Node| {
            cx.points += 1;
            Ok(Flow::Stop)
        })
        .register_attr(
            COMPONENT,
            "glyph_name",
            |cx: &mut Traversal<'_, ComponentCollector>, _: &dyn Node, _: &str, value: &dyn Node| {
                let Some(name) = value.downcast_ref::<String>() else {
                    return Ok(Flow::Stop);
                };
                if !cx.available.contains(name) {
                    return Err(SubsetError::MissingGlyph(name.clone()));
                }
                cx.referenced.push(name.clone());
                Ok(Flow::Stop)
            },
        )
        .build()
}

#[test]
fn attribute_handler_collects_component_references() {
    let mut collector = ComponentCollector::new(Arc::new(component_registry()), &["A", "acute"]);

    collector.visit(&sample_font()).unwrap();

    assert_eq!(collector.referenced, vec!["A", "acute"]);
    assert_eq!(collector.points, 5);
}

#[test]
fn handler_error_aborts_and_keeps_partial_state() {
    let mut collector = ComponentCollector::new(Arc::new(component_registry()), &["A"]);

    let err = collector.visit(&sample_font()).unwrap_err();

    assert!(matches!(err, SubsetError::MissingGlyph(ref name) if name == "acute"));
    assert_eq!(err.to_string(), "component references missing glyph 'acute'");
    assert_eq!(collector.referenced, vec!["A"]);
    // "Aacute" sorts before "acute", so only the three points of "A" were seen.
    assert_eq!(collector.points, 3);
}

#[rstest]
#[case::roomy(r#"{"maxDepth": 64}"#, true)]
#[case::too_shallow(r#"{"maxDepth": 4}"#, false)]
fn depth_limit_comes_from_json_config(#[case] json: &str, #[case] succeeds: bool) {
    let config = TraversalConfig::from_json(json).unwrap();
    let registry = Registry::builder().with_config(config).unwrap().build();
    let mut collector = ComponentCollector::new(Arc::new(registry), &["A", "acute"]);

    let result = collector.visit(&sample_font());

    if succeeds {
        assert!(result.is_ok());
    } else {
        assert!(matches!(
            result,
            Err(SubsetError::Visit(VisitError::DepthExceeded { limit: 4 }))
        ));
    }
}

#[test]
fn custom_private_prefix_from_config() {
    let config = TraversalConfig::new().private_prefix("units");
    let registry = Registry::builder()
        .with_config(config)
        .unwrap()
        .register_type(NodeType::INT, |cx: &mut Traversal<'_, TableLister>, _: &dyn Node| {
            cx.tables.push("int");
            Ok(Flow::Continue)
        })
        .build();
    let mut lister = TableLister {
        registry: Arc::new(registry),
        tables: Vec::new(),
    };

    let head = Head {
        units_per_em: 1000,
        _checksum_adjustment: 1,
    };
    lister.visit(&head).unwrap();

    assert_eq!(lister.tables, vec!["int"]);
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = Arc::new(component_registry());
    let font = sample_font();

    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let font = &font;
                scope.spawn(move || {
                    let mut collector = ComponentCollector::new(registry, &["A", "acute"]);
                    collector.visit(font).map(|()| collector.points)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    assert_eq!(counts, vec![5; 4]);
}
