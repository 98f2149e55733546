use pretty_assertions::assert_eq;

use super::*;
use crate::Attribute;

fn node(name: &str) -> Box<Node> {
    Box::new(Node::new(name))
}

/// `parent` with `children` linked in order.
fn with_children(mut parent: Box<Node>, children: Vec<Box<Node>>) -> Box<Node> {
    for child in children.into_iter().rev() {
        parent.prepend_child(child);
    }
    parent
}

/// `[config debug [server host=localhost port=8080 [tls]] [client]]`
fn sample_tree() -> Tree {
    let mut config = node("config");
    config.push_attribute(Attribute::flag("debug"));
    let mut server = node("server");
    server.push_attribute(Attribute::new("host", "localhost"));
    server.push_attribute(Attribute::new("port", "8080"));
    let server = with_children(server, vec![node("tls")]);
    let config = with_children(config, vec![server, node("client")]);
    Tree::new(config, 3)
}

/// A single chain of `levels` nested nodes.
fn deep_chain(levels: usize) -> Box<Node> {
    let mut inner = node("n");
    for _ in 1..levels {
        let mut parent = node("n");
        parent.prepend_child(inner);
        inner = parent;
    }
    inner
}

fn render_to_string(tree: Option<&Tree>) -> String {
    let mut out = Vec::new();
    render(tree, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// === Render ===

#[test]
fn render_lists_nodes_in_document_order() {
    let tree = sample_tree();
    assert_eq!(
        render_to_string(Some(&tree)),
        "Node: config\n\
         \x20 Attr: debug (flag)\n\
         \x20 Node: server\n\
         \x20   Attr: host = \"localhost\"\n\
         \x20   Attr: port = \"8080\"\n\
         \x20   Node: tls\n\
         \x20 Node: client\n"
    );
}

#[test]
fn render_empty_tree_placeholder() {
    assert_eq!(render_to_string(None), "(empty tree)\n");
}

#[test]
fn render_is_deterministic() {
    let tree = sample_tree();
    assert_eq!(render_to_string(Some(&tree)), render_to_string(Some(&tree)));
}

#[test]
fn render_includes_top_level_siblings() {
    let tree = Tree::from_roots(vec![node("a"), node("b")], 1).unwrap();
    assert_eq!(render_to_string(Some(&tree)), "Node: a\nNode: b\n");
}

#[test]
fn render_reports_understated_depth() {
    // The first child has both a sibling and a child: two slots at depth 1.
    let root = with_children(node("r"), vec![deep_chain(2), node("b")]);
    let tree = Tree::new(root, 1);
    let mut out = Vec::new();
    let err = render(Some(&tree), &mut out).unwrap_err();
    assert!(matches!(err, RenderError::Stack(StackError::Overflow { capacity: 1 })));
}

// === Preorder ===

#[test]
fn preorder_yields_levels() {
    let tree = sample_tree();
    let visited: Vec<(String, usize)> = tree
        .preorder()
        .unwrap()
        .map(|item| item.map(|(n, level)| (n.name().to_string(), level)))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        visited,
        [
            ("config".to_string(), 0),
            ("server".to_string(), 1),
            ("tls".to_string(), 2),
            ("client".to_string(), 1),
        ]
    );
}

#[test]
fn preorder_on_deep_chain_fits_recorded_depth() {
    let levels = 10_000;
    let tree = Tree::new(deep_chain(levels), levels);
    let deepest = tree.preorder().unwrap().map(|item| item.unwrap().1).max();
    assert_eq!(deepest, Some(levels - 1));
}

// === Teardown ===

#[test]
fn release_counts_every_record() {
    let released = sample_tree().release();
    assert_eq!(
        released,
        Released {
            nodes: 4,
            attributes: 3,
        }
    );
}

#[test]
fn release_single_node() {
    let released = Tree::new(node("only"), 1).release();
    assert_eq!(released.nodes, 1);
    assert_eq!(released.attributes, 0);
}

#[test]
fn teardown_deep_chain_without_recursion() {
    let levels = 200_000;
    let released = Tree::new(deep_chain(levels), levels).release();
    assert_eq!(released.nodes, levels);
}

#[test]
fn teardown_long_sibling_chain() {
    let count = 200_000;
    let children = (0..count).map(|_| node("item")).collect();
    let root = with_children(node("list"), children);
    let released = Tree::new(root, 2).release();
    assert_eq!(released.nodes, count + 1);
}

#[test]
fn teardown_falls_back_when_capacity_too_small() {
    let mut root = with_children(node("r"), vec![deep_chain(3), deep_chain(3)]);
    root.push_attribute(Attribute::flag("x"));
    let released = teardown_boxed(root, 1);
    assert_eq!(
        released,
        Released {
            nodes: 7,
            attributes: 1,
        }
    );
}

#[test]
fn release_in_place_handles_wide_and_deep_shapes() {
    let left = with_children(node("l"), vec![node("l1"), deep_chain(4)]);
    let right = with_children(node("r"), vec![node("r1")]);
    let root = with_children(node("root"), vec![left, right]);
    let mut released = Released::default();
    release_in_place(root, &mut released);
    assert_eq!(released.nodes, 9);
}

#[test]
fn dropping_deep_tree_does_not_overflow() {
    let levels = 200_000;
    drop(Tree::new(deep_chain(levels), levels));
}

#[test]
fn released_adds_up() {
    let mut total = Released {
        nodes: 1,
        attributes: 2,
    };
    total += Released {
        nodes: 3,
        attributes: 4,
    };
    assert_eq!(
        total,
        Released {
            nodes: 4,
            attributes: 6,
        }
    );
}
