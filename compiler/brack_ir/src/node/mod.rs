//! Nodes and attributes.

use std::fmt;

/// One `name` or `name=value` token inside a node.
///
/// An empty value marks a flag attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "attribute name must be non-empty");
        Attribute {
            name,
            value: value.into(),
        }
    }

    /// A flag attribute (`name` with no `=value`).
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_empty()
    }
}

/// One bracketed element.
///
/// `child` owns the first child; later children hang off its `next`
/// chain. Both links are single-owner, so a node owns everything
/// reachable through them.
///
/// `Node` has no custom `Drop`: dropping a node with a long sibling chain
/// or deep nesting directly would recurse. Owners release subtrees through
/// [`walk::teardown`](crate::walk::teardown), which [`Tree`](crate::Tree)
/// does on drop.
pub struct Node {
    name: String,
    attributes: Vec<Attribute>,
    pub(crate) child: Option<Box<Node>>,
    pub(crate) next: Option<Box<Node>>,
}

impl Node {
    /// Create a childless node.
    ///
    /// # Contract
    ///
    /// `name` must be non-empty; the scanner never produces empty names.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "node name must be non-empty");
        Node {
            name,
            attributes: Vec::new(),
            child: None,
            next: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in source order. Names may repeat.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// First attribute named `name`.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Append an attribute, keeping source order.
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.child.as_deref()
    }

    pub fn next_sibling(&self) -> Option<&Node> {
        self.next.as_deref()
    }

    /// Iterate over direct children in order.
    pub fn children(&self) -> Children<'_> {
        Children {
            next: self.child.as_deref(),
        }
    }

    /// Link `child` in front of the existing children in O(1).
    ///
    /// The tree builder collects the children of an open node newest-first
    /// this way and calls [`reverse_children`](Self::reverse_children) when
    /// the node closes.
    ///
    /// # Contract
    ///
    /// `child` must not have a sibling chain of its own.
    pub fn prepend_child(&mut self, mut child: Box<Node>) {
        debug_assert!(child.next.is_none(), "prepended child already has siblings");
        child.next = self.child.take();
        self.child = Some(child);
    }

    /// Reverse the order of the direct children in place.
    pub fn reverse_children(&mut self) {
        self.child = reverse_chain(self.child.take());
    }

    /// Release the attribute records, returning how many there were.
    pub(crate) fn clear_attributes(&mut self) -> usize {
        let count = self.attributes.len();
        self.attributes = Vec::new();
        count
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Links are summarized: a derived impl would recurse down the tree.
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("has_child", &self.child.is_some())
            .field("has_next", &self.next.is_some())
            .finish()
    }
}

/// Reverse a `next` chain iteratively, returning the new head.
pub(crate) fn reverse_chain(head: Option<Box<Node>>) -> Option<Box<Node>> {
    let mut reversed = None;
    let mut rest = head;
    while let Some(mut node) = rest {
        rest = node.next.take();
        node.next = reversed;
        reversed = Some(node);
    }
    reversed
}

/// Iterator over the direct children of a [`Node`].
#[derive(Clone, Debug)]
pub struct Children<'a> {
    next: Option<&'a Node>,
}

impl<'a> Children<'a> {
    /// Iterate over `node` and its following siblings.
    pub(crate) fn starting_at(node: &'a Node) -> Self {
        Children { next: Some(node) }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node)
    }
}
