//! Parse tree view over a token trace.
//!
//! The matcher only produces a flat post-order token list. This module
//! rebuilds the tree from it for tooling that wants to look at rule
//! structure (debug dumps, highlighting). The tree uses an index-based
//! arena so parent links need no reference cycles.
//!
//! # Example
//!
//! ```
//! use complexfield_core::{Parser, Rule};
//!
//! let trace = Parser::new("[1, [2]]").parse().unwrap();
//! let tree = trace.tree();
//! let root = tree.root().unwrap();
//! assert_eq!(root.rule(), Rule::ComplexField);
//! assert_eq!(root.first_child().unwrap().rule(), Rule::Array);
//! ```

use crate::event::{Rule, Token};
use crate::span::Span;

// ============================================================================
// Core Types
// ============================================================================

/// Index into the tree's node arena. Equal to the token's trace index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct NodeData {
    token: Token,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A token trace arranged as a tree.
#[derive(Debug)]
pub struct SpanTree<'a> {
    input: &'a str,
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl<'a> SpanTree<'a> {
    /// Build from post-order tokens.
    ///
    /// Each token's subtree is the `descendants` tokens right before it,
    /// so its direct children are found by hopping backwards over whole
    /// child subtrees.
    pub fn from_tokens(input: &'a str, tokens: &[Token]) -> Self {
        let mut nodes: Vec<NodeData> = tokens
            .iter()
            .map(|&token| NodeData { token, parent: None, children: Vec::new() })
            .collect();

        for (i, token) in tokens.iter().enumerate() {
            let first = i.saturating_sub(token.descendants);
            let mut j = i;
            let mut children = Vec::new();
            while j > first {
                let child = j - 1;
                children.push(NodeId::new(child));
                nodes[child].parent = Some(NodeId::new(i));
                j = child.saturating_sub(tokens[child].descendants);
            }
            children.reverse();
            nodes[i].children = children;
        }

        let roots = (0..nodes.len())
            .filter(|&i| nodes[i].parent.is_none())
            .map(NodeId::new)
            .collect();

        SpanTree { input, nodes, roots }
    }

    /// The outermost node. A complete trace has exactly one.
    pub fn root(&self) -> Option<Node<'_, 'a>> {
        self.roots.last().map(|&id| Node { tree: self, id })
    }

    /// All parentless nodes, in order.
    pub fn roots(&self) -> impl Iterator<Item = Node<'_, 'a>> + '_ {
        self.roots.iter().map(move |&id| Node { tree: self, id })
    }

    /// Every node, in trace order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_, 'a>> + '_ {
        (0..self.nodes.len()).map(move |i| Node { tree: self, id: NodeId::new(i) })
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_, 'a>> {
        if id.index() < self.nodes.len() {
            Some(Node { tree: self, id })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Indented one-node-per-line dump, for debugging.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for root in self.roots() {
            root.render_into(&mut out, 0);
        }
        out
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A lightweight handle borrowing from the tree.
#[derive(Clone, Copy)]
pub struct Node<'t, 'a: 't> {
    tree: &'t SpanTree<'a>,
    id: NodeId,
}

impl<'t, 'a: 't> Node<'t, 'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn token(&self) -> Token {
        self.tree.data(self.id).token
    }

    pub fn rule(&self) -> Rule {
        self.token().rule
    }

    pub fn span(&self) -> Span {
        self.token().span
    }

    /// Input text covered by this node.
    pub fn text(&self) -> &'a str {
        self.span().text(self.tree.input)
    }

    pub fn parent(&self) -> Option<Node<'t, 'a>> {
        self.tree.data(self.id).parent.map(|id| Node { tree: self.tree, id })
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'t, 'a>> + 't {
        let tree = self.tree;
        tree.data(self.id).children.iter().map(move |&id| Node { tree, id })
    }

    pub fn first_child(&self) -> Option<Node<'t, 'a>> {
        self.tree.data(self.id).children.first().map(|&id| Node { tree: self.tree, id })
    }

    pub fn last_child(&self) -> Option<Node<'t, 'a>> {
        self.tree.data(self.id).children.last().map(|&id| Node { tree: self.tree, id })
    }

    pub fn next_sibling(&self) -> Option<Node<'t, 'a>> {
        let parent = self.tree.data(self.id).parent?;
        let siblings = &self.tree.data(parent).children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        siblings.get(pos + 1).map(|&id| Node { tree: self.tree, id })
    }

    pub fn prev_sibling(&self) -> Option<Node<'t, 'a>> {
        let parent = self.tree.data(self.id).parent?;
        let siblings = &self.tree.data(parent).children;
        let pos = siblings.iter().position(|&id| id == self.id)?;
        pos.checked_sub(1).map(|p| Node { tree: self.tree, id: siblings[p] })
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} {} {:?}\n", self.rule(), self.span(), self.text()));
        for child in self.children() {
            child.render_into(out, depth + 1);
        }
    }
}

impl std::fmt::Debug for Node<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("rule", &self.rule())
            .field("span", &self.span())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
