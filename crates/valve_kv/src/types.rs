//! Arena storage backing a KeyValues tree.
//!
//! Nodes never own text. Keys and values are [`Span`]s into the buffer held by
//! [`crate::KeyValues`], so every slice handed out borrows that buffer.

use std::borrow::Cow;

use indexmap::IndexMap;

/// Byte range into the owning text buffer
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Stable handle to a node inside a [`crate::KeyValues`] tree
///
/// Handles stay valid until the tree is parsed again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The synthetic root block every tree starts from
    pub const ROOT: NodeId = NodeId(0);
}

/// Whether a node holds a single value or a nested block
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// `"key" "value"`
    Value,
    /// `"key" { ... }`
    Block,
}

/// Children of a block, keyed by their ASCII lowercased name in insertion order
pub(crate) type Children = IndexMap<String, NodeId>;

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Value(Span),
    Block(Children),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub key: Span,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl Node {
    fn block(key: Span) -> Self {
        Self {
            key,
            parent: None,
            kind: NodeKind::Block(Children::new()),
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self.kind {
            NodeKind::Value(_) => ValueType::Value,
            NodeKind::Block(_) => ValueType::Block,
        }
    }

    pub fn children(&self) -> Option<&Children> {
        match &self.kind {
            NodeKind::Block(children) => Some(children),
            NodeKind::Value(_) => None,
        }
    }
}

/// Lowercase a key for lookup, borrowing when it is already lowercase
pub(crate) fn normalize(key: &str) -> Cow<'_, str> {
    if key.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(key.to_ascii_lowercase())
    } else {
        Cow::Borrowed(key)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            nodes: vec![Node::block(Span::default())],
        }
    }
}

impl Arena {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::block(Span::default()));
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn children_mut(&mut self, id: NodeId) -> Option<&mut Children> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Block(children) => Some(children),
            NodeKind::Value(_) => None,
        }
    }

    /// Insert a value under `parent` unless the key is already taken.
    ///
    /// Returns `false` when the value was discarded.
    pub fn insert_value(&mut self, text: &str, parent: NodeId, key: Span, value: Span) -> bool {
        let name = normalize(key.as_str(text));
        if self
            .children_mut(parent)
            .map_or(true, |children| children.contains_key(name.as_ref()))
        {
            return false;
        }

        let id = self.push(Node {
            key,
            parent: Some(parent),
            kind: NodeKind::Value(value),
        });

        if let Some(children) = self.children_mut(parent) {
            children.insert(name.into_owned(), id);
        }
        true
    }

    /// Open a block under `parent`, reusing an existing block of the same name.
    ///
    /// When the name is already taken by a value the returned block is left
    /// detached, so anything parsed into it is dropped.
    pub fn open_block(&mut self, text: &str, parent: NodeId, key: Span) -> NodeId {
        let name = normalize(key.as_str(text));
        match self
            .children_mut(parent)
            .and_then(|children| children.get(name.as_ref()).copied())
        {
            Some(existing) if self.node(existing).value_type() == ValueType::Block => existing,
            Some(_) => self.push(Node::block(key)),
            None => {
                let id = self.push(Node {
                    parent: Some(parent),
                    ..Node::block(key)
                });
                if let Some(children) = self.children_mut(parent) {
                    children.insert(name.into_owned(), id);
                }
                id
            }
        }
    }

    /// Attach a detached node under `parent` by its own key.
    pub fn attach(&mut self, text: &str, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.get(child) else {
            return false;
        };
        if node.parent.is_some() || child == NodeId::ROOT || child == parent {
            return false;
        }

        let name = normalize(node.key.as_str(text)).into_owned();
        match self.children_mut(parent) {
            Some(children) if !children.contains_key(&name) => {
                children.insert(name, child);
            }
            _ => return false,
        }

        self.nodes[child.0].parent = Some(parent);
        true
    }

    /// Deep copy a subtree into fresh, detached nodes.
    pub fn copy_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        let source = self.get(id)?.clone();

        let kind = match source.kind {
            NodeKind::Value(value) => NodeKind::Value(value),
            NodeKind::Block(children) => {
                let mut copied = Children::with_capacity(children.len());
                for (name, child) in children {
                    copied.insert(name, self.copy_subtree(child)?);
                }
                NodeKind::Block(copied)
            }
        };

        let new_id = self.push(Node {
            key: source.key,
            parent: None,
            kind,
        });

        if let NodeKind::Block(children) = &self.nodes[new_id.0].kind {
            let copied: Vec<NodeId> = children.values().copied().collect();
            for child in copied {
                self.nodes[child.0].parent = Some(new_id);
            }
        }

        Some(new_id)
    }
}
