//! Types for reading KeyValues trees
//!

use std::{
    collections::VecDeque,
    fmt::{self, Debug},
    path::Path,
};

use tracing::instrument;
use winnow::ascii::{dec_int, float, hex_uint};
use winnow::error::ContextError;

use crate::{
    error::Result,
    parse::parse_into,
    types::{normalize, Arena, NodeId, NodeKind, ValueType},
};

/// A parsed KeyValues document
///
/// The tree owns the text it was parsed from. Every key and value handed out
/// through [`KeyValue`] borrows that text, so none of them can outlive the tree.
///
/// ```no_run
/// fn print_items(path: &str) -> valve_kv::error::Result<()> {
///     let kv = valve_kv::KeyValues::from_file(path)?;
///
///     if let Some(items) = kv.find_block("items_game").and_then(|g| g.find_block("items")) {
///         for item in items {
///             println!("{}: {}", item.key(), item.find_value("name").map_or("", |n| n.as_str()));
///         }
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct KeyValues {
    text: String,
    arena: Arena,
}

impl Debug for KeyValues {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "KeyValues({:#?})", self.root())
    }
}

impl KeyValues {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tree from text
    pub fn from_text(text: impl Into<String>) -> Result<KeyValues> {
        let mut kv = KeyValues::new();
        kv.load(text)?;
        Ok(kv)
    }

    /// Parse a tree from raw bytes, replacing invalid UTF-8 sequences
    pub fn from_bytes(bytes: Vec<u8>) -> Result<KeyValues> {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Self::from_text(text)
    }

    /// Read and parse a tree from a file
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<KeyValues> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Replace the contents of this tree by parsing `text`.
    ///
    /// On failure the tree is left empty.
    pub fn load(&mut self, text: impl Into<String>) -> Result<()> {
        self.text = text.into();
        self.arena.clear();

        if let Err(e) = parse_into(&self.text, &mut self.arena) {
            self.arena.clear();
            self.text.clear();
            return Err(e);
        }
        Ok(())
    }

    /// The text every key and value points into
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The synthetic block holding all top level entries
    pub fn root(&self) -> KeyValue<'_> {
        KeyValue {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Get a node by its handle
    pub fn get(&self, id: NodeId) -> Option<KeyValue<'_>> {
        self.arena.get(id).map(|_| KeyValue { tree: self, id })
    }

    /// Number of top level entries
    pub fn len(&self) -> usize {
        self.root().len()
    }

    /// Whether the tree has no top level entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a top level entry
    pub fn find(&self, key: &str) -> Option<KeyValue<'_>> {
        self.root().find(key)
    }

    /// Find a top level value
    pub fn find_value(&self, key: &str) -> Option<KeyValue<'_>> {
        self.root().find_value(key)
    }

    /// Find a top level block
    pub fn find_block(&self, key: &str) -> Option<KeyValue<'_>> {
        self.root().find_block(key)
    }

    /// Search the whole tree breadth first
    pub fn find_recursive(&self, key: &str) -> Option<KeyValue<'_>> {
        self.root().find_recursive(key)
    }

    /// Deep copy a subtree. The copy is detached until passed to [`KeyValues::insert`].
    pub fn copy_subtree(&mut self, id: NodeId) -> Option<NodeId> {
        self.arena.copy_subtree(id)
    }

    /// Attach a detached node to the block `parent` under its own key.
    ///
    /// Nothing happens, and `false` is returned, when `parent` is not a block,
    /// already has a child of that name, or `child` is already attached.
    pub fn insert(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.arena.attach(&self.text, parent, child)
    }
}

/// A borrowed view of a single node
#[derive(Clone, Copy)]
pub struct KeyValue<'a> {
    tree: &'a KeyValues,
    id: NodeId,
}

impl Debug for KeyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{:?}: {:?}", self.key(), value),
            None => f.debug_map().entries(self.iter().map(|c| (c.key(), c))).finish(),
        }
    }
}

impl PartialEq for KeyValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for KeyValue<'_> {}

impl<'a> KeyValue<'a> {
    /// Handle of this node, stable until the tree is parsed again
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Key with its original casing
    pub fn key(&self) -> &'a str {
        if self.id == NodeId::ROOT {
            return "root";
        }
        self.tree.arena.node(self.id).key.as_str(&self.tree.text)
    }

    pub fn value_type(&self) -> ValueType {
        self.tree.arena.node(self.id).value_type()
    }

    pub fn is_block(&self) -> bool {
        self.value_type() == ValueType::Block
    }

    pub fn is_value(&self) -> bool {
        self.value_type() == ValueType::Value
    }

    /// Value of a `"key" "value"` entry, `None` for blocks
    pub fn value(&self) -> Option<&'a str> {
        match &self.tree.arena.node(self.id).kind {
            NodeKind::Value(span) => Some(span.as_str(&self.tree.text)),
            NodeKind::Block(_) => None,
        }
    }

    /// Value of this entry, empty for blocks
    pub fn as_str(&self) -> &'a str {
        self.value().unwrap_or_default()
    }

    /// Parse the leading decimal integer of the value
    pub fn as_int(&self) -> Option<i32> {
        let mut input = self.value()?;
        dec_int::<_, i32, ContextError>(&mut input).ok()
    }

    /// Parse the value as hexadecimal, accepting a `#` or `0x` prefix
    pub fn as_hex_int(&self) -> Option<i32> {
        let value = self.value()?;
        let mut input = value
            .strip_prefix('#')
            .or_else(|| value.strip_prefix("0x"))
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);
        let parsed = hex_uint::<_, u32, ContextError>(&mut input).ok()?;
        i32::try_from(parsed).ok()
    }

    /// Parse the leading floating point number of the value
    pub fn as_float(&self) -> Option<f32> {
        let mut input = self.value()?;
        float::<_, f32, ContextError>(&mut input).ok()
    }

    /// Number of children, zero for values
    pub fn len(&self) -> usize {
        self.tree
            .arena
            .node(self.id)
            .children()
            .map_or(0, |children| children.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a direct child, ignoring ASCII case
    pub fn find(&self, key: &str) -> Option<KeyValue<'a>> {
        let children = self.tree.arena.node(self.id).children()?;
        children.get(normalize(key).as_ref()).map(|id| KeyValue {
            tree: self.tree,
            id: *id,
        })
    }

    /// Look up a direct child that holds a value
    pub fn find_value(&self, key: &str) -> Option<KeyValue<'a>> {
        self.find(key).filter(|kv| kv.is_value())
    }

    /// Look up a direct child that is a block
    pub fn find_block(&self, key: &str) -> Option<KeyValue<'a>> {
        self.find(key).filter(|kv| kv.is_block())
    }

    /// Breadth first search through this block and every nested block.
    ///
    /// Blocks are visited in insertion order, so the result is deterministic.
    pub fn find_recursive(&self, key: &str) -> Option<KeyValue<'a>> {
        let key = normalize(key);
        let mut queue = VecDeque::from([self.id]);

        while let Some(id) = queue.pop_front() {
            let Some(children) = self.tree.arena.node(id).children() else {
                continue;
            };
            if let Some(found) = children.get(key.as_ref()) {
                return Some(KeyValue {
                    tree: self.tree,
                    id: *found,
                });
            }
            queue.extend(
                children
                    .values()
                    .filter(|child| self.tree.arena.node(**child).value_type() == ValueType::Block),
            );
        }

        None
    }

    /// Iterate over the children in the order they were first seen
    pub fn iter(&self) -> Iter<'a> {
        Iter {
            tree: self.tree,
            inner: self
                .tree
                .arena
                .node(self.id)
                .children()
                .map(|children| children.values()),
        }
    }
}

/// Iterator over the children of a block
pub struct Iter<'a> {
    tree: &'a KeyValues,
    inner: Option<indexmap::map::Values<'a, String, NodeId>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = KeyValue<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.inner.as_mut()?.next()?;
        Some(KeyValue {
            tree: self.tree,
            id: *id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .as_ref()
            .map_or((0, Some(0)), |inner| inner.size_hint())
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for KeyValue<'a> {
    type Item = KeyValue<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
