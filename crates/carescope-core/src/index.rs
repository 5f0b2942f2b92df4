use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

/// One trie node. Children are owned; records are shared handles because the
/// same record sits on several key paths at once.
#[derive(Debug)]
struct IndexNode<T> {
    children: HashMap<char, IndexNode<T>>,
    records: Vec<Arc<T>>,
}

impl<T> Default for IndexNode<T> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            records: Vec::new(),
        }
    }
}

/// Case-folded character trie mapping arbitrary keys to shared records.
#[derive(Debug)]
pub struct PrefixIndex<T> {
    root: IndexNode<T>,
    node_count: usize,
    entry_count: usize,
}

impl<T> Default for PrefixIndex<T> {
    fn default() -> Self {
        Self {
            root: IndexNode::default(),
            node_count: 0,
            entry_count: 0,
        }
    }
}

impl<T> PrefixIndex<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` under `key`. Empty keys are ignored and reported as
    /// `false`; repeated inserts under the same key are kept as duplicates.
    pub fn insert(&mut self, key: &str, record: Arc<T>) -> bool {
        let folded = key.to_lowercase();
        if folded.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        for ch in folded.chars() {
            node = match node.children.entry(ch) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    self.node_count += 1;
                    entry.insert(IndexNode::default())
                }
            };
        }
        node.records.push(record);
        self.entry_count += 1;
        true
    }

    /// Every record stored at or below the node reached by `prefix`.
    ///
    /// No deduplication happens here: a record inserted under two keys that
    /// share `prefix` comes back twice. Sibling order is unspecified. An empty
    /// prefix matches nothing.
    #[must_use]
    pub fn search(&self, prefix: &str) -> Vec<Arc<T>> {
        let folded = prefix.to_lowercase();
        if folded.is_empty() {
            return Vec::new();
        }
        let mut node = &self.root;
        for ch in folded.chars() {
            let Some(child) = node.children.get(&ch) else {
                return Vec::new();
            };
            node = child;
        }

        let mut out = Vec::new();
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            out.extend(current.records.iter().cloned());
            pending.extend(current.children.values());
        }
        out
    }

    /// Drops the whole tree in one step by swapping in a fresh root.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Nodes below the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Successful inserts since the last clear.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}
