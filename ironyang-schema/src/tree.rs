//! Arena-backed schema tree.
//!
//! Every statement of every parsed module lives in a single [`SchemaTree`]
//! and is addressed by a [`NodeId`]. Parent links are plain ids, so the tree
//! can be walked in both directions without shared ownership.

use crate::keyword::Keyword;
use crate::resolve::UnresolvedReference;
use std::collections::HashSet;

/// Index of a node in a [`SchemaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single schema statement.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// Statement keyword.
    pub keyword: Keyword,
    /// Statement argument (identifier or literal).
    pub arg: String,
    /// Enclosing statement, if any.
    pub parent: Option<NodeId>,
    /// Declared substatements in source order.
    pub children: Vec<NodeId>,
    /// Children after grouping expansion, when resolution produced any.
    pub materialized: Option<Vec<NodeId>>,
}

/// Arena holding the statements of one or more modules.
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
    roots: Vec<NodeId>,
    unresolved: Vec<UnresolvedReference>,
}

impl SchemaTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level statement (normally a module or submodule).
    pub fn add_root(&mut self, keyword: Keyword, arg: impl Into<String>) -> NodeId {
        let id = self.push(keyword, arg.into(), None);
        self.roots.push(id);
        id
    }

    /// Adds a declared substatement to `parent`.
    pub fn add_child(&mut self, parent: NodeId, keyword: Keyword, arg: impl Into<String>) -> NodeId {
        let id = self.push(keyword, arg.into(), Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Adds a node whose parent is `parent` without declaring it as a child.
    ///
    /// Such nodes only become visible through the materialized view.
    pub fn add_detached(
        &mut self,
        parent: NodeId,
        keyword: Keyword,
        arg: impl Into<String>,
    ) -> NodeId {
        self.push(keyword, arg.into(), Some(parent))
    }

    fn push(&mut self, keyword: Keyword, arg: String, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SchemaNode {
            keyword,
            arg,
            parent,
            children: Vec::new(),
            materialized: None,
        });
        id
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns every node id in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Returns the top-level statements in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Returns the keyword of a node.
    #[must_use]
    pub fn keyword(&self, id: NodeId) -> &Keyword {
        &self.nodes[id.0].keyword
    }

    /// Returns the argument of a node.
    #[must_use]
    pub fn arg(&self, id: NodeId) -> &str {
        &self.nodes[id.0].arg
    }

    /// Replaces the argument of a node.
    pub fn set_arg(&mut self, id: NodeId, arg: String) {
        self.nodes[id.0].arg = arg;
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the declared children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the materialized children of a node, if resolution set any.
    #[must_use]
    pub fn materialized(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes[id.0].materialized.as_deref()
    }

    /// Sets the materialized view of a node.
    pub fn set_materialized(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id.0].materialized = Some(children);
    }

    /// Returns declared children followed by materialized children that are
    /// not also declared.
    #[must_use]
    pub fn all_children(&self, id: NodeId) -> Vec<NodeId> {
        let declared = self.children(id);
        let mut out = declared.to_vec();
        if let Some(materialized) = self.materialized(id) {
            let seen: HashSet<NodeId> = declared.iter().copied().collect();
            out.extend(materialized.iter().filter(|ch| !seen.contains(ch)));
        }
        out
    }

    /// Returns the container, list, leaf and leaf-list children of a node.
    #[must_use]
    pub fn data_children(&self, id: NodeId) -> Vec<NodeId> {
        self.all_children(id)
            .into_iter()
            .filter(|&ch| self.keyword(ch).is_data_node())
            .collect()
    }

    /// Finds the first declared child with the given keyword and, optionally,
    /// the given argument.
    #[must_use]
    pub fn find_child(&self, id: NodeId, keyword: &Keyword, arg: Option<&str>) -> Option<NodeId> {
        self.children(id).iter().copied().find(|&ch| {
            self.keyword(ch) == keyword && arg.is_none_or(|a| self.arg(ch) == a)
        })
    }

    /// Like [`find_child`](Self::find_child) but also searches the
    /// materialized view.
    #[must_use]
    pub fn find_any_child(
        &self,
        id: NodeId,
        keyword: &Keyword,
        arg: Option<&str>,
    ) -> Option<NodeId> {
        self.all_children(id).into_iter().find(|&ch| {
            self.keyword(ch) == keyword && arg.is_none_or(|a| self.arg(ch) == a)
        })
    }

    /// Returns the argument of the first declared child with the given keyword.
    #[must_use]
    pub fn child_arg(&self, id: NodeId, keyword: &Keyword) -> Option<&str> {
        self.find_child(id, keyword, None).map(|ch| self.arg(ch))
    }

    /// Returns true if the node has a `keyword` child whose argument is `true`.
    #[must_use]
    pub fn flag(&self, id: NodeId, keyword: &Keyword) -> bool {
        self.child_arg(id, keyword) == Some("true")
    }

    /// Returns the identifiers of the node's key declaration, in order.
    #[must_use]
    pub fn key_names(&self, id: NodeId) -> Vec<&str> {
        self.child_arg(id, &Keyword::Key)
            .map(|decl| decl.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Returns true if the node is named by its parent's key declaration.
    #[must_use]
    pub fn is_key_leaf(&self, id: NodeId) -> bool {
        self.parent(id)
            .is_some_and(|parent| self.key_names(parent).contains(&self.arg(id)))
    }

    /// Returns the ancestors of a node, nearest first, including the node.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.parent(n))
    }

    /// Returns the module or submodule that encloses a node.
    #[must_use]
    pub fn module_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id)
            .find(|&n| self.keyword(n).is_module())
            .or_else(|| self.ancestors(id).last())
            .unwrap_or(id)
    }

    /// Returns the slash-separated path of a node below its module.
    #[must_use]
    pub fn path(&self, id: NodeId) -> String {
        let mut segments: Vec<&str> = self
            .ancestors(id)
            .take_while(|&n| !self.keyword(n).is_module())
            .map(|n| self.arg(n))
            .collect();
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Returns the most recent revision date of a module.
    #[must_use]
    pub fn latest_revision(&self, module: NodeId) -> Option<&str> {
        self.children(module)
            .iter()
            .filter(|&&ch| *self.keyword(ch) == Keyword::Revision)
            .map(|&ch| self.arg(ch))
            .max()
    }

    /// Copies the subtree rooted at `source` below `parent`.
    ///
    /// The copy is detached: it is not added to `parent`'s declared children.
    pub fn copy_subtree(&mut self, source: NodeId, parent: NodeId) -> NodeId {
        let keyword = self.keyword(source).clone();
        let arg = self.arg(source).to_string();
        let copy = self.add_detached(parent, keyword, arg);
        let children = self.children(source).to_vec();
        for child in children {
            let child_copy = self.copy_subtree(child, copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    /// Returns references the resolver could not satisfy.
    #[must_use]
    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    pub(crate) fn set_unresolved(&mut self, unresolved: Vec<UnresolvedReference>) {
        self.unresolved = unresolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (SchemaTree, NodeId, NodeId) {
        let mut tree = SchemaTree::new();
        let module = tree.add_root(Keyword::Module, "m");
        tree.add_child(module, Keyword::Revision, "2011-03-01");
        tree.add_child(module, Keyword::Revision, "2012-06-15");
        let list = tree.add_child(module, Keyword::List, "item");
        tree.add_child(list, Keyword::Key, "id  sub");
        let id = tree.add_child(list, Keyword::Leaf, "id");
        tree.add_child(id, Keyword::Type, "string");
        tree.add_child(list, Keyword::Leaf, "sub");
        (tree, module, list)
    }

    #[test]
    fn test_find_child_and_keys() {
        let (tree, _, list) = sample();
        assert_eq!(tree.key_names(list), vec!["id", "sub"]);
        let id = tree
            .find_child(list, &Keyword::Leaf, Some("id"))
            .expect("leaf id");
        assert!(tree.is_key_leaf(id));
        assert_eq!(tree.child_arg(id, &Keyword::Type), Some("string"));
        assert!(tree.find_child(list, &Keyword::Leaf, Some("nope")).is_none());
    }

    #[test]
    fn test_path_and_module() {
        let (tree, module, list) = sample();
        let id = tree.find_child(list, &Keyword::Leaf, Some("id")).unwrap();
        assert_eq!(tree.path(id), "/item/id");
        assert_eq!(tree.module_of(id), module);
        assert_eq!(tree.latest_revision(module), Some("2012-06-15"));
    }

    #[test]
    fn test_all_children_dedups_materialized() {
        let (mut tree, module, list) = sample();
        let declared = tree.children(list).to_vec();
        let extra = tree.add_detached(list, Keyword::Leaf, "extra");
        let mut view = vec![extra];
        view.extend(declared.iter().copied());
        tree.set_materialized(list, view);

        let all = tree.all_children(list);
        assert_eq!(&all[..declared.len()], &declared[..]);
        assert_eq!(all.last(), Some(&extra));
        assert_eq!(all.len(), declared.len() + 1);

        let data: Vec<&str> = tree
            .data_children(list)
            .into_iter()
            .map(|ch| tree.arg(ch))
            .collect();
        assert_eq!(data, vec!["id", "sub", "extra"]);
        assert!(tree.data_children(module).contains(&list));
    }

    #[test]
    fn test_copy_subtree_is_detached() {
        let (mut tree, module, list) = sample();
        let before = tree.children(module).len();
        let copy = tree.copy_subtree(list, module);
        assert_eq!(tree.children(module).len(), before);
        assert_eq!(tree.parent(copy), Some(module));
        assert_eq!(tree.children(copy).len(), tree.children(list).len());
        assert_eq!(tree.key_names(copy), vec!["id", "sub"]);
    }
}
