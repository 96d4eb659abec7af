//! Reference resolution.
//!
//! Expands `uses` statements into the materialized children of the using
//! node and records type, feature, identity and grouping references that
//! cannot be satisfied. Unresolved references never abort resolution.

use crate::keyword::Keyword;
use crate::tree::{NodeId, SchemaTree};
use std::fmt;

/// YANG built-in type names.
pub const BUILTIN_TYPES: &[&str] = &[
    "binary",
    "bits",
    "boolean",
    "decimal64",
    "empty",
    "enumeration",
    "identityref",
    "instance-identifier",
    "int8",
    "int16",
    "int32",
    "int64",
    "leafref",
    "string",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "union",
];

/// Kind of definition a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `type` naming a typedef.
    Type,
    /// `if-feature` naming a feature.
    Feature,
    /// `base` naming an identity.
    Identity,
    /// `uses` naming a grouping.
    Grouping,
}

impl ReferenceKind {
    /// Returns the stable tag of this kind, e.g. `TYPE_NOT_FOUND`.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Type => "TYPE_NOT_FOUND",
            Self::Feature => "FEATURE_NOT_FOUND",
            Self::Identity => "IDENTITY_NOT_FOUND",
            Self::Grouping => "GROUPING_NOT_FOUND",
        }
    }

    const fn definition(&self) -> Keyword {
        match self {
            Self::Type => Keyword::Typedef,
            Self::Feature => Keyword::Feature,
            Self::Identity => Keyword::Identity,
            Self::Grouping => Keyword::Grouping,
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A reference the resolver could not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// What was referenced.
    pub kind: ReferenceKind,
    /// Referenced name, without prefix.
    pub name: String,
    /// Path of the referencing statement.
    pub path: String,
    /// Module containing the reference.
    pub module: NodeId,
}

/// Resolves every module of the tree.
///
/// Groupings are expanded into the materialized view of each using node.
/// The returned references are also kept on the tree.
pub fn resolve(tree: &mut SchemaTree) -> Vec<UnresolvedReference> {
    let mut unresolved = Vec::new();
    let roots = tree.roots().to_vec();

    for root in roots {
        let mut expanding = Vec::new();
        expand(tree, root, &mut expanding, &mut unresolved);
    }

    for id in tree.ids() {
        check_reference(tree, id, &mut unresolved);
    }

    for reference in &unresolved {
        tracing::debug!(
            kind = reference.kind.tag(),
            name = %reference.name,
            path = %reference.path,
            "unresolved reference"
        );
    }

    tree.set_unresolved(unresolved.clone());
    unresolved
}

/// Expands `uses` below `id`, skipping grouping bodies.
fn expand(
    tree: &mut SchemaTree,
    id: NodeId,
    expanding: &mut Vec<String>,
    unresolved: &mut Vec<UnresolvedReference>,
) {
    if *tree.keyword(id) == Keyword::Grouping {
        return;
    }

    let declared = tree.children(id).to_vec();
    let uses: Vec<NodeId> = declared
        .iter()
        .copied()
        .filter(|&ch| *tree.keyword(ch) == Keyword::Uses)
        .collect();

    if !uses.is_empty() {
        let mut view = declared.clone();
        for stmt in uses {
            let name = local_name(tree.arg(stmt)).to_string();
            let Some(grouping) = lookup(tree, id, &Keyword::Grouping, &name) else {
                unresolved.push(UnresolvedReference {
                    kind: ReferenceKind::Grouping,
                    name,
                    path: tree.path(stmt),
                    module: tree.module_of(stmt),
                });
                continue;
            };
            if expanding.contains(&name) {
                tracing::warn!(grouping = %name, "circular grouping reference");
                unresolved.push(UnresolvedReference {
                    kind: ReferenceKind::Grouping,
                    name,
                    path: tree.path(stmt),
                    module: tree.module_of(stmt),
                });
                continue;
            }

            let body = tree.children(grouping).to_vec();
            let mut copies = Vec::with_capacity(body.len());
            for source in body {
                copies.push(tree.copy_subtree(source, id));
            }

            expanding.push(name);
            for &copy in &copies {
                expand(tree, copy, expanding, unresolved);
            }
            expanding.pop();
            view.extend(copies);
        }
        tree.set_materialized(id, view);
    }

    for child in declared {
        expand(tree, child, expanding, unresolved);
    }
}

/// Records `id` if it is a reference with no matching definition in scope.
fn check_reference(tree: &SchemaTree, id: NodeId, unresolved: &mut Vec<UnresolvedReference>) {
    let kind = match tree.keyword(id) {
        Keyword::Type if !BUILTIN_TYPES.contains(&tree.arg(id)) => ReferenceKind::Type,
        Keyword::IfFeature => ReferenceKind::Feature,
        Keyword::Base => ReferenceKind::Identity,
        _ => return,
    };

    if in_grouping(tree, id) || is_foreign(tree, id) {
        return;
    }

    let name = local_name(tree.arg(id));
    let scope = tree.parent(id).unwrap_or(id);
    if lookup(tree, scope, &kind.definition(), name).is_none() {
        unresolved.push(UnresolvedReference {
            kind,
            name: name.to_string(),
            path: tree.path(id),
            module: tree.module_of(id),
        });
    }
}

/// Finds a definition visible from `scope`, searching outwards.
fn lookup(tree: &SchemaTree, scope: NodeId, keyword: &Keyword, name: &str) -> Option<NodeId> {
    tree.ancestors(scope)
        .find_map(|n| tree.find_child(n, keyword, Some(name)))
}

/// Returns true if `id` is inside a grouping body, where references are
/// checked at the point of use instead.
fn in_grouping(tree: &SchemaTree, id: NodeId) -> bool {
    tree.ancestors(id)
        .any(|n| *tree.keyword(n) == Keyword::Grouping)
}

/// Returns true if the reference is prefixed with an imported module's prefix.
fn is_foreign(tree: &SchemaTree, id: NodeId) -> bool {
    let Some((prefix, _)) = tree.arg(id).split_once(':') else {
        return false;
    };
    let module = tree.module_of(id);
    let own = tree.child_arg(module, &Keyword::Prefix).or_else(|| {
        tree.find_child(module, &Keyword::BelongsTo, None)
            .and_then(|b| tree.child_arg(b, &Keyword::Prefix))
    });
    own != Some(prefix)
}

fn local_name(arg: &str) -> &str {
    arg.rsplit_once(':').map_or(arg, |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_yin;

    const GROUPED: &str = r#"<module name="g" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:g"/>
  <prefix value="g"/>
  <feature name="fancy"/>
  <identity name="base-id"/>
  <typedef name="percent"><type name="uint8"/></typedef>
  <grouping name="endpoint">
    <leaf name="address"><type name="string"/></leaf>
    <leaf name="port"><type name="g:percent"/></leaf>
  </grouping>
  <container name="server">
    <leaf name="name"><type name="string"/></leaf>
    <uses name="endpoint"/>
    <leaf name="flavor">
      <if-feature name="fancy"/>
      <type name="identityref"><base name="base-id"/></type>
    </leaf>
  </container>
</module>"#;

    #[test]
    fn test_uses_expands_into_materialized_view() {
        let mut tree = parse_yin(GROUPED).expect("Failed to parse");
        let unresolved = resolve(&mut tree);
        assert!(unresolved.is_empty(), "{unresolved:?}");

        let module = tree.roots()[0];
        let server = tree
            .find_child(module, &Keyword::Container, Some("server"))
            .unwrap();
        let names: Vec<&str> = tree
            .data_children(server)
            .into_iter()
            .map(|ch| tree.arg(ch))
            .collect();
        assert_eq!(names, vec!["name", "flavor", "address", "port"]);

        // Declared children are untouched.
        assert!(tree.find_child(server, &Keyword::Leaf, Some("address")).is_none());
        assert!(tree
            .find_any_child(server, &Keyword::Leaf, Some("address"))
            .is_some());
    }

    #[test]
    fn test_unresolved_references_reported() {
        let xml = r#"<module name="u" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:u"/>
  <prefix value="u"/>
  <container name="c">
    <uses name="missing"/>
    <leaf name="a"><type name="no-such-type"/></leaf>
    <leaf name="b">
      <if-feature name="ghost"/>
      <type name="identityref"><base name="nothing"/></type>
    </leaf>
    <leaf name="c"><type name="ext:imported"/></leaf>
  </container>
</module>"#;
        let mut tree = parse_yin(xml).expect("Failed to parse");
        let unresolved = resolve(&mut tree);
        let kinds: Vec<ReferenceKind> = unresolved.iter().map(|r| r.kind).collect();

        assert!(kinds.contains(&ReferenceKind::Grouping));
        assert!(kinds.contains(&ReferenceKind::Type));
        assert!(kinds.contains(&ReferenceKind::Feature));
        assert!(kinds.contains(&ReferenceKind::Identity));
        assert_eq!(unresolved.len(), 4);
        assert_eq!(tree.unresolved().len(), 4);

        let missing_type = unresolved
            .iter()
            .find(|r| r.kind == ReferenceKind::Type)
            .unwrap();
        assert_eq!(missing_type.name, "no-such-type");
        assert_eq!(missing_type.path, "/c/a/no-such-type");
    }

    #[test]
    fn test_circular_grouping_is_reported() {
        let xml = r#"<module name="c" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:c"/>
  <prefix value="c"/>
  <grouping name="loop">
    <container name="inner"><uses name="loop"/></container>
  </grouping>
  <container name="top"><uses name="loop"/></container>
</module>"#;
        let mut tree = parse_yin(xml).expect("Failed to parse");
        let unresolved = resolve(&mut tree);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].kind, ReferenceKind::Grouping);
        assert_eq!(unresolved[0].name, "loop");
    }

    #[test]
    fn test_reference_kind_tags() {
        assert_eq!(ReferenceKind::Type.tag(), "TYPE_NOT_FOUND");
        assert_eq!(ReferenceKind::Grouping.to_string(), "GROUPING_NOT_FOUND");
    }
}
