//! Schema metadata document.
//!
//! The ConfM runtime loads a `<Root>.schema` document describing the
//! cardinality and children of every node it can instantiate. Nodes are
//! listed flat, in document order, each identified by its tag path.

use ironyang_schema::{Keyword, NodeId, SchemaTree};

/// Occurrence bounds of a node. A `max` of `-1` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// Minimum number of occurrences.
    pub min: i32,
    /// Maximum number of occurrences, `-1` if unbounded.
    pub max: i32,
}

impl Cardinality {
    /// Zero or more.
    pub const UNBOUNDED: Self = Self { min: 0, max: -1 };
    /// Exactly one.
    pub const ONE: Self = Self { min: 1, max: 1 };
}

/// Computes the cardinality of a node.
///
/// Rules apply in order, later ones overriding single bounds:
/// modules, key leaves and containers directly below a container or list
/// occur exactly once; `mandatory true` raises the minimum to one;
/// `unique true`, any child of a container or list, and any container cap
/// the maximum at one.
#[must_use]
pub fn cardinality(tree: &SchemaTree, id: NodeId) -> Cardinality {
    let keyword = tree.keyword(id);
    let in_container = tree
        .parent(id)
        .is_some_and(|p| tree.keyword(p).is_container(false));
    let is_key = tree
        .parent(id)
        .is_some_and(|p| *tree.keyword(p) == Keyword::List)
        && tree.is_key_leaf(id);

    let mut occurs = Cardinality::UNBOUNDED;
    if keyword.is_module() || is_key || (in_container && keyword.is_container(true)) {
        occurs = Cardinality::ONE;
    }
    if tree.flag(id, &Keyword::Mandatory) {
        occurs.min = 1;
    }
    if tree.flag(id, &Keyword::Unique) || in_container || keyword.is_container(true) {
        occurs.max = 1;
    }
    occurs
}

/// Returns true if the node is described in the schema document.
fn in_schema(keyword: &Keyword) -> bool {
    keyword.is_module() || matches!(keyword, Keyword::Container | Keyword::List | Keyword::Leaf)
}

/// One `<node>` entry of the schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRecord {
    /// Tag path, `/` for the module and `/a/b/` below it.
    pub tagpath: String,
    /// Occurrence bounds.
    pub cardinality: Cardinality,
    /// Identifiers of the data children.
    pub children: Vec<String>,
}

/// Collects the schema records of a module in document order.
#[must_use]
pub fn schema_records(tree: &SchemaTree, module: NodeId) -> Vec<SchemaRecord> {
    let mut records = Vec::new();
    collect(tree, module, "/".to_string(), &mut records);
    records
}

fn collect(tree: &SchemaTree, id: NodeId, tagpath: String, records: &mut Vec<SchemaRecord>) {
    let children = tree.data_children(id);
    records.push(SchemaRecord {
        cardinality: cardinality(tree, id),
        children: children.iter().map(|&ch| tree.arg(ch).to_string()).collect(),
        tagpath: tagpath.clone(),
    });
    for child in children {
        if in_schema(tree.keyword(child)) {
            let path = format!("{tagpath}{}/", tree.arg(child));
            collect(tree, child, path, records);
        }
    }
}

/// Renders the schema document of a module.
///
/// # Arguments
/// * `tree` - Normalized schema tree
/// * `module` - Module to describe
/// * `namespace` - Namespace written into every node
#[must_use]
pub fn schema_document(tree: &SchemaTree, module: NodeId, namespace: &str) -> String {
    let mut output = String::from("<schema>\n");
    for record in schema_records(tree, module) {
        output.push_str("    <node>\n");
        output.push_str(&format!("        <tagpath>{}</tagpath>\n", record.tagpath));
        output.push_str(&format!("        <namespace>{namespace}</namespace>\n"));
        output.push_str("        <primitive_type></primitive_type>\n");
        output.push_str(&format!(
            "        <min_occurs>{}</min_occurs>\n",
            record.cardinality.min
        ));
        output.push_str(&format!(
            "        <max_occurs>{}</max_occurs>\n",
            record.cardinality.max
        ));
        output.push_str(&format!(
            "        <children>{}</children>\n",
            record.children.join(" ")
        ));
        output.push_str("        <flags></flags>\n");
        output.push_str("        <desc></desc>\n");
        output.push_str("    </node>\n");
    }
    output.push_str("</schema>\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironyang_schema::parse_yin;

    const MODULE: &str = r#"<module name="m" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:m"/>
  <prefix value="m"/>
  <list name="item">
    <key value="id"/>
    <leaf name="id"><type name="string"/></leaf>
    <leaf name="name">
      <type name="string"/>
      <mandatory value="true"/>
    </leaf>
  </list>
  <container name="system">
    <container name="clock">
      <leaf name="timezone"><type name="string"/></leaf>
    </container>
    <leaf-list name="server"><type name="string"/></leaf-list>
  </container>
</module>"#;

    fn record<'a>(records: &'a [SchemaRecord], tagpath: &str) -> &'a SchemaRecord {
        records
            .iter()
            .find(|r| r.tagpath == tagpath)
            .unwrap_or_else(|| panic!("no record {tagpath}"))
    }

    #[test]
    fn test_cardinality_rules() {
        let tree = parse_yin(MODULE).expect("Failed to parse");
        let records = schema_records(&tree, tree.roots()[0]);

        assert_eq!(record(&records, "/").cardinality, Cardinality::ONE);
        assert_eq!(record(&records, "/item/").cardinality, Cardinality::UNBOUNDED);
        assert_eq!(record(&records, "/item/id/").cardinality, Cardinality::ONE);
        assert_eq!(record(&records, "/item/name/").cardinality, Cardinality::ONE);
        assert_eq!(
            record(&records, "/system/").cardinality,
            Cardinality { min: 0, max: 1 }
        );
        assert_eq!(record(&records, "/system/clock/").cardinality, Cardinality::ONE);
        assert_eq!(
            record(&records, "/system/clock/timezone/").cardinality,
            Cardinality { min: 0, max: 1 }
        );
    }

    #[test]
    fn test_key_leaf_ignores_flags() {
        let xml = r#"<module name="f" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:f"/>
  <prefix value="f"/>
  <list name="entry">
    <key value="a b"/>
    <leaf name="a">
      <type name="string"/>
      <mandatory value="false"/>
      <unique tag="false"/>
    </leaf>
    <leaf name="b">
      <type name="string"/>
      <mandatory value="true"/>
      <unique tag="true"/>
    </leaf>
  </list>
  <leaf name="unique-only">
    <type name="string"/>
    <unique tag="true"/>
  </leaf>
  <leaf name="mandatory-only">
    <type name="string"/>
    <mandatory value="true"/>
  </leaf>
  <leaf name="plain"><type name="string"/></leaf>
</module>"#;
        let tree = parse_yin(xml).expect("Failed to parse");
        let records = schema_records(&tree, tree.roots()[0]);

        assert_eq!(record(&records, "/entry/a/").cardinality, Cardinality::ONE);
        assert_eq!(record(&records, "/entry/b/").cardinality, Cardinality::ONE);
        assert_eq!(
            record(&records, "/unique-only/").cardinality,
            Cardinality { min: 0, max: 1 }
        );
        assert_eq!(
            record(&records, "/mandatory-only/").cardinality,
            Cardinality { min: 1, max: -1 }
        );
        assert_eq!(record(&records, "/plain/").cardinality, Cardinality::UNBOUNDED);
    }

    #[test]
    fn test_records_in_document_order() {
        let tree = parse_yin(MODULE).expect("Failed to parse");
        let records = schema_records(&tree, tree.roots()[0]);
        let paths: Vec<&str> = records.iter().map(|r| r.tagpath.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/item/",
                "/item/id/",
                "/item/name/",
                "/system/",
                "/system/clock/",
                "/system/clock/timezone/",
            ]
        );
        assert_eq!(record(&records, "/").children, vec!["item", "system"]);
        assert_eq!(record(&records, "/system/").children, vec!["clock", "server"]);
    }

    #[test]
    fn test_schema_document() {
        let tree = parse_yin(MODULE).expect("Failed to parse");
        let document = schema_document(&tree, tree.roots()[0], "urn:m");
        assert!(document.starts_with(
            "<schema>\n    <node>\n        <tagpath>/</tagpath>\n        <namespace>urn:m</namespace>\n"
        ));
        assert!(document.contains(
            "        <tagpath>/item/id/</tagpath>\n        <namespace>urn:m</namespace>\n        <primitive_type></primitive_type>\n        <min_occurs>1</min_occurs>\n        <max_occurs>1</max_occurs>\n        <children></children>\n"
        ));
        assert!(document.ends_with("    </node>\n</schema>\n"));
        assert_eq!(document.matches("<node>").count(), 7);
    }
}
