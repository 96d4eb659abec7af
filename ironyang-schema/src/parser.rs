//! YIN schema parser.
//!
//! This module parses YIN documents (the XML encoding of YANG) into the
//! arena-backed [`SchemaTree`].

use crate::error::ParseError;
use crate::keyword::{Keyword, YinArgument};
use crate::tree::{NodeId, SchemaTree};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a single YIN document into a new tree.
///
/// # Arguments
/// * `xml` - YIN document content
///
/// # Returns
/// Parsed tree or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or its root element is not a
/// `module` or `submodule`.
pub fn parse_yin(xml: &str) -> Result<SchemaTree, ParseError> {
    let mut tree = SchemaTree::new();
    parse_yin_into(&mut tree, xml)?;
    Ok(tree)
}

/// Parses a YIN document and adds its module to an existing tree.
///
/// # Returns
/// Id of the new module (or submodule) node.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or its root element is not a
/// `module` or `submodule`.
pub fn parse_yin_into(tree: &mut SchemaTree, xml: &str) -> Result<NodeId, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut root: Option<NodeId> = None;
    let mut stack: Vec<Frame> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let frame = open_element(tree, &mut root, &stack, e)?;
                stack.push(frame);
            }
            Ok(Event::Empty(ref e)) => {
                open_element(tree, &mut root, &stack, e)?;
            }
            Ok(Event::Text(ref t)) => {
                if let Some(Frame::Text(owner)) = stack.last() {
                    let raw = std::str::from_utf8(t.as_ref())?;
                    let text = quick_xml::escape::unescape(raw)
                        .map_err(|err| ParseError::structure(err.to_string()))?;
                    append_arg(tree, *owner, &text);
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(Frame::Text(owner)) = stack.last() {
                    let name = std::str::from_utf8(r)?;
                    let resolved = resolve_entity(name)?;
                    append_arg(tree, *owner, &resolved);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(Frame::Text(owner)) = stack.pop() {
                    let trimmed = tree.arg(owner).trim().to_string();
                    tree.set_arg(owner, trimmed);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| ParseError::structure("No module or submodule element found"))
}

fn append_arg(tree: &mut SchemaTree, owner: NodeId, text: &str) {
    let mut arg = tree.arg(owner).to_string();
    arg.push_str(text);
    tree.set_arg(owner, arg);
}

/// Resolves a character or predefined entity reference, given without
/// `&` and `;`.
fn resolve_entity(name: &str) -> Result<String, ParseError> {
    let code = if let Some(hex) = name.strip_prefix("#x") {
        Some(u32::from_str_radix(hex, 16).ok())
    } else {
        name.strip_prefix('#').map(|dec| dec.parse::<u32>().ok())
    };

    match code {
        Some(code) => code
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| ParseError::structure(format!("invalid character reference '&{name};'"))),
        None => quick_xml::escape::resolve_predefined_entity(name)
            .map(str::to_string)
            .ok_or_else(|| ParseError::structure(format!("unknown entity '&{name};'"))),
    }
}

/// Element currently open on the parser stack.
enum Frame {
    /// A schema statement.
    Node(NodeId),
    /// A `<text>` element carrying the argument of the given statement.
    Text(NodeId),
    /// An element that contributes nothing to the tree.
    Ignored,
}

/// Handles an opening (or empty) element, returning the frame it pushes.
fn open_element(
    tree: &mut SchemaTree,
    root: &mut Option<NodeId>,
    stack: &[Frame],
    e: &BytesStart<'_>,
) -> Result<Frame, ParseError> {
    let name_bytes = e.local_name().as_ref().to_vec();
    let name = std::str::from_utf8(&name_bytes)?;

    let parent = match stack.last() {
        Some(Frame::Node(id)) => Some(*id),
        Some(Frame::Text(_)) | Some(Frame::Ignored) => return Ok(Frame::Ignored),
        None => None,
    };

    if name == "text" {
        if let Some(owner) = parent {
            if tree.keyword(owner).yin_argument() == YinArgument::TextElement {
                return Ok(Frame::Text(owner));
            }
        }
    }

    let keyword = Keyword::from_name(name);
    let arg = element_argument(e, &keyword, name)?;

    let id = match parent {
        Some(parent) => tree.add_child(parent, keyword, arg),
        None => {
            if !keyword.is_module() {
                return Err(ParseError::structure(format!(
                    "root element must be module or submodule, found '{name}'"
                )));
            }
            if root.is_some() {
                return Err(ParseError::structure("more than one root element"));
            }
            let id = tree.add_root(keyword, arg);
            *root = Some(id);
            id
        }
    };

    tracing::trace!(keyword = name, "parsed YIN statement");
    Ok(Frame::Node(id))
}

/// Reads the YIN argument attribute of an element.
fn element_argument(
    e: &BytesStart<'_>,
    keyword: &Keyword,
    element: &str,
) -> Result<String, ParseError> {
    let attribute = match keyword.yin_argument() {
        YinArgument::Attribute(attribute) => attribute,
        YinArgument::TextElement | YinArgument::None => return Ok(String::new()),
    };

    for attr in e.attributes().flatten() {
        let local = attr.key.local_name();
        let key = std::str::from_utf8(local.as_ref())?;
        if key == attribute {
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(|_| ParseError::invalid_attr(element, attribute, raw))?;
            return Ok(value.into_owned());
        }
    }

    if keyword.is_module() || keyword.is_data_node() {
        return Err(ParseError::missing_attr(element, attribute));
    }
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<module name="acme-system" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="http://acme.example.com/system"/>
  <prefix value="acme"/>
  <organization>
    <text>ACME Inc.</text>
  </organization>
  <revision date="2007-06-09">
    <description><text>Initial revision.</text></description>
  </revision>
  <container name="system">
    <leaf name="host-name">
      <type name="string"/>
    </leaf>
    <list name="user">
      <key value="name"/>
      <leaf name="name"><type name="string"/></leaf>
      <leaf-list name="domain-search"><type name="string"/></leaf-list>
    </list>
  </container>
</module>"#;

    #[test]
    fn test_parse_module() {
        let tree = parse_yin(SAMPLE).expect("Failed to parse");
        assert_eq!(tree.roots().len(), 1);
        let module = tree.roots()[0];
        assert_eq!(*tree.keyword(module), Keyword::Module);
        assert_eq!(tree.arg(module), "acme-system");
        assert_eq!(
            tree.child_arg(module, &Keyword::Namespace),
            Some("http://acme.example.com/system")
        );
        assert_eq!(tree.child_arg(module, &Keyword::Prefix), Some("acme"));
        assert_eq!(tree.latest_revision(module), Some("2007-06-09"));
    }

    #[test]
    fn test_parse_text_arguments() {
        let tree = parse_yin(SAMPLE).expect("Failed to parse");
        let module = tree.roots()[0];
        assert_eq!(
            tree.child_arg(module, &Keyword::Organization),
            Some("ACME Inc.")
        );
        let revision = tree.find_child(module, &Keyword::Revision, None).unwrap();
        assert_eq!(
            tree.child_arg(revision, &Keyword::Description),
            Some("Initial revision.")
        );
    }

    #[test]
    fn test_entities_in_text_arguments() {
        let xml = r#"<module name="m" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:m"/>
  <prefix value="m"/>
  <organization>
    <text>Smith &amp; Sons &#x41;&#66;</text>
  </organization>
  <description><text>a &lt; b</text></description>
</module>"#;
        let tree = parse_yin(xml).expect("Failed to parse");
        let module = tree.roots()[0];
        assert_eq!(
            tree.child_arg(module, &Keyword::Organization),
            Some("Smith & Sons AB")
        );
        assert_eq!(tree.child_arg(module, &Keyword::Description), Some("a < b"));
    }

    #[test]
    fn test_unknown_entity_rejected() {
        let xml = r#"<module name="m" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <contact><text>&bogus;</text></contact>
</module>"#;
        assert!(parse_yin(xml).is_err());
    }

    #[test]
    fn test_parse_nested_structure() {
        let tree = parse_yin(SAMPLE).expect("Failed to parse");
        let module = tree.roots()[0];
        let system = tree
            .find_child(module, &Keyword::Container, Some("system"))
            .expect("container");
        let user = tree
            .find_child(system, &Keyword::List, Some("user"))
            .expect("list");
        assert_eq!(tree.key_names(user), vec!["name"]);
        assert_eq!(tree.path(user), "/system/user");
        let names: Vec<&str> = tree
            .data_children(user)
            .into_iter()
            .map(|ch| tree.arg(ch))
            .collect();
        assert_eq!(names, vec!["name", "domain-search"]);
    }

    #[test]
    fn test_parse_into_existing_tree() {
        let mut tree = parse_yin(SAMPLE).expect("Failed to parse");
        let second = r#"<module name="other" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:other"/>
  <prefix value="o"/>
</module>"#;
        let id = parse_yin_into(&mut tree, second).expect("Failed to parse");
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.arg(id), "other");
    }

    #[test]
    fn test_reject_non_module_root() {
        let xml = r#"<container name="x" xmlns="urn:ietf:params:xml:ns:yang:yin:1"/>"#;
        let result = parse_yin(xml);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_missing_name_attribute() {
        let xml = r#"<module name="m" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <leaf><type name="string"/></leaf>
</module>"#;
        let result = parse_yin(xml);
        assert!(matches!(result, Err(ParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_yin("").is_err());
    }
}
