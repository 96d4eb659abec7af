//! Class hierarchy generation.
//!
//! Walks a normalized module top-down and builds one [`ClassUnit`] per
//! container and list. Nested classes live in a sub-package named after
//! their parent element.

use crate::diagnostics::Diagnostics;
use crate::error::CodegenError;
use crate::ir::{ClassChild, ClassKind, ClassUnit, ListChild, Member, ValueChild, ValueForm, ValueKind};
use crate::keys::{KeySpec, extract_keys, leaf_mapping};
use crate::members::{container_members, leaf_list_members, leaf_members, list_members};
use crate::naming::{capitalize, java_identifier};
use ironyang_schema::{Keyword, NodeId, SchemaTree};

/// Module-wide facts shared by every class of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    /// Module (or submodule) name.
    pub name: String,
    /// XML namespace of the generated elements.
    pub namespace: String,
    /// Module prefix, as declared.
    pub prefix: String,
    /// Name of the root class holding `NAMESPACE` and `PREFIX`.
    pub root_class: String,
    /// Provenance line written into every file header.
    pub provenance: String,
}

impl ModuleContext {
    /// Collects the context of a module or submodule.
    ///
    /// A submodule takes its prefix from `belongs-to` and has no namespace
    /// of its own.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingNamespace` if the namespace or prefix
    /// cannot be found.
    pub fn from_module(tree: &SchemaTree, module: NodeId) -> Result<Self, CodegenError> {
        let name = tree.arg(module).to_string();

        let (namespace, prefix) = if *tree.keyword(module) == Keyword::Submodule {
            let prefix = tree
                .find_child(module, &Keyword::BelongsTo, None)
                .and_then(|b| tree.child_arg(b, &Keyword::Prefix))
                .ok_or_else(|| CodegenError::missing_namespace(&name, "belongs-to prefix"))?;
            (format!("<unknown/prefix: {prefix}>"), prefix.to_string())
        } else {
            let namespace = tree
                .child_arg(module, &Keyword::Namespace)
                .ok_or_else(|| CodegenError::missing_namespace(&name, "namespace"))?;
            let prefix = tree
                .child_arg(module, &Keyword::Prefix)
                .ok_or_else(|| CodegenError::missing_namespace(&name, "prefix"))?;
            (namespace.to_string(), prefix.to_string())
        };

        let revision = tree.latest_revision(module).unwrap_or("unknown");
        Ok(Self {
            provenance: format!("module \"{name}\", revision: \"{revision}\"."),
            root_class: capitalize(&java_identifier(&prefix)),
            name,
            namespace,
            prefix,
        })
    }
}

/// Classes of one module, plus the lists that could not be generated.
#[derive(Debug, Default)]
pub struct Hierarchy {
    /// Generated classes. Nested classes precede their parent.
    pub classes: Vec<ClassUnit>,
    /// Errors that caused a class to be skipped.
    pub failures: Vec<CodegenError>,
}

/// Position of a class in the hierarchy.
#[derive(Debug, Clone)]
struct ClassContext {
    package: String,
    path: String,
    top_level: bool,
}

/// Generator for the class hierarchy of one module.
pub struct HierarchyGenerator<'a> {
    tree: &'a SchemaTree,
    module: &'a ModuleContext,
    package: &'a str,
}

impl<'a> HierarchyGenerator<'a> {
    /// Creates a new hierarchy generator.
    ///
    /// # Arguments
    /// * `tree` - Normalized schema tree
    /// * `module` - Context of the module being generated
    /// * `package` - Java package of the top-level classes
    #[must_use]
    pub fn new(tree: &'a SchemaTree, module: &'a ModuleContext, package: &'a str) -> Self {
        Self {
            tree,
            module,
            package,
        }
    }

    /// Generates the classes for every top-level container and list.
    ///
    /// A list whose key does not name a leaf is skipped together with its
    /// subtree and recorded in [`Hierarchy::failures`].
    pub fn generate(&self, module: NodeId, diagnostics: &mut Diagnostics) -> Hierarchy {
        let mut out = Hierarchy::default();
        let context = ClassContext {
            package: self.package.to_string(),
            path: String::new(),
            top_level: true,
        };

        for child in self.tree.all_children(module) {
            if !self.tree.keyword(child).is_container(false) {
                continue;
            }
            if let Err(err) = self.generate_class(child, &context, &mut out, diagnostics) {
                self.record_failure(err, &mut out);
            }
        }
        out
    }

    /// Generates the class of `node` and, recursively, its nested classes.
    ///
    /// Returns the keys of `node` so that the parent can build its
    /// accessors. Only a failure of `node` itself is returned; failures of
    /// nested lists are recorded in `out`.
    fn generate_class(
        &self,
        node: NodeId,
        context: &ClassContext,
        out: &mut Hierarchy,
        diagnostics: &mut Diagnostics,
    ) -> Result<KeySpec, CodegenError> {
        let tree = self.tree;
        let element = tree.arg(node);
        let name = capitalize(element);
        let kind = if *tree.keyword(node) == Keyword::List {
            ClassKind::List
        } else {
            ClassKind::Container
        };
        let keys = match kind {
            ClassKind::List => extract_keys(tree, node, diagnostics)?,
            ClassKind::Container => KeySpec::default(),
        };

        let nested = ClassContext {
            package: format!("{}.{element}", context.package),
            path: format!("{}{element}/", context.path),
            top_level: false,
        };
        let key_names = tree.key_names(node);
        let mut access = Vec::new();
        let mut fields = Vec::new();

        for child in tree.all_children(node) {
            let child_name = tree.arg(child).to_string();
            match tree.keyword(child) {
                Keyword::Leaf => {
                    let leaf = ValueChild {
                        mapping: leaf_mapping(tree, child, diagnostics),
                        name: child_name,
                        kind: ValueKind::Leaf,
                    };
                    let is_key = key_names.contains(&leaf.name.as_str());
                    access.extend(leaf_members(&leaf, is_key));
                }
                Keyword::LeafList => {
                    let leaf_list = ValueChild {
                        mapping: leaf_mapping(tree, child, diagnostics),
                        name: child_name,
                        kind: ValueKind::LeafList,
                    };
                    access.extend(leaf_list_members(&leaf_list));
                }
                Keyword::Container => {
                    if let Err(err) = self.generate_class(child, &nested, out, diagnostics) {
                        self.record_failure(err, out);
                        continue;
                    }
                    let container = ClassChild {
                        class: capitalize(&child_name),
                        name: child_name,
                    };
                    access.extend(container_members(&container));
                    fields.push(container);
                }
                Keyword::List => match self.generate_class(child, &nested, out, diagnostics) {
                    Ok(child_keys) => {
                        let list = ListChild {
                            child: ClassChild {
                                class: capitalize(&child_name),
                                name: child_name,
                            },
                            keys: child_keys,
                        };
                        access.extend(list_members(&list));
                    }
                    Err(err) => self.record_failure(err, out),
                },
                _ => {}
            }
        }

        let mut members = vec![Member::Constructor(None)];
        if kind == ClassKind::List && !keys.is_empty() {
            members.push(Member::Constructor(Some(ValueForm::Wrapper)));
            members.push(Member::Constructor(Some(ValueForm::String)));
            if !keys.all_stringlike {
                members.push(Member::Constructor(Some(ValueForm::Primitive)));
            }
        }
        members.push(Member::Clone { shallow: false });
        members.push(Member::Clone { shallow: true });
        members.push(Member::KeyNames);
        members.push(Member::ChildrenNames);
        members.extend(access);
        if !fields.is_empty() {
            members.push(Member::AddChild);
        }

        tracing::debug!(class = %name, package = %context.package, "generated class");
        out.classes.push(ClassUnit {
            description: format!(
                "This class represents a \"{}{element}\" element\nfrom the namespace {}",
                context.path, self.module.namespace
            ),
            element: element.to_string(),
            kind,
            package: context.package.clone(),
            provenance: self.module.provenance.clone(),
            root: self.module.root_class.clone(),
            top_level: context.top_level,
            keys: keys.clone(),
            children: tree
                .data_children(node)
                .into_iter()
                .map(|ch| tree.arg(ch).to_string())
                .collect(),
            fields,
            members,
            name,
        });
        Ok(keys)
    }

    fn record_failure(&self, err: CodegenError, out: &mut Hierarchy) {
        tracing::error!(module = %self.module.name, error = %err, "skipping class");
        out.failures.push(err);
    }
}
