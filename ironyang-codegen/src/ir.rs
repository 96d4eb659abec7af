//! Intermediate representation of generated classes.
//!
//! Member generators produce [`Member`] values; the Java printer renders
//! them. Keeping the two apart makes the member set of a class testable
//! without looking at formatting.

use crate::keys::KeySpec;
use crate::types::TypeMapping;

/// Parameter flavor of a setter, constructor or keyed accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueForm {
    /// ConfM wrapper types.
    Wrapper,
    /// Java `String`.
    String,
    /// Java primitive types.
    Primitive,
}

/// Edit operation a leaf can be marked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkOp {
    /// `replace`
    Replace,
    /// `merge`
    Merge,
    /// `create`
    Create,
    /// `delete`
    Delete,
}

impl MarkOp {
    /// All operations, in generation order.
    pub const ALL: [Self; 4] = [Self::Replace, Self::Merge, Self::Create, Self::Delete];

    /// Returns the operation name as used in NETCONF.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Merge => "merge",
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }

    /// Returns the capitalized name used in method names.
    #[must_use]
    pub const fn method_suffix(&self) -> &'static str {
        match self {
            Self::Replace => "Replace",
            Self::Merge => "Merge",
            Self::Create => "Create",
            Self::Delete => "Delete",
        }
    }
}

/// Whether a value child is a leaf or a leaf-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Single-valued leaf.
    Leaf,
    /// Multi-valued leaf-list.
    LeafList,
}

impl ValueKind {
    /// Returns the schema keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
        }
    }
}

/// A leaf or leaf-list child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChild {
    /// Normalized identifier.
    pub name: String,
    /// Leaf or leaf-list.
    pub kind: ValueKind,
    /// Mapped value type.
    pub mapping: TypeMapping,
}

/// A container or list child that has its own class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChild {
    /// Normalized identifier, also used as field name.
    pub name: String,
    /// Class name of the child.
    pub class: String,
}

/// A list child together with its keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChild {
    /// Identifier and class.
    pub child: ClassChild,
    /// Keys of the list.
    pub keys: KeySpec,
}

/// One generated member of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Constructor; `None` takes no arguments, otherwise one argument per key.
    Constructor(Option<ValueForm>),
    /// `clone()`, or `cloneShallow()` if shallow.
    Clone {
        /// Children are not copied.
        shallow: bool,
    },
    /// `keyNames()`
    KeyNames,
    /// `childrenNames()`
    ChildrenNames,
    /// Banner comment opening the access methods of one child.
    Section {
        /// Keyword shown in the banner (`key` for key leafs).
        keyword: String,
        /// Child identifier.
        name: String,
        /// Child is optional.
        optional: bool,
    },
    /// `get<X>Value()`
    GetValue(ValueChild),
    /// `set<X>Value(...)`
    SetValue(ValueChild, ValueForm),
    /// `unset<X>Value()`
    UnsetValue(ValueChild),
    /// `add<X>()` for leafs, `addEmpty<X>()` for leaf-lists.
    AddValue(ValueChild),
    /// `mark<X><Op>(...)`; leaf-lists take the marked value.
    Mark(ValueChild, MarkOp, Option<ValueForm>),
    /// `<x>Iterator()` over leaf-list values.
    ValueIterator(ValueChild),
    /// `delete<X>(value)` for one leaf-list value.
    DeleteValue(ValueChild, ValueForm),
    /// `public X x = null;`
    ChildField(ClassChild),
    /// `add<X>()` returning the single container instance.
    AddContainer(ClassChild),
    /// `delete<X>()` for a container child.
    DeleteContainer(ClassChild),
    /// `get<X>(keys)`
    GetEntry(ListChild, ValueForm),
    /// `<x>Iterator()` over list entries.
    EntryIterator(ListChild),
    /// `add<X>(X x)`
    AttachEntry(ListChild),
    /// `add<X>(keys)`, or the filter form `add<X>()` if `None`.
    AddEntry(ListChild, Option<ValueForm>),
    /// `delete<X>(keys)`
    DeleteEntry(ListChild, ValueForm),
    /// `addChild(Element child)` dispatching to container fields.
    AddChild,
}

impl Member {
    /// Returns the identifier of the child this member accesses, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Section { name, .. } => Some(name),
            Self::GetValue(v)
            | Self::SetValue(v, _)
            | Self::UnsetValue(v)
            | Self::AddValue(v)
            | Self::Mark(v, _, _)
            | Self::ValueIterator(v)
            | Self::DeleteValue(v, _) => Some(&v.name),
            Self::ChildField(c) | Self::AddContainer(c) | Self::DeleteContainer(c) => {
                Some(&c.name)
            }
            Self::GetEntry(l, _)
            | Self::EntryIterator(l)
            | Self::AttachEntry(l)
            | Self::AddEntry(l, _)
            | Self::DeleteEntry(l, _) => Some(&l.child.name),
            Self::Constructor(_)
            | Self::Clone { .. }
            | Self::KeyNames
            | Self::ChildrenNames
            | Self::AddChild => None,
        }
    }
}

/// Whether a class represents a container or a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// A container element.
    Container,
    /// A list entry.
    List,
}

/// A generated class, before printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUnit {
    /// Class name.
    pub name: String,
    /// Element identifier of the schema node.
    pub element: String,
    /// Container or list.
    pub kind: ClassKind,
    /// Java package.
    pub package: String,
    /// Class description for the javadoc.
    pub description: String,
    /// Provenance line for the file header.
    pub provenance: String,
    /// Name of the module's root class.
    pub root: String,
    /// Class of a top-level schema node.
    pub top_level: bool,
    /// Keys of a list class.
    pub keys: KeySpec,
    /// Data children in declaration order.
    pub children: Vec<String>,
    /// Container fields, in declaration order.
    pub fields: Vec<ClassChild>,
    /// Members in output order.
    pub members: Vec<Member>,
}

impl ClassUnit {
    /// Returns the Java file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.java", self.name)
    }

    /// Returns the number of constructors.
    #[must_use]
    pub fn constructor_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| matches!(m, Member::Constructor(_)))
            .count()
    }

    /// Returns the members accessing the given child.
    pub fn members_for<'a>(&'a self, child: &'a str) -> impl Iterator<Item = &'a Member> {
        self.members
            .iter()
            .filter(move |m| m.subject() == Some(child))
    }
}
