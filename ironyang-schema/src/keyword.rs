//! YANG statement keywords.
//!
//! This module contains the closed set of statement keywords the schema tree
//! understands, plus the YIN argument encoding of each one.

use std::fmt;

/// YANG statement keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `module` statement.
    Module,
    /// `submodule` statement.
    Submodule,
    /// `belongs-to` statement of a submodule.
    BelongsTo,
    /// `import` statement.
    Import,
    /// `include` statement.
    Include,
    /// `namespace` statement.
    Namespace,
    /// `prefix` statement.
    Prefix,
    /// `revision` statement.
    Revision,
    /// `container` data node.
    Container,
    /// `list` data node.
    List,
    /// `leaf` data node.
    Leaf,
    /// `leaf-list` data node.
    LeafList,
    /// `choice` statement.
    Choice,
    /// `case` statement.
    Case,
    /// `grouping` definition.
    Grouping,
    /// `uses` of a grouping.
    Uses,
    /// `typedef` definition.
    Typedef,
    /// `type` reference.
    Type,
    /// `key` declaration of a list.
    Key,
    /// `mandatory` flag.
    Mandatory,
    /// `unique` flag.
    Unique,
    /// `range` restriction.
    Range,
    /// `length` restriction.
    Length,
    /// `pattern` restriction.
    Pattern,
    /// `default` value.
    Default,
    /// `config` flag.
    Config,
    /// `units` statement.
    Units,
    /// `status` statement.
    Status,
    /// `value` of an enum.
    Value,
    /// `enum` of an enumeration.
    Enum,
    /// `feature` definition.
    Feature,
    /// `if-feature` reference.
    IfFeature,
    /// `identity` definition.
    Identity,
    /// `base` reference.
    Base,
    /// `description` text.
    Description,
    /// `reference` text.
    Reference,
    /// `contact` text.
    Contact,
    /// `organization` text.
    Organization,
    /// Any keyword without dedicated handling.
    Other(String),
}

/// How a keyword carries its argument in YIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YinArgument {
    /// The argument is an XML attribute with the given name.
    Attribute(&'static str),
    /// The argument is the text of a child `<text>` element.
    TextElement,
    /// The keyword takes no argument.
    None,
}

impl Keyword {
    /// Parses a keyword from its YANG name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "module" => Self::Module,
            "submodule" => Self::Submodule,
            "belongs-to" => Self::BelongsTo,
            "import" => Self::Import,
            "include" => Self::Include,
            "namespace" => Self::Namespace,
            "prefix" => Self::Prefix,
            "revision" => Self::Revision,
            "container" => Self::Container,
            "list" => Self::List,
            "leaf" => Self::Leaf,
            "leaf-list" => Self::LeafList,
            "choice" => Self::Choice,
            "case" => Self::Case,
            "grouping" => Self::Grouping,
            "uses" => Self::Uses,
            "typedef" => Self::Typedef,
            "type" => Self::Type,
            "key" => Self::Key,
            "mandatory" => Self::Mandatory,
            "unique" => Self::Unique,
            "range" => Self::Range,
            "length" => Self::Length,
            "pattern" => Self::Pattern,
            "default" => Self::Default,
            "config" => Self::Config,
            "units" => Self::Units,
            "status" => Self::Status,
            "value" => Self::Value,
            "enum" => Self::Enum,
            "feature" => Self::Feature,
            "if-feature" => Self::IfFeature,
            "identity" => Self::Identity,
            "base" => Self::Base,
            "description" => Self::Description,
            "reference" => Self::Reference,
            "contact" => Self::Contact,
            "organization" => Self::Organization,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the YANG name of the keyword.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Module => "module",
            Self::Submodule => "submodule",
            Self::BelongsTo => "belongs-to",
            Self::Import => "import",
            Self::Include => "include",
            Self::Namespace => "namespace",
            Self::Prefix => "prefix",
            Self::Revision => "revision",
            Self::Container => "container",
            Self::List => "list",
            Self::Leaf => "leaf",
            Self::LeafList => "leaf-list",
            Self::Choice => "choice",
            Self::Case => "case",
            Self::Grouping => "grouping",
            Self::Uses => "uses",
            Self::Typedef => "typedef",
            Self::Type => "type",
            Self::Key => "key",
            Self::Mandatory => "mandatory",
            Self::Unique => "unique",
            Self::Range => "range",
            Self::Length => "length",
            Self::Pattern => "pattern",
            Self::Default => "default",
            Self::Config => "config",
            Self::Units => "units",
            Self::Status => "status",
            Self::Value => "value",
            Self::Enum => "enum",
            Self::Feature => "feature",
            Self::IfFeature => "if-feature",
            Self::Identity => "identity",
            Self::Base => "base",
            Self::Description => "description",
            Self::Reference => "reference",
            Self::Contact => "contact",
            Self::Organization => "organization",
            Self::Other(name) => name,
        }
    }

    /// Returns how the argument of this keyword is encoded in YIN.
    #[must_use]
    pub fn yin_argument(&self) -> YinArgument {
        match self {
            Self::Namespace => YinArgument::Attribute("uri"),
            Self::Revision => YinArgument::Attribute("date"),
            Self::BelongsTo | Self::Import | Self::Include => YinArgument::Attribute("module"),
            Self::Unique => YinArgument::Attribute("tag"),
            Self::Prefix
            | Self::Key
            | Self::Mandatory
            | Self::Range
            | Self::Length
            | Self::Pattern
            | Self::Default
            | Self::Config
            | Self::Units
            | Self::Status
            | Self::Value => YinArgument::Attribute("value"),
            Self::Description | Self::Reference | Self::Contact | Self::Organization => {
                YinArgument::TextElement
            }
            Self::Other(name) => match name.as_str() {
                "input" | "output" => YinArgument::None,
                "augment" | "refine" | "deviation" => YinArgument::Attribute("target-node"),
                "when" | "must" => YinArgument::Attribute("condition"),
                "error-message" => YinArgument::TextElement,
                "min-elements" | "max-elements" | "ordered-by" | "presence" | "position"
                | "fraction-digits" | "yang-version" | "require-instance" | "path"
                | "revision-date" | "error-app-tag" | "modifier" => {
                    YinArgument::Attribute("value")
                }
                _ => YinArgument::Attribute("name"),
            },
            _ => YinArgument::Attribute("name"),
        }
    }

    /// Returns true for `module` and `submodule`.
    #[must_use]
    pub const fn is_module(&self) -> bool {
        matches!(self, Self::Module | Self::Submodule)
    }

    /// Returns true for container-like nodes: `container`, and `list` unless `strict`.
    #[must_use]
    pub const fn is_container(&self, strict: bool) -> bool {
        match self {
            Self::Container => true,
            Self::List => !strict,
            _ => false,
        }
    }

    /// Returns true for the data node kinds a class hierarchy is generated for.
    #[must_use]
    pub const fn is_data_node(&self) -> bool {
        matches!(
            self,
            Self::Container | Self::List | Self::Leaf | Self::LeafList
        )
    }

    /// Returns true for keywords of the type family (`type`, `typedef`).
    #[must_use]
    pub fn is_type_family(&self) -> bool {
        self.as_str().contains("type")
    }

    /// Returns true for keywords whose argument is a literal value rather
    /// than an identifier.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        match self {
            Self::Namespace
            | Self::Prefix
            | Self::Revision
            | Self::Description
            | Self::Reference
            | Self::Contact
            | Self::Organization
            | Self::Default
            | Self::Pattern
            | Self::Value
            | Self::Mandatory
            | Self::Unique
            | Self::Config
            | Self::Units
            | Self::Status => true,
            Self::Other(name) => matches!(
                name.as_str(),
                "when" | "must" | "error-message" | "presence" | "path" | "revision-date"
            ),
            _ => false,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
