//! Mapping of YANG primitive types onto ConfM value types.
//!
//! Every leaf value is exposed twice in generated code: as a ConfM wrapper
//! (`com.tailf.confm.xs.*`) and, where one exists, as a Java primitive.

use crate::diagnostics::Diagnostics;
use std::fmt;

/// Package of the ConfM value types.
pub const XS_PACKAGE: &str = "com.tailf.confm.xs";

/// ConfM wrapper type of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrapper {
    /// `xs.String`
    String,
    /// `xs.Byte`
    Byte,
    /// `xs.Short`
    Short,
    /// `xs.Int`
    Int,
    /// `xs.Long`
    Long,
    /// `xs.UnsignedByte`
    UnsignedByte,
    /// `xs.UnsignedShort`
    UnsignedShort,
    /// `xs.UnsignedInt`
    UnsignedInt,
    /// `xs.UnsignedLong`
    UnsignedLong,
    /// `xs.Boolean`
    Boolean,
}

impl Wrapper {
    /// Returns the unqualified class name.
    #[must_use]
    pub const fn simple_name(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::UnsignedByte => "UnsignedByte",
            Self::UnsignedShort => "UnsignedShort",
            Self::UnsignedInt => "UnsignedInt",
            Self::UnsignedLong => "UnsignedLong",
            Self::Boolean => "Boolean",
        }
    }

    /// Returns the fully qualified Java class name.
    #[must_use]
    pub fn java_type(&self) -> String {
        format!("{XS_PACKAGE}.{}", self.simple_name())
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{XS_PACKAGE}.{}", self.simple_name())
    }
}

/// Java type used for the plain-value overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `String`
    String,
    /// `byte`
    Byte,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `boolean`
    Boolean,
}

impl Primitive {
    /// Returns the Java spelling of the type.
    #[must_use]
    pub const fn java_type(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.java_type())
    }
}

/// The (wrapper, primitive) pair of a schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeMapping {
    /// ConfM wrapper type.
    pub wrapper: Wrapper,
    /// Java primitive (or `String`).
    pub primitive: Primitive,
}

impl TypeMapping {
    /// The string fallback used for unsupported types.
    pub const STRING: Self = Self::new(Wrapper::String, Primitive::String);

    /// Creates a mapping.
    #[must_use]
    pub const fn new(wrapper: Wrapper, primitive: Primitive) -> Self {
        Self { wrapper, primitive }
    }

    /// Returns true if the primitive form is `String`.
    #[must_use]
    pub const fn is_stringlike(&self) -> bool {
        matches!(self.primitive, Primitive::String)
    }
}

/// Maps a schema type name to its ConfM and Java types.
///
/// Integer names with an unknown width are read as `int`; any other
/// unsupported name falls back to string. Both cases are reported to
/// `diagnostics`, once per distinct name.
pub fn map_type(name: &str, diagnostics: &mut Diagnostics) -> TypeMapping {
    match name {
        "string" => return TypeMapping::STRING,
        "boolean" => return TypeMapping::new(Wrapper::Boolean, Primitive::Boolean),
        _ => {}
    }

    let Some((unsigned, width)) = integer_width(name) else {
        diagnostics.unsupported_type(name);
        return TypeMapping::STRING;
    };

    let (signed_wrapper, unsigned_wrapper, primitive) = match width {
        "8" => (Wrapper::Byte, Wrapper::UnsignedByte, Primitive::Byte),
        "16" => (Wrapper::Short, Wrapper::UnsignedShort, Primitive::Short),
        "32" => (Wrapper::Int, Wrapper::UnsignedInt, Primitive::Int),
        "64" => (Wrapper::Long, Wrapper::UnsignedLong, Primitive::Long),
        _ => {
            diagnostics.warn(name, format!("Parsed {name} as an integer."));
            (Wrapper::Int, Wrapper::UnsignedInt, Primitive::Int)
        }
    };
    let wrapper = if unsigned {
        unsigned_wrapper
    } else {
        signed_wrapper
    };
    TypeMapping::new(wrapper, primitive)
}

/// Splits `int<N>` / `uint<N>` into (unsigned, width digits).
fn integer_width(name: &str) -> Option<(bool, &str)> {
    let (unsigned, digits) = match name.strip_prefix("uint") {
        Some(rest) => (true, rest),
        None => (false, name.strip_prefix("int")?),
    };
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some((unsigned, digits))
}
