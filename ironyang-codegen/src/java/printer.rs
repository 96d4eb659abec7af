//! Shared pieces of every generated Java file.

use chrono::{Datelike, NaiveDate};

/// Version stamped into headers and class docs.
pub const VERSION: &str = "1.0";

/// Imports of every generated class.
pub const IMPORTS: &[&str] = &["com.tailf.confm.*", "com.tailf.inm.*", "java.util.Hashtable"];

/// Column limit used when wrapping parameter lists.
pub const MAX_COLUMNS: usize = 80;

/// Formats a date as `d/m/yy`, the header format.
#[must_use]
pub fn header_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year() % 100)
}

/// Formats a date as `yyyy-m-d`, the class doc format.
#[must_use]
pub fn doc_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Prefixes every line of `text` with ` * `.
#[must_use]
pub fn java_docify(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                " *".to_string()
            } else {
                format!(" * {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Joins `items` with `, `, breaking onto a new line indented by `indent`
/// spaces whenever an item would exceed the remaining `budget` columns.
#[must_use]
pub fn wrap_items(mut budget: usize, indent: usize, items: &[String]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let mut piece = item.clone();
        if i + 1 < items.len() {
            piece.push_str(", ");
        }
        let width = item.len() + 2;
        if width > budget {
            out.truncate(out.trim_end().len());
            out.push('\n');
            out.push_str(&" ".repeat(indent));
            budget = MAX_COLUMNS.saturating_sub(indent + width);
        } else {
            budget -= width;
        }
        out.push_str(&piece);
    }
    out
}

/// A complete Java compilation unit.
pub struct JavaFile<'a> {
    /// Class name, also the file stem.
    pub class_name: &'a str,
    /// Java package.
    pub package: &'a str,
    /// Class description, one javadoc line per text line.
    pub description: &'a str,
    /// Provenance line.
    pub provenance: &'a str,
    /// `extends` clause, if any.
    pub extends: Option<&'a str>,
    /// Generation date.
    pub date: NaiveDate,
}

impl JavaFile<'_> {
    /// Renders the file around `body`.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        let mut output = String::new();

        output.push_str("/*\n");
        output.push_str(&format!(
            " * @(#){}.java        {VERSION} {}\n",
            self.class_name,
            header_date(self.date)
        ));
        output.push_str(" *\n");
        output.push_str(" * This file has been auto-generated by IronYANG, the Java class\n");
        output.push_str(&format!(
            " * hierarchy generator for YANG. Origin: {}\n",
            self.provenance
        ));
        output.push_str(" */\n\n");

        output.push_str(&format!("package {};\n\n", self.package));
        for import in IMPORTS {
            output.push_str(&format!("import {import};\n"));
        }
        output.push('\n');

        output.push_str("/**\n");
        output.push_str(&java_docify(self.description));
        output.push_str("\n *\n");
        output.push_str(&format!(" * @version    {VERSION} {}\n", doc_date(self.date)));
        output.push_str(" * @author    Auto Generated\n");
        output.push_str(" */\n");

        match self.extends {
            Some(base) => output.push_str(&format!(
                "public class {} extends {base} {{\n",
                self.class_name
            )),
            None => output.push_str(&format!("public class {} {{\n", self.class_name)),
        }
        output.push_str(body);
        output.push_str("}\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2012, 6, 5).unwrap()
    }

    #[test]
    fn test_dates() {
        assert_eq!(header_date(date()), "5/6/12");
        assert_eq!(doc_date(date()), "2012-6-5");
        let early = NaiveDate::from_ymd_opt(2005, 1, 9).unwrap();
        assert_eq!(header_date(early), "9/1/5");
    }

    #[test]
    fn test_java_docify() {
        assert_eq!(java_docify("a\nb"), " * a\n * b");
        assert_eq!(java_docify("a\n\nb"), " * a\n *\n * b");
    }

    #[test]
    fn test_wrap_items_fits() {
        let items = vec!["String a".to_string(), "String b".to_string()];
        assert_eq!(wrap_items(60, 8, &items), "String a, String b");
    }

    #[test]
    fn test_wrap_items_breaks_long_lists() {
        let items: Vec<String> = (0..4)
            .map(|i| format!("com.tailf.confm.xs.UnsignedLong key{i}Value"))
            .collect();
        let wrapped = wrap_items(60, 8, &items);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("        com.tailf"));
        assert!(lines.iter().all(|l| l.len() + 4 <= MAX_COLUMNS));
        assert!(!wrapped.ends_with(", "));
        assert!(wrapped.lines().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn test_render_file() {
        let file = JavaFile {
            class_name: "Item",
            package: "gen",
            description: "This class represents a \"item\" element\nfrom the namespace urn:m",
            provenance: "module \"m\", revision: \"unknown\".",
            extends: Some("Container"),
            date: date(),
        };
        let text = file.render("");
        assert!(text.starts_with("/*\n * @(#)Item.java        1.0 5/6/12\n"));
        assert!(text.contains("Origin: module \"m\", revision: \"unknown\".\n"));
        assert!(text.contains("\npackage gen;\n\nimport com.tailf.confm.*;\n"));
        assert!(text.contains(" * from the namespace urn:m\n *\n * @version    1.0 2012-6-5\n"));
        assert!(text.ends_with("public class Item extends Container {\n}\n"));
    }
}
