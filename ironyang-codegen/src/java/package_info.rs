//! Rendering of `package-info.java`.

use super::printer::java_docify;
use crate::ir::ClassUnit;

/// One class in the package overview, with the classes nested below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyEntry {
    /// Class name.
    pub class: String,
    /// Link to the class page, relative to the package.
    pub href: String,
    /// Classes of the sub-package belonging to this class.
    pub children: Vec<HierarchyEntry>,
}

impl HierarchyEntry {
    /// Creates an entry without nested classes.
    #[must_use]
    pub fn leaf(class: impl Into<String>) -> Self {
        let class = class.into();
        Self {
            href: format!("{class}.html"),
            class,
            children: Vec::new(),
        }
    }

    /// Builds the entries of `package` from generated classes.
    ///
    /// Classes of `<package>.<element>` are nested below the class of
    /// `element`.
    #[must_use]
    pub fn from_classes(classes: &[ClassUnit], package: &str) -> Vec<Self> {
        Self::collect(classes, package, "")
    }

    fn collect(classes: &[ClassUnit], package: &str, dir: &str) -> Vec<Self> {
        classes
            .iter()
            .filter(|c| c.package == package)
            .map(|c| {
                let sub_package = format!("{package}.{}", c.element);
                let sub_dir = format!("{dir}{}/", c.element);
                Self {
                    class: c.name.clone(),
                    href: format!("{dir}{}.html", c.name),
                    children: Self::collect(classes, &sub_package, &sub_dir),
                }
            })
            .collect()
    }
}

/// Printer for the package overview of the generated classes.
pub struct PackageInfoPrinter<'a> {
    package: &'a str,
    modules: &'a [String],
    entries: &'a [HierarchyEntry],
}

impl<'a> PackageInfoPrinter<'a> {
    /// Creates a new package-info printer.
    #[must_use]
    pub fn new(package: &'a str, modules: &'a [String], entries: &'a [HierarchyEntry]) -> Self {
        Self {
            package,
            modules,
            entries,
        }
    }

    /// Renders `package-info.java`.
    #[must_use]
    pub fn generate(&self) -> String {
        let names: Vec<String> = self.modules.iter().map(|m| format!("\"{m}\"")).collect();
        let origin = match names.len() {
            1 => format!("YANG module {}", names[0]),
            _ => format!("YANG modules {}", names.join(", ")),
        };

        let mut text = String::new();
        text.push_str(&format!(
            "This class hierarchy was generated from the {origin} by IronYANG.\n"
        ));
        text.push_str("The generated classes may be used to manipulate pieces of configuration data\n");
        text.push_str("with NETCONF operations such as edit-config, delete-config and lock. These\n");
        text.push_str("operations are typically accessed through the ConfM Java library by\n");
        text.push_str("instantiating Device objects and setting up NETCONF sessions with real devices\n");
        text.push_str("using a compatible YANG model.\n");
        text.push('\n');
        text.push_str(&html_list(self.entries, 0));
        text.push('\n');
        text.push_str("@see <a target=\"_top\" href=\"https://www.rfc-editor.org/rfc/rfc6020\">RFC 6020: YANG - A Data Modeling Language for the Network Configuration Protocol (NETCONF)</a>\n");
        text.push_str("@see <a target=\"_top\" href=\"https://www.rfc-editor.org/rfc/rfc6241\">RFC 6241: Network Configuration Protocol (NETCONF)</a>\n");
        text.push_str("@see <a target=\"_top\" href=\"https://www.rfc-editor.org/rfc/rfc6242\">RFC 6242: Using the NETCONF Protocol over Secure Shell (SSH)</a>\n");

        let mut output = String::from("/**\n");
        output.push_str(&java_docify(&text));
        output.push_str("\n */\n");
        output.push_str(&format!("package {};\n", self.package));
        output
    }
}

/// Renders entries as a nested HTML list indented by `level` steps.
fn html_list(entries: &[HierarchyEntry], level: usize) -> String {
    let pad = "    ".repeat(level);
    let mut output = format!("{pad}<ul>\n");
    for entry in entries {
        output.push_str(&format!(
            "{pad}    <li><a href=\"{}\">{}</a></li>\n",
            entry.href, entry.class
        ));
        if !entry.children.is_empty() {
            output.push_str(&html_list(&entry.children, level + 1));
        }
    }
    output.push_str(&format!("{pad}</ul>\n"));
    output
}
