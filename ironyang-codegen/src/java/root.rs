//! Rendering of the per-module root class.
//!
//! The root class carries the namespace and prefix of a module and
//! registers its schema document with the ConfM runtime.

use super::printer::JavaFile;
use crate::hierarchy::ModuleContext;
use chrono::NaiveDate;

/// Printer for the root class of a module.
pub struct RootPrinter<'a> {
    module: &'a ModuleContext,
    package: &'a str,
    date: NaiveDate,
}

impl<'a> RootPrinter<'a> {
    /// Creates a new root class printer.
    #[must_use]
    pub fn new(module: &'a ModuleContext, package: &'a str, date: NaiveDate) -> Self {
        Self {
            module,
            package,
            date,
        }
    }

    /// Returns the Java file name of the root class.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.java", self.module.root_class)
    }

    /// Returns the file name of the schema document the class loads.
    #[must_use]
    pub fn schema_file_name(&self) -> String {
        format!("{}.schema", self.module.root_class)
    }

    /// Renders the root class.
    #[must_use]
    pub fn generate(&self) -> String {
        let root = &self.module.root_class;
        let description = format!(
            "The root class for namespace {} (accessible from\n{root}.NAMESPACE) with prefix \"{}\" ({root}.PREFIX).",
            self.module.namespace, self.module.prefix
        );

        let mut body = String::new();
        body.push_str(&self.generate_fields());
        body.push_str(&self.generate_enable());
        body.push_str(&self.generate_register_schema());

        JavaFile {
            class_name: root,
            package: self.package,
            description: &description,
            provenance: &self.module.provenance,
            extends: None,
            date: self.date,
        }
        .render(&body)
    }

    fn generate_fields(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n    public static final String NAMESPACE = \"{}\";\n",
            self.module.namespace
        ));
        output.push_str(&format!(
            "\n    public static final String PREFIX = \"{}\";\n",
            self.module.prefix
        ));
        output
    }

    fn generate_enable(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    /**\n");
        output.push_str("     * Enable the elements in this namespace to be aware\n");
        output.push_str("     * of the data model and use the generated classes.\n");
        output.push_str("     */\n");
        output.push_str("    public static void enable() throws INMException {\n");
        output.push_str("        Container.setPackage(NAMESPACE, PREFIX);\n");
        output.push_str(&format!(
            "        {}.registerSchema();\n",
            self.module.root_class
        ));
        output.push_str("    }\n");
        output
    }

    fn generate_register_schema(&self) -> String {
        let schema = self.schema_file_name();
        let mut output = String::new();
        output.push_str("\n    /**\n");
        output.push_str("     * Register the schema for this namespace in the global\n");
        output.push_str("     * schema table (CsTree) making it possible to lookup\n");
        output.push_str("     * CsNode entries for all tagpaths\n");
        output.push_str("     */\n");
        output.push_str("    public static void registerSchema() throws INMException {\n");
        output.push_str("        StackTraceElement[] sTrace = (new Exception()).getStackTrace();\n");
        output.push_str("        ClassLoader loader = sTrace[0].getClass().getClassLoader();\n");
        output.push_str(&format!(
            "        java.net.URL schemaUrl = loader.getSystemResource(\"{schema}\");\n"
        ));
        output.push_str("        SchemaParser parser = new SchemaParser();\n");
        output.push_str("        Hashtable h = CsTree.create(NAMESPACE);\n");
        output.push_str("        if (schemaUrl == null)\n");
        output.push_str(&format!("            parser.readFile(\"{schema}\", h);\n"));
        output.push_str("        else\n");
        output.push_str("            parser.readFile(schemaUrl, h);\n");
        output.push_str("    }\n");
        output
    }
}
