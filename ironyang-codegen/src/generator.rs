//! Generation driver.
//!
//! Runs every module of a schema tree through the hierarchy generator and
//! the Java printers, collecting the output units, the merged diagnostics
//! and the per-module failures into a [`GenerationReport`].

use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostics;
use crate::error::CodegenError;
use crate::hierarchy::{HierarchyGenerator, ModuleContext};
use crate::ir::ClassUnit;
use crate::java::{ClassPrinter, HierarchyEntry, PackageInfoPrinter, RootPrinter};
use crate::metadata::schema_document;
use crate::naming::normalize;
use crate::output::{OutputSink, OutputUnit};
use ironyang_schema::{Keyword, NodeId, SchemaTree};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::Path;

/// A module, or a class of it, that could not be generated.
#[derive(Debug)]
pub struct GenerationFailure {
    /// Name of the module.
    pub module: String,
    /// Cause of the failure.
    pub error: CodegenError,
}

/// Result of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Generated units in generation order.
    pub units: Vec<OutputUnit>,
    /// Diagnostics of all modules, deduplicated by key.
    pub diagnostics: Diagnostics,
    /// Modules or classes that were skipped.
    pub failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    /// Returns the unit written to `path`, the last one if several were.
    #[must_use]
    pub fn unit(&self, path: impl AsRef<Path>) -> Option<&OutputUnit> {
        let path = path.as_ref();
        self.units.iter().rev().find(|u| u.path == path)
    }

    /// Returns true if nothing had to be skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Writes every unit to `sink`, in generation order.
    ///
    /// # Errors
    /// Returns the first I/O error reported by the sink.
    pub fn write_to(&self, sink: &mut dyn OutputSink) -> io::Result<()> {
        for unit in &self.units {
            sink.write(unit)?;
        }
        tracing::info!(units = self.units.len(), "wrote generated units");
        Ok(())
    }
}

/// Units produced while generating, with the paths already taken.
#[derive(Default)]
struct UnitCollector {
    units: Vec<OutputUnit>,
    paths: HashSet<String>,
}

impl UnitCollector {
    fn push(&mut self, unit: OutputUnit, diagnostics: &mut Diagnostics) {
        let path = unit.path.display().to_string();
        if !self.paths.insert(path.clone()) {
            diagnostics.warn(
                format!("duplicate:{path}"),
                format!("\"{path}\" is generated more than once, the last one is kept."),
            );
        }
        self.units.push(unit);
    }
}

/// Classes of one package and the modules they come from.
#[derive(Default)]
struct PackageContents {
    modules: BTreeSet<String>,
    roots: Vec<String>,
}

/// Java class hierarchy generator for whole schema trees.
pub struct Generator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Normalizes identifiers of `tree` and generates every module.
    #[must_use]
    pub fn generate(&self, tree: SchemaTree) -> GenerationReport {
        let tree = normalize(tree);
        self.generate_normalized(&tree)
    }

    /// Generates every module of an already normalized tree.
    ///
    /// A module that cannot be generated is recorded in
    /// [`GenerationReport::failures`] and does not affect the others.
    #[must_use]
    pub fn generate_normalized(&self, tree: &SchemaTree) -> GenerationReport {
        let mut report = GenerationReport::default();
        let mut collector = UnitCollector::default();
        let mut classes: Vec<ClassUnit> = Vec::new();
        let mut packages: BTreeMap<String, PackageContents> = BTreeMap::new();

        for &module in tree.roots() {
            let mut diagnostics = Diagnostics::new();
            let name = tree.arg(module).to_string();

            if !tree.keyword(module).is_module() {
                diagnostics.warn(
                    format!("not-a-module:{name}"),
                    format!(
                        "Ignoring schema tree rooted at \"{} {name}\" - not a module",
                        tree.keyword(module)
                    ),
                );
                report.diagnostics.merge(diagnostics);
                continue;
            }

            report_unresolved(tree, module, &mut diagnostics);

            match self.generate_module(tree, module, &mut collector, &mut diagnostics) {
                Ok((context, hierarchy_classes, failures)) => {
                    let top = packages.entry(self.config.package.clone()).or_default();
                    top.modules.insert(name.clone());
                    top.roots.push(context.root_class);
                    for class in &hierarchy_classes {
                        packages
                            .entry(class.package.clone())
                            .or_default()
                            .modules
                            .insert(name.clone());
                    }
                    classes.extend(hierarchy_classes);
                    report.failures.extend(failures.into_iter().map(|error| GenerationFailure {
                        module: name.clone(),
                        error,
                    }));
                    tracing::info!(module = %name, "generated module");
                }
                Err(error) => {
                    tracing::error!(module = %name, error = %error, "skipping module");
                    report.failures.push(GenerationFailure {
                        module: name.clone(),
                        error,
                    });
                }
            }
            report.diagnostics.merge(diagnostics);
        }

        if self.config.emit_package_info {
            for (package, contents) in &packages {
                let mut entries: Vec<HierarchyEntry> = contents
                    .roots
                    .iter()
                    .map(HierarchyEntry::leaf)
                    .collect();
                entries.extend(HierarchyEntry::from_classes(&classes, package));
                let modules: Vec<String> = contents.modules.iter().cloned().collect();
                let content = PackageInfoPrinter::new(package, &modules, &entries).generate();
                collector.push(
                    OutputUnit::new(package.replace('.', "/"), "package-info.java", content),
                    &mut report.diagnostics,
                );
            }
        }

        report.units = collector.units;
        report
    }

    /// Generates the classes, root class and schema document of one module.
    ///
    /// Returns the module context, its classes and the classes that had to
    /// be skipped.
    fn generate_module(
        &self,
        tree: &SchemaTree,
        module: NodeId,
        collector: &mut UnitCollector,
        diagnostics: &mut Diagnostics,
    ) -> Result<(ModuleContext, Vec<ClassUnit>, Vec<CodegenError>), CodegenError> {
        let context = ModuleContext::from_module(tree, module)?;
        let package = &self.config.package;
        let date = self.config.generated_on;

        let hierarchy =
            HierarchyGenerator::new(tree, &context, package).generate(module, diagnostics);
        for class in &hierarchy.classes {
            let content = ClassPrinter::new(class, date).generate();
            collector.push(
                OutputUnit::new(class.package.replace('.', "/"), &class.file_name(), content),
                diagnostics,
            );
        }

        let dir = self.config.package_dir();
        let root = RootPrinter::new(&context, package, date);
        collector.push(
            OutputUnit::new(&dir, &root.file_name(), root.generate()),
            diagnostics,
        );

        if self.config.emit_schema && *tree.keyword(module) == Keyword::Module {
            let document = schema_document(tree, module, &context.namespace);
            collector.push(
                OutputUnit::new(&dir, &root.schema_file_name(), document),
                diagnostics,
            );
        }

        Ok((context, hierarchy.classes, hierarchy.failures))
    }
}

/// Turns the unresolved references of a module into diagnostics.
fn report_unresolved(tree: &SchemaTree, module: NodeId, diagnostics: &mut Diagnostics) {
    for reference in tree.unresolved().iter().filter(|r| r.module == module) {
        let tag = reference.kind.tag();
        diagnostics.warn(
            tag,
            format!(
                "{}, generated class hierarchy might be incomplete.",
                tag.to_lowercase()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use chrono::NaiveDate;
    use ironyang_schema::{parse_yin, parse_yin_into, resolve};

    const SCENARIO: &str = r#"<module name="m" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:m"/>
  <prefix value="m"/>
  <revision date="2012-06-15"/>
  <list name="item">
    <key value="id"/>
    <leaf name="id"><type name="string"/></leaf>
    <leaf name="name"><type name="string"/></leaf>
    <leaf-list name="tag"><type name="string"/></leaf-list>
  </list>
  <container name="system">
    <leaf name="host-name"><type name="counter"/></leaf>
    <container name="clock">
      <leaf name="timezone"><type name="string"/></leaf>
    </container>
  </container>
</module>"#;

    const NO_NAMESPACE: &str = r#"<module name="bad" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <prefix value="b"/>
  <container name="c"/>
</module>"#;

    fn config() -> GeneratorConfig {
        GeneratorConfig::new("gen").generated_on(NaiveDate::from_ymd_opt(2012, 6, 15).unwrap())
    }

    fn run(xml: &str) -> GenerationReport {
        let mut tree = parse_yin(xml).expect("Failed to parse");
        resolve(&mut tree);
        Generator::new(&config()).generate(tree)
    }

    fn content<'a>(report: &'a GenerationReport, path: &str) -> &'a str {
        &report
            .unit(path)
            .unwrap_or_else(|| panic!("no unit {path}"))
            .content
    }

    #[test]
    fn test_unit_layout() {
        let report = run(SCENARIO);
        let mut paths: Vec<String> = report
            .units
            .iter()
            .map(|u| u.path.display().to_string())
            .collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                "gen/Item.java",
                "gen/M.java",
                "gen/M.schema",
                "gen/System.java",
                "gen/package-info.java",
                "gen/system/Clock.java",
                "gen/system/package-info.java",
            ]
        );
        assert!(report.is_complete());
    }

    #[test]
    fn test_scenario_list_class() {
        let report = run(SCENARIO);
        let item = content(&report, "gen/Item.java");
        assert_eq!(item.matches("    public Item(").count(), 3);
        assert_eq!(item.matches("    public void markName").count(), 4);
        assert!(!item.contains("markId"));
        assert!(item.contains("package gen;\n"));
    }

    #[test]
    fn test_scenario_leaf_list() {
        let report = run(SCENARIO);
        let item = content(&report, "gen/Item.java");
        assert_eq!(item.matches("    public ElementLeafListValueIterator tagIterator()").count(), 1);
        assert_eq!(item.matches("    public void deleteTag(").count(), 2);
        assert_eq!(item.matches("    public void markTag").count(), 8);
    }

    #[test]
    fn test_nested_package_and_package_info() {
        let report = run(SCENARIO);
        let clock = content(&report, "gen/system/Clock.java");
        assert!(clock.contains("package gen.system;\n"));

        let info = content(&report, "gen/package-info.java");
        assert!(info.contains("<li><a href=\"M.html\">M</a></li>"));
        assert!(info.contains("<li><a href=\"system/Clock.html\">Clock</a></li>"));
        assert!(info.ends_with("package gen;\n"));

        let nested = content(&report, "gen/system/package-info.java");
        assert!(nested.contains("<li><a href=\"Clock.html\">Clock</a></li>"));
        assert!(nested.ends_with("package gen.system;\n"));
    }

    #[test]
    fn test_unsupported_type_diagnostic() {
        let report = run(SCENARIO);
        assert!(report.diagnostics.contains("counter"));
        assert!(report.diagnostics.contains("TYPE_NOT_FOUND"));
        let messages: Vec<&str> = report
            .diagnostics
            .entries()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert!(messages.contains(&"type_not_found, generated class hierarchy might be incomplete."));
        assert!(messages.contains(&"No support for type \"counter\", defaulting to string."));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut tree = parse_yin(SCENARIO).expect("Failed to parse");
        resolve(&mut tree);
        let tree = normalize(tree);
        let config = config();
        let generator = Generator::new(&config);

        let first = generator.generate_normalized(&tree);
        let second = generator.generate_normalized(&tree);
        assert!(!first.units.is_empty());
        assert_eq!(first.units, second.units);
    }

    #[test]
    fn test_failed_module_is_isolated() {
        let mut tree = parse_yin(NO_NAMESPACE).expect("Failed to parse");
        parse_yin_into(&mut tree, SCENARIO).expect("Failed to parse");
        resolve(&mut tree);
        let report = Generator::new(&config()).generate(tree);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].module, "bad");
        assert!(matches!(
            report.failures[0].error,
            CodegenError::MissingNamespace { .. }
        ));
        assert!(report.unit("gen/Item.java").is_some());
        assert!(report.unit("gen/C.java").is_none());
    }

    #[test]
    fn test_optional_outputs_disabled() {
        let tree = parse_yin(SCENARIO).expect("Failed to parse");
        let config = config().emit_schema(false).emit_package_info(false);
        let report = Generator::new(&config).generate(tree);
        assert!(report.unit("gen/M.schema").is_none());
        assert!(report.unit("gen/package-info.java").is_none());
        assert!(report.unit("gen/M.java").is_some());
    }

    #[test]
    fn test_custom_package() {
        let tree = parse_yin(SCENARIO).expect("Failed to parse");
        let config = config().package("com.acme.gen");
        let report = Generator::new(&config).generate(tree);
        let clock = content(&report, "com/acme/gen/system/Clock.java");
        assert!(clock.contains("package com.acme.gen.system;\n"));
        assert!(report.unit("com/acme/gen/M.schema").is_some());
    }

    #[test]
    fn test_duplicate_paths_are_reported() {
        let mut tree = parse_yin(SCENARIO).expect("Failed to parse");
        let twin = SCENARIO.replace("name=\"m\"", "name=\"m2\"");
        parse_yin_into(&mut tree, &twin).expect("Failed to parse");
        let report = Generator::new(&config()).generate(tree);
        assert!(report.diagnostics.contains("duplicate:gen/Item.java"));
    }

    #[test]
    fn test_write_to_sink() {
        let report = run(SCENARIO);
        let mut sink = MemorySink::new();
        report.write_to(&mut sink).unwrap();
        assert_eq!(sink.len(), report.units.len());
        assert_eq!(sink.get("gen/M.java"), Some(content(&report, "gen/M.java")));
    }
}
