//! # ironyang CLI entry point
//!
//! Reads YIN modules, generates their Java class hierarchy and writes it
//! below the output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ironyang_codegen::{FsSink, Generator, GeneratorConfig};
use ironyang_schema::{SchemaTree, parse_yin_into, resolve, validate_schema};

/// Generates a Java class hierarchy for the ConfM library from YANG modules
/// given in YIN format.
#[derive(Parser, Debug)]
#[command(name = "ironyang", version, about, long_about = None)]
struct Cli {
    /// YIN files to compile.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Java package of the generated classes.
    #[arg(short = 'd', long = "java-package", default_value = "gen")]
    java_package: String,

    /// Do not generate the `.schema` metadata document.
    #[arg(long)]
    no_schema: bool,

    /// Do not generate `package-info.java` files.
    #[arg(long)]
    no_package_info: bool,

    /// Generation date written into file headers (YYYY-MM-DD), today if absent.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Enable debug output.
    #[arg(short, long)]
    verbose: bool,

    /// Directory the package directories are created in.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::new(&self.java_package)
            .emit_schema(!self.no_schema)
            .emit_package_info(!self.no_package_info);
        match self.date {
            Some(date) => config.generated_on(date),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut tree = SchemaTree::new();
    for file in &cli.files {
        let xml = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        parse_yin_into(&mut tree, &xml)
            .with_context(|| format!("failed to parse {}", file.display()))?;
        tracing::debug!(file = %file.display(), "parsed module");
    }

    resolve(&mut tree);
    if let Err(e) = validate_schema(&tree) {
        tracing::warn!("{e}");
    }

    let config = cli.config();
    let report = Generator::new(&config).generate(tree);

    for diagnostic in report.diagnostics.entries() {
        eprintln!("{diagnostic}");
    }
    for failure in &report.failures {
        eprintln!("ERROR: {}: {}", failure.module, failure.error);
    }

    let mut sink = FsSink::new(&cli.output);
    report
        .write_to(&mut sink)
        .with_context(|| format!("failed to write to {}", cli.output.display()))?;

    if report.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_cli_flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "ironyang",
            "-d",
            "com.acme",
            "--no-schema",
            "--date",
            "2012-06-15",
            "a.yin",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.package, "com.acme");
        assert!(!config.emit_schema);
        assert!(config.emit_package_info);
        assert_eq!(config.generated_on, NaiveDate::from_ymd_opt(2012, 6, 15).unwrap());
        assert_eq!(cli.files, vec![PathBuf::from("a.yin")]);
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(Cli::try_parse_from(["ironyang", "--date", "15/06/2012", "a.yin"]).is_err());
        assert!(parse_date("2012-06-15").is_ok());
    }

    #[test]
    fn test_run_writes_units() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("m.yin");
        std::fs::write(
            &input,
            r#"<module name="m" xmlns="urn:ietf:params:xml:ns:yang:yin:1">
  <namespace uri="urn:m"/>
  <prefix value="m"/>
  <container name="system">
    <leaf name="host-name"><type name="string"/></leaf>
  </container>
</module>"#,
        )
        .unwrap();
        let out = dir.path().join("out");
        let cli = Cli::try_parse_from([
            OsString::from("ironyang"),
            OsString::from("--output"),
            out.clone().into_os_string(),
            input.into_os_string(),
        ])
        .unwrap();

        let code = run(&cli).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let system = std::fs::read_to_string(out.join("gen/System.java")).unwrap();
        assert!(system.contains("public class System extends Container {"));
        assert!(out.join("gen/M.java").is_file());
        assert!(out.join("gen/M.schema").is_file());
    }
}
