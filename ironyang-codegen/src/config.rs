//! Generator configuration.

use chrono::NaiveDate;

/// Default Java package used when none is given.
pub const DEFAULT_PACKAGE: &str = "gen";

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Java package of the top-level classes. Also the output directory,
    /// with dots turned into path separators.
    pub package: String,
    /// Emit the `<Root>.schema` metadata document for each module.
    pub emit_schema: bool,
    /// Emit `package-info.java` for each generated package.
    pub emit_package_info: bool,
    /// Date stamped into every generated header.
    pub generated_on: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            emit_schema: true,
            emit_package_info: true,
            generated_on: chrono::Local::now().date_naive(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a config generating into the given package.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    /// Sets the Java package.
    #[must_use]
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Enables or disables the schema metadata document.
    #[must_use]
    pub fn emit_schema(mut self, enabled: bool) -> Self {
        self.emit_schema = enabled;
        self
    }

    /// Enables or disables `package-info.java` generation.
    #[must_use]
    pub fn emit_package_info(mut self, enabled: bool) -> Self {
        self.emit_package_info = enabled;
        self
    }

    /// Fixes the generation date.
    #[must_use]
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    /// Returns the output directory of the top-level package.
    #[must_use]
    pub fn package_dir(&self) -> String {
        self.package.replace('.', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.package, "gen");
        assert!(config.emit_schema);
        assert!(config.emit_package_info);
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2012, 6, 15).unwrap();
        let config = GeneratorConfig::new("com.example.gen")
            .emit_schema(false)
            .emit_package_info(false)
            .generated_on(date);
        assert_eq!(config.package_dir(), "com/example/gen");
        assert!(!config.emit_schema);
        assert!(!config.emit_package_info);
        assert_eq!(config.generated_on, date);
    }
}
