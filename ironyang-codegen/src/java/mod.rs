//! Java source rendering.

pub mod class;
pub mod package_info;
pub mod printer;
pub mod root;

pub use class::ClassPrinter;
pub use package_info::{HierarchyEntry, PackageInfoPrinter};
pub use root::RootPrinter;
