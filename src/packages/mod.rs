//! # Package Backends
//!
//! Per-format knowledge of the OS package tooling: which binary installs a
//! file, how to remove an installed package, how to list what is installed
//! and how to read a package header.
//!
//! ## PackageBackend Trait
//!
//! Every format implements [`PackageBackend`]:
//! - `install_plan()` - Pick the install command from the tools present
//! - `uninstall_command()` - Removal by package name (deb, rpm)
//! - `list_command()` / `parse_installed()` - Installed package listing
//! - `metadata_command()` - Header inspection
//!
//! Backends only build [`CommandSpec`](crate::exec::CommandSpec) values; running them
//! is left to a [`CommandRunner`](crate::exec::CommandRunner).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snapwiz::core::types::PackageFormat;
//! use snapwiz::exec::{ToolTable, WhichProbe};
//! use snapwiz::packages::backend_for;
//! use std::path::Path;
//!
//! let backend = backend_for(PackageFormat::Deb);
//! let tools = ToolTable::resolve(&WhichProbe, backend.install_tools());
//! let plan = backend.install_plan(&tools, Path::new("/tmp/hello.deb"))?;
//! println!("{}", plan.command);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod deb;
pub mod detect;
pub mod flatpak;
pub mod installed;
pub mod metadata;
pub mod registry;
pub mod rpm;
pub mod snap;
pub mod traits;

pub use detect::detect_package_manager;
pub use installed::{filter_installed, list_installed};
pub use metadata::{PackageInfo, read_metadata};
pub use registry::{all_backends, backend_for};
pub use traits::{InstallPlan, InstalledPackage, PackageBackend};
