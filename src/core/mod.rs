pub mod queue;
pub mod types;

pub use queue::{EntryStatus, InstallQueue};
pub use types::{InstallResult, PackageFormat, PackageRef, VerificationCheck};
