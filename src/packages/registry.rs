//! Format to backend lookup.
//!
//! Backends are stateless, so they are handed out as static references.

use crate::core::types::PackageFormat;
use crate::packages::deb::DebBackend;
use crate::packages::flatpak::FlatpakBackend;
use crate::packages::rpm::RpmBackend;
use crate::packages::snap::SnapBackend;
use crate::packages::traits::PackageBackend;

static DEB: DebBackend = DebBackend;
static RPM: RpmBackend = RpmBackend;
static SNAP: SnapBackend = SnapBackend;
static FLATPAK: FlatpakBackend = FlatpakBackend;

pub fn backend_for(format: PackageFormat) -> &'static dyn PackageBackend {
    match format {
        PackageFormat::Deb => &DEB,
        PackageFormat::Rpm => &RPM,
        PackageFormat::Snap => &SNAP,
        PackageFormat::Flatpak => &FLATPAK,
    }
}

pub fn all_backends() -> impl Iterator<Item = &'static dyn PackageBackend> {
    PackageFormat::ALL.into_iter().map(backend_for)
}
