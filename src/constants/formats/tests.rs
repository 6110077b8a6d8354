use super::*;

#[test]
fn supported_extensions_are_recognized() {
    for name in ["test.deb", "test.rpm", "test.snap", "test.flatpak"] {
        assert!(is_supported_package(name), "{name} should be supported");
    }
}

#[test]
fn unsupported_extensions_are_rejected() {
    for name in ["test.txt", "test.exe", "test.tar.gz", "deb", "noext", ""] {
        assert!(!is_supported_package(name), "{name} should be rejected");
    }
}

#[test]
fn extension_check_ignores_case() {
    assert!(is_supported_package("test.DEB"));
    assert!(is_supported_package("/opt/pkgs/App.FlatPak"));
    assert!(is_supported_package("Tool.Rpm"));
}
