use super::*;

#[test]
fn test_valid_package_names() {
    assert!(validate_package_name("firefox").is_ok());
    assert!(validate_package_name("libc6").is_ok());
    assert!(validate_package_name("python3.12").is_ok());
    assert!(validate_package_name("g++").is_ok());
    assert!(validate_package_name("libssl3:amd64").is_ok());
    assert!(validate_package_name("nginx-1.24.0-1.fc40.x86_64").is_ok());
    assert!(validate_package_name("vim-tiny").is_ok());
}

#[test]
fn test_shell_injection_blocked() {
    // Semicolon injection
    assert!(validate_package_name("foo; rm -rf /").is_err());
    // Pipe injection
    assert!(validate_package_name("foo | cat").is_err());
    // Command substitution
    assert!(validate_package_name("foo$(cat)").is_err());
    // Ampersand chaining
    assert!(validate_package_name("foo && echo").is_err());
}

#[test]
fn test_options_and_paths_blocked() {
    assert!(validate_package_name("-y").is_err());
    assert!(validate_package_name("--purge").is_err());
    assert!(validate_package_name("../../../etc/passwd").is_err());
    assert!(validate_package_name("foo..bar").is_err());
}

#[test]
fn test_empty_and_long_names() {
    assert!(validate_package_name("").is_err());
    let long_name = "a".repeat(300);
    assert!(validate_package_name(&long_name).is_err());
}
