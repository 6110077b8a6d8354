use crate::core::types::PackageRef;
use crate::error::{Result, SnapwizError};
use crate::packages::read_metadata;
use crate::traits::AppContext;
use crate::ui as output;
use crate::verify::{ChecksumAlgorithm, file_digest, find_signature_file};
use std::path::PathBuf;

pub struct InfoOptions {
    pub file: PathBuf,
}

pub fn run(ctx: &AppContext, options: InfoOptions) -> Result<()> {
    let package = PackageRef::new(&options.file)?;
    if !package.path().is_file() {
        return Err(SnapwizError::InvalidPackage {
            path: package.path().to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }

    output::header(package.name());
    let info = read_metadata(ctx.runner.as_ref(), &package);
    print!("{}", info);

    println!();
    output::keyval("Path", &package.path().display().to_string());
    match file_digest(package.path(), ChecksumAlgorithm::Sha256) {
        Ok(digest) => output::keyval("SHA-256", &digest),
        Err(e) => output::warning(&format!("Could not hash file: {}", e)),
    }
    let signature = find_signature_file(package.path())
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "none".to_string());
    output::keyval("Signature", &signature);

    Ok(())
}
