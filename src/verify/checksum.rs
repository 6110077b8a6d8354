use crate::error::SnapwizError;
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    #[default]
    Sha256,
    Md5,
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Md5 => write!(f, "md5"),
        }
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = SnapwizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Self::Sha256),
            "md5" => Ok(Self::Md5),
            other => Err(SnapwizError::ConfigError(format!(
                "Unknown checksum algorithm '{}'. Valid: sha256, md5",
                other
            ))),
        }
    }
}

/// Lower-case hex digest of the whole file.
pub fn file_digest(path: &Path, algorithm: ChecksumAlgorithm) -> io::Result<String> {
    match algorithm {
        ChecksumAlgorithm::Sha256 => digest_with::<Sha256>(path),
        ChecksumAlgorithm::Md5 => digest_with::<Md5>(path),
    }
}

fn digest_with<D: Digest>(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = D::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect())
}
