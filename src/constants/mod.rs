pub mod common;
pub mod formats;

pub use common::{
    HISTORY_DATE_FORMAT, HISTORY_TIMESTAMP_FORMAT, INSTALL_TIMEOUT_SECS, PROJECT_NAME, PROJECT_ORG,
    PROJECT_QUALIFIER, QUERY_TIMEOUT_SECS, UNINSTALL_TIMEOUT_SECS,
};
pub use formats::{SIGNATURE_SUFFIXES, SUPPORTED_EXTENSIONS, is_supported_package};
