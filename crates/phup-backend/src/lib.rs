mod error;
mod traits;
mod types;

pub use error::BackendError;
pub use traits::{ManagerInfo, PackageManager, PackageManagerClone};
pub use types::{
    FORMULA_PREFIX, InstalledPackages, Package, TokenParseError, VersionToken, normalize_identifier,
};
