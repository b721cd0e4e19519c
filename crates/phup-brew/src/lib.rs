mod client;
mod detection;
mod parse;
mod runtime;

pub use client::BrewClient;
pub use detection::{BrewDetection, detect_brew};
pub use parse::{parse_formula_identifiers, parse_version_banner};
pub use runtime::active_version;
