pub mod logging;
pub mod setup;
