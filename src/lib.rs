//! daollm-config: environment-driven settings for the daollm backend
//!
//! Produces the immutable [`Settings`] record the backend reads its network
//! endpoints, storage credentials, database/cache URLs, bind address, and
//! inference parameters from. Resolution order, lowest to highest
//! precedence: compiled-in defaults, an optional `.env` file, the process
//! environment.
//!
//! Construct once at process entry and pass by reference:
//!
//! ```no_run
//! let settings = daollm_config::load()?;
//! let addr = settings.socket_addr()?;
//! # Ok::<(), daollm_config::ConfigError>(())
//! ```

pub mod cli;
pub mod env_file;
pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::{load, load_from, load_with};
pub use settings::Settings;
