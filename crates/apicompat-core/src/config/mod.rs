//! Configuration for apicompat runs
//!
//! A config file carries a `diffing` section (what to compare and what to
//! suppress) and an `inputs` section (where the two sides come from). Files
//! are discovered by walking up from the working directory; see
//! [`ConfigLoader::auto_discover`]. Command-line flags override file values.
//!
//! ```json
//! {
//!   "diffing": {
//!     "strictMode": false,
//!     "noWarn": "CP0003",
//!     "ignoredDifferences": [
//!       { "diagnosticId": "CP0002", "memberId": "M:Contoso.Client.Legacy" }
//!     ]
//!   },
//!   "inputs": {
//!     "left": ["contract"],
//!     "right": ["implementation"]
//!   }
//! }
//! ```

mod apicompat_config;
mod loader;

pub use apicompat_config::{
    ApiCompatConfig, DiffingSettings, IgnoredDifference, InputsConfiguration,
};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
