//! Client core for a remote user-directory service: transport, local cache and
//! the rules that keep the cache consistent with server responses.

pub mod config;
pub mod error;
pub mod reconcile;
pub mod store;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use error::{DirectoryError, StoreError};
pub use store::UserStore;
pub use transport::{HttpUserDirectory, UserDirectory};
