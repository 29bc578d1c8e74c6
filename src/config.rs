//! Support for library configuration options

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

/// The application name, used to build the default on-disk storage location
/// (e.g. `~/.config/corkboard/` on Linux).
/// Feel free to override it when initing this library.
pub static APP_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("corkboard".to_string())));

/// The current application name
pub fn app_name() -> String {
    APP_NAME.lock().unwrap().clone()
}
