pub mod session_file;

pub use session_file::{SessionStorage, HOME_DIR, SESSION_FILE};
