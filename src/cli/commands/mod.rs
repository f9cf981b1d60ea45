mod download;
mod history;
mod init;
mod search;

pub use download::cmd_download;
pub use history::cmd_history;
pub use init::cmd_init;
pub use search::{cmd_search_photos, format_photo};
