//! HTTP request handlers.
//!
//! One module per route action. Handlers compile the request parameters
//! first (fail-fast, before any storage call), then run the fetch / project /
//! link pipeline and assemble the envelope.

pub mod list;
pub mod menu;
pub mod root;
pub mod search;
pub mod single;
pub mod taxonomy;

pub use list::list_handler;
pub use menu::menu_handler;
pub use root::root_handler;
pub use search::{search_all_handler, search_handler};
pub use single::{related_handler, single_handler};
pub use taxonomy::taxonomy_handler;
