//! Bookmarks API
//!
//! CRUD endpoints over the shared [`BookmarkStore`](crate::store::BookmarkStore).
//! Every response is wrapped in an [`APIResponse`](crate::api::APIResponse) envelope.
//!
//! # Usage
//!
//! ```rust,ignore
//! use web_collector::bookmarks;
//!
//! let app = Router::new()
//!     .nest("/api/v1/bookmarks", bookmarks::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;

pub use routes::routes;
