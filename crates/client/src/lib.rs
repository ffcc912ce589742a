//! Browser-side behaviour of the site, without any UI toolkit:
//! - [`api::SiteClient`] talks to the JSON API.
//! - [`view::ReviewsView`] is the review list state; rendering is a pure function of it.
//! - [`forms`], [`search`], [`deeplink`] and [`notify`] cover the remaining page logic.
//! - [`pages`] folds API results into view state and user feedback.

pub mod api;
pub mod card;
pub mod deeplink;
pub mod error;
pub mod forms;
pub mod notify;
pub mod pages;
pub mod search;
pub mod view;

pub use api::SiteClient;
pub use error::ClientError;
pub use view::ReviewsView;
