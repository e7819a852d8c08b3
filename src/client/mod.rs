//! Client side of the entry store
//!
//! [`ClientView`] is the form's view model: it validates input, submits it
//! through an [`EntryApi`], and derives the background, notification and
//! history panel from the results. [`HttpEntryClient`] is the reqwest-backed
//! [`EntryApi`] used against a running server.

pub mod error;
pub mod http;
pub mod notice;
pub mod render;
pub mod view;

pub use error::ClientError;
pub use http::HttpEntryClient;
pub use notice::TimedSlot;
pub use view::{
    parse_weight, Backdrop, ClientView, NoticeDelays, Notification, OverlayTarget,
    SubmitOutcome, Toast, ToastKind, ViewState,
};

use async_trait::async_trait;

use crate::api::dto::{AppendEntryRequest, AppendEntryResponse};
use crate::storage::WeightEntry;

/// Remote entry store operations
#[async_trait]
pub trait EntryApi: Send + Sync {
    /// All entries in creation order
    async fn list_entries(&self) -> Result<Vec<WeightEntry>, ClientError>;

    /// Store one entry and get it back with its comparison
    async fn append_entry(
        &self,
        request: AppendEntryRequest,
    ) -> Result<AppendEntryResponse, ClientError>;
}
