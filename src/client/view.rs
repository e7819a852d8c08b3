//! Weight form view model
//!
//! Holds everything the form renders: input text, cached entries, history
//! visibility, background, the comparison notification, a status toast and
//! the in-flight flag. Transitions run on the caller's tokio runtime; timed
//! notices are cleared by spawned timers guarded by [`TimedSlot`]
//! generations.

use chrono::Local;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::api::dto::AppendEntryRequest;
use crate::client::error::ClientError;
use crate::client::notice::TimedSlot;
use crate::client::render;
use crate::client::EntryApi;
use crate::config::ClientConfig;
use crate::storage::{is_valid_weight, Comparison, WeightEntry};

pub const INVALID_WEIGHT_MESSAGE: &str = "Enter a valid weight";
pub const SAVED_MESSAGE: &str = "Weight saved";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save weight";

/// Background of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backdrop {
    #[default]
    Calm,
    Warning,
}

impl Backdrop {
    /// Gradient classes used by the web UI
    pub fn gradient(&self) -> &'static str {
        match self {
            Backdrop::Calm => "from-sky-400 to-sky-300",
            Backdrop::Warning => "from-red-500 to-red-400",
        }
    }
}

/// Reaction to a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Weight went up
    Gained,
    /// Weight went down
    Lost,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::Gained => "ugly",
            Notification::Lost => "you're a butterfly",
        }
    }
}

/// Background and notification for a comparison; `None` leaves both alone
pub fn reaction(comparison: Option<Comparison>) -> Option<(Backdrop, Notification)> {
    match comparison? {
        Comparison::Increased => Some((Backdrop::Warning, Notification::Gained)),
        Comparison::Decreased => Some((Backdrop::Calm, Notification::Lost)),
        Comparison::Same => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Short status message (saved, failed, invalid input)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Where a click on the open history overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    /// Dimmed area around the panel
    Backdrop,
    /// The panel itself
    Panel,
    /// The panel's close control
    CloseButton,
}

/// How long timed notices stay visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeDelays {
    pub notification: Duration,
    pub success_toast: Duration,
    pub error_toast: Duration,
}

impl Default for NoticeDelays {
    fn default() -> Self {
        Self {
            notification: Duration::from_secs(3),
            success_toast: Duration::from_secs(3),
            error_toast: Duration::from_secs(5),
        }
    }
}

impl NoticeDelays {
    /// Notification delay from config, toast delays at their defaults
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            notification: Duration::from_millis(config.notice_delay_ms),
            ..Self::default()
        }
    }
}

/// Renderable state of the form
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub input: String,
    pub entries: Vec<WeightEntry>,
    pub history_visible: bool,
    pub backdrop: Backdrop,
    pub in_flight: bool,
    notification: TimedSlot<Notification>,
    toast: TimedSlot<Toast>,
}

impl ViewState {
    pub fn notification(&self) -> Option<Notification> {
        self.notification.get().copied()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.get()
    }

    /// Lines of the history panel
    pub fn history_lines(&self) -> Vec<String> {
        render::history_lines(&self.entries)
    }
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another submit is still running; nothing was sent
    Busy,
    /// Input rejected before any request
    Invalid(ClientError),
    /// Entry stored
    Saved {
        entry: WeightEntry,
        comparison: Option<Comparison>,
    },
    /// Store unreachable or rejected the entry
    Failed(ClientError),
}

/// Parse form input into a storable weight
pub fn parse_weight(input: &str) -> Result<f64, ClientError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(weight) if is_valid_weight(weight) => Ok(weight),
        _ => Err(ClientError::InvalidWeight(trimmed.to_string())),
    }
}

/// View model of the weight form
pub struct ClientView<A> {
    api: Arc<A>,
    state: Arc<Mutex<ViewState>>,
    delays: NoticeDelays,
}

impl<A> Clone for ClientView<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
            delays: self.delays,
        }
    }
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: EntryApi + 'static> ClientView<A> {
    pub fn new(api: A) -> Self {
        Self::with_delays(api, NoticeDelays::default())
    }

    pub fn with_delays(api: A, delays: NoticeDelays) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(ViewState::default())),
            delays,
        }
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> ViewState {
        lock(&self.state).clone()
    }

    fn update<T>(&self, f: impl FnOnce(&mut ViewState) -> T) -> T {
        f(&mut lock(&self.state))
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|s| s.input = text);
    }

    /// Initial fetch of the entry list; failures are only logged
    pub async fn load(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Failed to fetch entries");
        }
    }

    /// Replace the cached list with the store's full list
    pub async fn refresh(&self) -> Result<usize, ClientError> {
        let entries = self.api.list_entries().await?;
        let count = entries.len();
        self.update(|s| s.entries = entries);
        Ok(count)
    }

    /// Validate the input, store it with today's date and react to the comparison
    pub async fn submit(&self) -> SubmitOutcome {
        let parsed = self.update(|s| {
            if s.in_flight {
                return None;
            }
            let parsed = parse_weight(&s.input);
            if parsed.is_ok() {
                s.in_flight = true;
            }
            Some(parsed)
        });

        let weight_kg = match parsed {
            None => return SubmitOutcome::Busy,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Rejected weight input");
                self.show_toast(ToastKind::Error, INVALID_WEIGHT_MESSAGE);
                return SubmitOutcome::Invalid(e);
            }
            Some(Ok(weight_kg)) => weight_kg,
        };

        let request = AppendEntryRequest {
            weight_kg,
            entry_date: Some(Local::now().date_naive()),
        };

        let outcome = match self.api.append_entry(request).await {
            Ok(response) => {
                if let Some((backdrop, notification)) = reaction(response.comparison) {
                    self.update(|s| s.backdrop = backdrop);
                    self.show_notification(notification);
                }

                if let Err(e) = self.refresh().await {
                    tracing::warn!(error = %e, "Failed to refresh entries after save");
                }

                self.update(|s| s.input.clear());
                self.show_toast(ToastKind::Success, SAVED_MESSAGE);

                SubmitOutcome::Saved {
                    entry: response.entry,
                    comparison: response.comparison,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, weight_kg, "Failed to save weight");
                self.show_toast(ToastKind::Error, SAVE_FAILED_MESSAGE);
                SubmitOutcome::Failed(e)
            }
        };

        self.update(|s| s.in_flight = false);
        outcome
    }

    /// Flip history visibility, returning the new value
    pub fn toggle_history(&self) -> bool {
        self.update(|s| {
            s.history_visible = !s.history_visible;
            s.history_visible
        })
    }

    pub fn close_history(&self) {
        self.update(|s| s.history_visible = false);
    }

    /// Clicks inside the panel keep it open; anything else closes it
    pub fn overlay_click(&self, target: OverlayTarget) {
        match target {
            OverlayTarget::Panel => {}
            OverlayTarget::Backdrop | OverlayTarget::CloseButton => self.close_history(),
        }
    }

    fn show_notification(&self, notification: Notification) {
        let generation = self.update(|s| s.notification.set(notification));
        self.expire_after(self.delays.notification, move |s| {
            s.notification.expire(generation);
        });
    }

    fn show_toast(&self, kind: ToastKind, message: &str) {
        let toast = Toast {
            kind,
            message: message.to_string(),
        };
        let generation = self.update(|s| s.toast.set(toast));
        let delay = match kind {
            ToastKind::Success => self.delays.success_toast,
            ToastKind::Error => self.delays.error_toast,
        };
        self.expire_after(delay, move |s| {
            s.toast.expire(generation);
        });
    }

    fn expire_after(&self, delay: Duration, clear: impl FnOnce(&mut ViewState) + Send + 'static) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            clear(&mut lock(&state));
        });
    }
}
