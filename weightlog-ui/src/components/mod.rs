//! UI Components

pub mod history;
pub mod toast;
pub mod weight_form;

pub use history::{HistoryButton, HistoryPanel};
pub use toast::Toast;
pub use weight_form::WeightForm;
