pub mod notifier;

pub use notifier::{Notifier, Toast, ToastEvent, ToastPhase, ToastTimings};
