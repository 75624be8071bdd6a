pub mod notify;
pub mod selection;
mod submit;

pub use notify::{Notifier, NotifyError, WebhookNotifier};
pub use selection::{compute_total, parse_quantity, Selection};
pub use submit::{NotificationStatus, OrderError, OrderReceipt, OrderRecord, OrderSubmitter};
