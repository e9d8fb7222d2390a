//! Shared display pieces. Each renders to an HTML fragment that pages embed.

mod auth_form;
mod event_list;
mod layout;
mod loading;
mod toast;

pub use auth_form::AuthForm;
pub use event_list::{EventCard, EventList};
pub use layout::LayoutView;
pub use loading::Loading;
pub use toast::{Notification, NotificationLevel, Toasts};
