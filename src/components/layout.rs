use super::{Notification, Toasts};
use crate::error::AppResult;
use crate::session::SessionContext;

/// Data the page shell needs: title, nav state and pending toasts.
///
/// Page templates extend `layout.html` and carry one of these as `layout`.
#[derive(Debug, Clone, Default)]
pub struct LayoutView {
    pub title: String,
    pub authenticated: bool,
    pub user_name: String,
    pub toasts_html: String,
}

impl LayoutView {
    pub async fn new(
        session: &SessionContext,
        title: &str,
        notifications: &[Notification],
    ) -> AppResult<Self> {
        let user = session.current_user().await;

        Ok(Self {
            title: title.to_string(),
            authenticated: user.is_some(),
            user_name: user.map(|u| u.name).unwrap_or_default(),
            toasts_html: Toasts::render_all(notifications)?,
        })
    }
}
