use super::Route;
use crate::components::{AuthForm, LayoutView, Notification};
use crate::error::{AppResult, Error};
use crate::session::SessionContext;
use askama::Template;
use tokio::sync::RwLock;
use tracing::{error, info};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Which form the page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

impl AuthMode {
    fn route(self) -> Route {
        match self {
            AuthMode::Signup => Route::Signup,
            AuthMode::Login => Route::Login,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            AuthMode::Signup => "Signup failed. Please try again.",
            AuthMode::Login => "Login failed. Please check your credentials.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub loading: bool,
    /// Inline form error
    pub error: Option<String>,
    /// Last email submitted, kept in the form after a failure
    pub email: String,
    pub notifications: Vec<Notification>,
}

#[derive(Template)]
#[template(path = "auth.html")]
struct AuthTemplate {
    layout: LayoutView,
    heading: &'static str,
    form_html: String,
    switch_prompt: &'static str,
    switch_href: String,
    switch_label: &'static str,
}

/// Signup or login form
pub struct AuthPage {
    mode: AuthMode,
    session: SessionContext,
    state: RwLock<AuthState>,
}

impl AuthPage {
    pub fn signup(session: SessionContext) -> Self {
        Self::new(AuthMode::Signup, session)
    }

    pub fn login(session: SessionContext) -> Self {
        Self::new(AuthMode::Login, session)
    }

    fn new(mode: AuthMode, session: SessionContext) -> Self {
        Self {
            mode,
            session,
            state: RwLock::new(AuthState::default()),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.state.write().await.notifications)
    }

    /// Submit the form. Returns where to navigate on success.
    ///
    /// Failures are returned to the caller and also surfaced on the page.
    /// `loading` is cleared on every path.
    pub async fn submit(&self, email: &str, password: &str) -> AppResult<Route> {
        let email = email.trim();
        {
            let mut state = self.state.write().await;
            state.email = email.to_string();
            if let Err(message) = validate(email, password) {
                state.error = Some(message.to_string());
                return Err(Error::Validation(message.to_string()));
            }
            state.error = None;
            state.loading = true;
        }

        let result = match self.mode {
            AuthMode::Signup => self.session.signup(email, password).await,
            AuthMode::Login => self.session.login(email, password).await,
        };

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(user) => {
                info!("{} authenticated via {:?}", user.email, self.mode);
                Ok(Route::Dashboard)
            }
            Err(e) => {
                error!("{:?} failed for {}: {}", self.mode, email, e);
                state
                    .notifications
                    .push(Notification::error(failure_message(self.mode, &e)));
                Err(e)
            }
        }
    }

    /// Render the page, consuming any pending toasts
    pub async fn render(&self, carried: &[Notification]) -> AppResult<String> {
        let mut notifications = carried.to_vec();
        notifications.extend(self.take_notifications().await);
        let state = self.state().await;

        let form_html = AuthForm::new(self.mode.route().path(), self.mode == AuthMode::Login)
            .loading(state.loading)
            .email(&state.email)
            .error(state.error.as_deref())
            .html()?;

        let page = match self.mode {
            AuthMode::Signup => AuthTemplate {
                layout: LayoutView::new(&self.session, "Sign up", &notifications).await?,
                heading: "Create an Account",
                form_html,
                switch_prompt: "Already have an account?",
                switch_href: Route::Login.path(),
                switch_label: "Log in here",
            },
            AuthMode::Login => AuthTemplate {
                layout: LayoutView::new(&self.session, "Log in", &notifications).await?,
                heading: "Log In",
                form_html,
                switch_prompt: "Don't have an account?",
                switch_href: Route::Signup.path(),
                switch_label: "Sign up here",
            },
        };

        Ok(page.render()?)
    }
}

/// Log out and go back to the event list
pub async fn logout(session: &SessionContext) -> Route {
    session.logout().await;
    Route::Home
}

fn validate(email: &str, password: &str) -> Result<(), &'static str> {
    if email.is_empty() || !email.contains('@') {
        return Err("Please enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 6 characters.");
    }
    Ok(())
}

/// Prefer what the backend said; transport failures get a generic line
fn failure_message(mode: AuthMode, err: &Error) -> String {
    match err {
        Error::Server { message, .. } if !message.is_empty() => message.clone(),
        _ => mode.failure_message().to_string(),
    }
}
