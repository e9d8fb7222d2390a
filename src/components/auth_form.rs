use crate::error::AppResult;
use askama::Template;

/// Email and password form used by the signup and login pages
#[derive(Template)]
#[template(path = "components/auth_form.html")]
pub struct AuthForm {
    action: String,
    submit_label: &'static str,
    loading: bool,
    email: String,
    error: String,
}

impl AuthForm {
    pub fn new(action: impl Into<String>, is_login: bool) -> Self {
        Self {
            action: action.into(),
            submit_label: if is_login { "Log In" } else { "Sign Up" },
            loading: false,
            email: String::new(),
            error: String::new(),
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Keep what the user typed after a failed attempt
    pub fn email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn error(mut self, error: Option<&str>) -> Self {
        self.error = error.unwrap_or_default().to_string();
        self
    }

    pub fn html(&self) -> AppResult<String> {
        Ok(self.render()?)
    }
}
