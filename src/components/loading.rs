use crate::error::AppResult;
use askama::Template;

/// Spinner shown while a page is fetching
#[derive(Template, Default)]
#[template(path = "components/loading.html")]
pub struct Loading;

impl Loading {
    pub fn html() -> AppResult<String> {
        Ok(Loading.render()?)
    }
}
