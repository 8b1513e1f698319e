use thiserror::Error;

/// Errors raised at the parsing boundary. Nothing past parsing fails; the
/// coordinator logs these and keeps the previous render.
#[derive(Debug, Error)]
pub enum Error {
    #[error("settings document must be a JSON object, got {0}")]
    Settings(&'static str),
    #[error("object `{object}` must be a JSON object")]
    SettingsObject { object: String },
    #[error("invalid colour `{0}`")]
    Color(String),
}

pub type Result<T> = std::result::Result<T, Error>;
