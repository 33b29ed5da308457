use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditableError {
    #[error("Unknown attribute `{attribute}` on {model}")]
    UnknownAttribute { model: String, attribute: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] editable_markup::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EditableError>;
