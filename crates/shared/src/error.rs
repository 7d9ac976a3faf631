use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {setting}: '{value}'")]
pub struct ParseSettingError {
    pub setting: &'static str,
    pub value: String,
}

impl ParseSettingError {
    pub fn new(setting: &'static str, value: impl Into<String>) -> Self {
        Self {
            setting,
            value: value.into(),
        }
    }
}
