use std::fmt;

#[derive(Debug, PartialEq)]
pub enum LnkError {
    /**Signature size or format GUID did not match. The data is not a `Shortcut` */
    NotALink,
    TruncatedInput,
    UnsupportedPath,
    IoFailure,
    StringTooLarge,
    Serialize,
}

impl std::error::Error for LnkError {}

impl fmt::Display for LnkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LnkError::NotALink => write!(f, "Not shortcut data"),
            LnkError::TruncatedInput => write!(f, "Shortcut data ended before a section was complete"),
            LnkError::UnsupportedPath => write!(f, "Target path cannot be stored in a shortcut"),
            LnkError::IoFailure => write!(f, "Could not read or write shortcut file"),
            LnkError::StringTooLarge => write!(f, "String longer than 65535 characters"),
            LnkError::Serialize => write!(f, "Could not serialize shortcut details"),
        }
    }
}
