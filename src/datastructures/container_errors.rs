use std::fmt;

/// Errors raised by the hand-made containers
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerError {
    /// lookup or removal of a key the dictionary does not hold
    NoSuchKey,
    /// removal requested on an empty sequence
    EmptyContainer,
    /// index outside `[0, size)` (or `[0, size]` for insertion)
    IndexOutOfRange { index: usize, size: usize },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContainerError::NoSuchKey => write!(f, "Specified key not in the dictionary"),
            ContainerError::EmptyContainer => write!(f, "Container is empty: no items to remove"),
            ContainerError::IndexOutOfRange { index, size } => write!(
                f,
                "Index {} out of boundary: the sequence holds {} element(s)",
                index, size
            ),
        }
    }
}

impl std::error::Error for ContainerError {}
