use thiserror::Error;

/// Errors produced by type operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid identifier character {found:?} at index {index}")]
    InvalidCharacter { found: char, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_cloneable() {
        let err = TypeError::InvalidCharacter { found: '/', index: 2 };
        let copy = err.clone();
        assert_eq!(copy, err);
        assert_eq!(copy.to_string(), "invalid identifier character '/' at index 2");
    }
}
