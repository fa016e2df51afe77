use thiserror::Error;

/// Every recoverable failure the library reports. Operands are never modified when one
/// of these is returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigNumError {
    /// Construction or operator promotion from an input that has no numeric meaning
    #[error("non-numeric coercion failed ({0})")]
    TypeCoercion(String),
    /// Division, remainder or divmod with a zero divisor. Holds the operation name
    #[error("{0} by zero")]
    DivisionByZero(&'static str),
    /// More than one limb is significant where a single limb is required
    #[error("{0}: arg too long to convert")]
    ValueTooLarge(&'static str),
    /// Digit rendering was requested in a base without an alphabet
    #[error("base {0} is outside the supported range 2..=36")]
    InvalidBase(u32),
}

pub type BigNumResult<T> = Result<T, BigNumError>;
pub type BigNumTestResult = Result<(), BigNumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            BigNumError::DivisionByZero("divide").to_string(),
            "divide by zero"
        );
        assert_eq!(
            BigNumError::ValueTooLarge("to_int").to_string(),
            "to_int: arg too long to convert"
        );
        assert_eq!(
            BigNumError::TypeCoercion("list".to_string()).to_string(),
            "non-numeric coercion failed (list)"
        );
        assert_eq!(
            BigNumError::InvalidBase(37).to_string(),
            "base 37 is outside the supported range 2..=36"
        );
    }
}
