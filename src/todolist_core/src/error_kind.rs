/// Coarse classification of a failure, for the transport layer to map onto
/// its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client-correctable input.
    Validation,
    NotFound,
    /// Uniqueness violation.
    Conflict,
    /// Rejected credentials or token.
    Unauthorized,
    /// The operation exists in the contract but has no implementation yet.
    Unimplemented,
    Internal,
}
