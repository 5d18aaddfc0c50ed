// Collection Accounting Engine - Error Codes
// This module defines all error codes for engine operations.
//
// Error Code Ranges:
// - 0: Success
// - 1-99: Token ID codec errors
// - 100-199: Supply and lineage errors
// - 200-299: Permission errors
// - 300-399: Input validation errors
// - 900-999: System errors

use thiserror::Error;

/// Engine operation result type
pub type AssetResult<T> = Result<T, AssetError>;

/// Engine error type with numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[repr(u64)]
pub enum AssetError {
    // ========================================
    // Token ID codec errors (1-99)
    // ========================================
    #[error("Field out of range for token ID encoding")]
    InvalidFields = 1,

    #[error("Malformed token ID")]
    Malformed = 2,

    // ========================================
    // Supply and lineage errors (100-199)
    // ========================================
    #[error("Insufficient supply")]
    InsufficientSupply = 100,

    #[error("Token is already unique")]
    AlreadyUnique = 101,

    #[error("Lineage not found")]
    NotFound = 102,

    #[error("Pack already minted")]
    AlreadyMinted = 103,

    // ========================================
    // Permission errors (200-299)
    // ========================================
    #[error("Unauthorized")]
    Unauthorized = 200,

    // ========================================
    // Input validation errors (300-399)
    // ========================================
    #[error("Invalid destination address")]
    InvalidDestination = 300,

    #[error("Invalid amount")]
    InvalidAmount = 301,

    #[error("Batch is empty")]
    BatchEmpty = 302,

    #[error("Batch size exceeded")]
    BatchSizeExceeded = 303,

    // ========================================
    // System errors (900-999)
    // ========================================
    #[error("Arithmetic overflow")]
    Overflow = 900,
}

impl AssetError {
    /// Get the numeric error code
    #[inline]
    pub fn code(&self) -> u64 {
        *self as u64
    }

    /// Create error from numeric code
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::InvalidFields),
            2 => Some(Self::Malformed),
            100 => Some(Self::InsufficientSupply),
            101 => Some(Self::AlreadyUnique),
            102 => Some(Self::NotFound),
            103 => Some(Self::AlreadyMinted),
            200 => Some(Self::Unauthorized),
            300 => Some(Self::InvalidDestination),
            301 => Some(Self::InvalidAmount),
            302 => Some(Self::BatchEmpty),
            303 => Some(Self::BatchSizeExceeded),
            900 => Some(Self::Overflow),
            _ => None,
        }
    }
}
