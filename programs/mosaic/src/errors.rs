use anchor_lang::prelude::*;

#[error_code]
pub enum MosaicError {
    #[msg("Index and value arrays differ in length")]
    ArrayLengthMismatch,

    #[msg("Slot index out of range")]
    IndexOutOfRange,

    #[msg("Payment does not match batch size times unit price")]
    InsufficientPayment,

    #[msg("New capacity must exceed current capacity")]
    InvalidCapacity,

    #[msg("Capacity growth exceeds the per-instruction realloc limit")]
    GrowthStepTooLarge,

    #[msg("Requested range does not fit in return data")]
    ViewRangeTooLarge,

    #[msg("Unit price must be non-zero")]
    InvalidUnitPrice,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Slot grid account is malformed or does not match config")]
    InvalidSlotGrid,

    #[msg("Account state is malformed or keyed to another address")]
    InvalidAccountState,

    #[msg("Treasury does not match config")]
    InvalidTreasury,

    #[msg("Gauge account does not match beneficiary")]
    InvalidGauge,
}

/// Result of the core grid logic; handlers convert it with `?`.
pub type MosaicResult<T> = std::result::Result<T, MosaicError>;
