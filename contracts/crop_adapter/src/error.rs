use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Fee out of range or reward token equal to target
    InvalidConfig = 3,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Hook invoked by something other than the yield-token ledger
    UntrustedCaller = 10,

    // ============================================
    // SERIES ERRORS (20-29)
    // ============================================
    /// No series has been issued for this maturity
    SeriesNotFound = 20,
    /// Settlement attempted before maturity
    MaturityNotReached = 21,
    /// Series already settled
    AlreadySettled = 22,
    /// Principal redemption attempted before settlement
    SeriesNotSettled = 23,
    /// Issuance into a maturity that is not in the future
    InvalidMaturity = 24,

    // ============================================
    // AMOUNT/STAKE ERRORS (30-39)
    // ============================================
    /// Deposit rounds to zero principal units
    InsufficientDeposit = 30,
    /// Holder does not hold enough claim tokens
    InsufficientStake = 31,
    /// Amount must be positive
    InvalidAmount = 32,

    // ============================================
    // ARITHMETIC ERRORS (40-49)
    // ============================================
    /// Oracle returned a non-positive scale
    InvalidScale = 40,
    /// Fixed-point overflow
    ArithmeticOverflow = 41,
}
