use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Scale errors
    /// Scale must be strictly positive
    InvalidScale = 10,
    /// No scale has been published for this adapter
    ScaleNotSet = 11,
}
