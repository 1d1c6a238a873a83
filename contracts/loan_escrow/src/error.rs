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

    // ============================================
    // AUTHORIZATION ERRORS (100)
    // ============================================
    /// Caller is not the recorded borrower
    NotAuthorized = 100,

    // ============================================
    // INPUT VALIDATION ERRORS (101-103, 110, 114-116, 120)
    // ============================================
    /// Pool reference must be positive
    InvalidPoolId = 101,
    /// Proposal reference must be positive
    InvalidProposalId = 102,
    /// Amount must be positive
    InvalidAmount = 103,
    /// Borrower is the disbursing authority
    InvalidBorrower = 110,
    /// Escrow duration must be in (0, 365]
    InvalidEscrowDuration = 114,
    /// Interest rate must be <= 15
    InvalidInterestRate = 115,
    /// Grace period must be <= 30
    InvalidGracePeriod = 116,
    /// Currency not in the supported set
    InvalidCurrency = 120,

    // ============================================
    // STATE / PRECONDITION ERRORS (104-106, 109, 112-113, 118-119)
    // ============================================
    /// Escrow already released
    InvalidStatus = 104,
    /// Proposal not approved by governance
    LoanNotApproved = 105,
    /// Pool balance below requested amount
    InsufficientFunds = 106,
    /// Release time not yet reached
    InvalidTimestamp = 109,
    /// Repayment obligation not complete
    RepaymentIncomplete = 112,
    /// Configured loan capacity reached
    MaxLoansExceeded = 113,
    /// No oracle contract registered
    InvalidOracle = 118,
    /// Impact not verified by the oracle
    ImpactNotVerified = 119,

    // ============================================
    // LOOKUP ERRORS (108)
    // ============================================
    /// No loan/escrow stored under this id
    NotFound = 108,
}
