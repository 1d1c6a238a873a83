use soroban_sdk::{contracttype, Address, Symbol};

// Validation bounds for disbursement terms, in ledger-sequence steps
// (duration) and whole percentage points (rate).
pub const MAX_ESCROW_DURATION: u32 = 365;
pub const MAX_INTEREST_RATE: u32 = 15;
pub const MAX_GRACE_PERIOD: u32 = 30;

// Flat fee retained per escrow. Stored at initialization; this contract
// performs no fee arithmetic.
pub const DEFAULT_ESCROW_FEE: i128 = 500;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoanStatus {
    /// Principal disbursed, escrow holding the funds. Repayment progress
    /// is tracked by the external repayment ledger, not here.
    Active = 0,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    /// Sequential identifier, assigned from 0 and never reused
    pub loan_id: u64,
    /// Funding pool reference
    pub pool_id: u32,
    /// Governance proposal reference
    pub proposal_id: u32,
    /// Recipient of the principal; never the disbursing authority
    pub borrower: Address,
    /// Principal, fixed at disbursement
    pub amount: i128,
    /// Engine-assigned state
    pub status: LoanStatus,
    /// Ledger sequence at disbursement
    pub disbursement_time: u32,
    /// Escrow hold duration in ledger-sequence steps, (0, 365]
    pub escrow_duration: u32,
    /// Informational rate, [0, 15]
    pub interest_rate: u32,
    /// Informational grace period, [0, 30]
    pub grace_period: u32,
    /// Settlement currency (XLM, USD or BTC)
    pub currency: Symbol,
    /// Set true only by a successful escrow release
    pub impact_verified: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Escrow {
    /// Same key as the paired loan, written in the same invocation
    pub loan_id: u64,
    /// Equals the loan amount; never changes
    pub held_amount: i128,
    /// disbursement_time + escrow_duration
    pub release_time: u32,
    /// One-way false -> true transition
    pub released: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Governance,
    Repayment,
    Pool,
    Oracle,
    MaxLoans,
    EscrowFee,
    NextLoanId,
    Loan(u64),   // loan id -> Loan
    Escrow(u64), // loan id -> Escrow
    Initialized,
}
