use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct LoanDisbursedEvent {
    pub loan_id: u64,
    pub pool_id: u32,
    pub proposal_id: u32,
    pub borrower: Address,
    pub amount: i128,
    pub release_time: u32,
    pub currency: Symbol,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct EscrowReleasedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct OracleSetEvent {
    pub oracle: Address,
}
