#![no_std]

mod error;
mod events;
mod storage;
mod validation;

use error::Error;
use events::*;
use storage::{DataKey, Escrow, Loan, LoanStatus, DEFAULT_ESCROW_FEE};

use soroban_sdk::{contract, contractimpl, vec, Address, Env, IntoVal, Symbol};

#[contract]
pub struct LoanEscrow;

#[contractimpl]
impl LoanEscrow {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the contract with its collaborators and limits
    ///
    /// `admin` is the disbursing authority: it controls oracle
    /// registration and is excluded as a borrower. The oracle contract
    /// starts unregistered.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        governance: Address,
        repayment: Address,
        pool: Address,
        max_loans: u64,
        escrow_fee: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Governance, &governance);
        env.storage().instance().set(&DataKey::Repayment, &repayment);
        env.storage().instance().set(&DataKey::Pool, &pool);
        env.storage().instance().set(&DataKey::MaxLoans, &max_loans);
        env.storage().instance().set(&DataKey::EscrowFee, &escrow_fee);
        env.storage().instance().set(&DataKey::NextLoanId, &0u64);

        Ok(())
    }

    /// Register (or replace) the impact oracle contract
    ///
    /// Escrow release is blocked with `InvalidOracle` until an oracle
    /// has been registered.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_oracle_contract(env: Env, oracle: Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        env.storage().instance().set(&DataKey::Oracle, &oracle);

        env.events().publish(
            (Symbol::new(&env, "oracle_set"), oracle.clone()),
            OracleSetEvent { oracle },
        );

        Ok(())
    }

    // ============================================
    // DISBURSEMENT
    // ============================================

    /// Disburse a loan: move the principal from the pool into contract
    /// custody and create the paired loan/escrow records
    ///
    /// Checks run in a fixed order and short-circuit on the first
    /// failure; callers rely on that order to tell overlapping faults
    /// apart. On success the new loan id is returned.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `MaxLoansExceeded`: Configured loan capacity reached
    /// - `InvalidPoolId`: pool_id must be positive
    /// - `InvalidProposalId`: proposal_id must be positive
    /// - `InvalidAmount`: amount must be positive
    /// - `InvalidEscrowDuration`: escrow_duration must be in (0, 365]
    /// - `InvalidInterestRate`: interest_rate must be <= 15
    /// - `InvalidGracePeriod`: grace_period must be <= 30
    /// - `InvalidCurrency`: currency must be XLM, USD or BTC
    /// - `InvalidBorrower`: borrower is the disbursing authority
    /// - `LoanNotApproved`: governance has not approved the proposal
    /// - `InsufficientFunds`: pool balance below the requested amount
    pub fn disburse_loan(
        env: Env,
        borrower: Address,
        pool_id: u32,
        proposal_id: u32,
        amount: i128,
        escrow_duration: u32,
        interest_rate: u32,
        grace_period: u32,
        currency: Symbol,
    ) -> Result<u64, Error> {
        let max_loans: u64 = env
            .storage()
            .instance()
            .get(&DataKey::MaxLoans)
            .ok_or(Error::NotInitialized)?;
        let loan_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextLoanId)
            .unwrap_or(0);

        // Capacity gate precedes all input validation
        if loan_id >= max_loans {
            return Err(Error::MaxLoansExceeded);
        }

        validation::validate_loan_params(
            &env,
            pool_id,
            proposal_id,
            amount,
            escrow_duration,
            interest_rate,
            grace_period,
            &currency,
        )?;

        borrower.require_auth();

        // The disbursing authority cannot borrow from itself
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        if borrower == admin {
            return Err(Error::InvalidBorrower);
        }

        let governance: Address = env
            .storage()
            .instance()
            .get(&DataKey::Governance)
            .ok_or(Error::NotInitialized)?;
        let approved: bool = env.invoke_contract(
            &governance,
            &Symbol::new(&env, "is_proposal_approved"),
            vec![&env, proposal_id.into()],
        );
        if !approved {
            return Err(Error::LoanNotApproved);
        }

        let pool: Address = env
            .storage()
            .instance()
            .get(&DataKey::Pool)
            .ok_or(Error::NotInitialized)?;
        let pool_balance: i128 = env.invoke_contract(
            &pool,
            &Symbol::new(&env, "get_pool_balance"),
            vec![&env, pool_id.into()],
        );
        if pool_balance < amount {
            return Err(Error::InsufficientFunds);
        }

        // Move the principal into contract custody. A failing transfer
        // traps the whole invocation, so no partial state survives.
        env.invoke_contract::<()>(
            &pool,
            &Symbol::new(&env, "transfer_from_pool"),
            vec![
                &env,
                pool_id.into(),
                amount.into_val(&env),
                env.current_contract_address().to_val(),
            ],
        );

        let now = env.ledger().sequence();
        let release_time = now
            .checked_add(escrow_duration)
            .ok_or(Error::InvalidTimestamp)?;

        let loan = Loan {
            loan_id,
            pool_id,
            proposal_id,
            borrower: borrower.clone(),
            amount,
            status: LoanStatus::Active,
            disbursement_time: now,
            escrow_duration,
            interest_rate,
            grace_period,
            currency: currency.clone(),
            impact_verified: false,
        };
        let escrow = Escrow {
            loan_id,
            held_amount: amount,
            release_time,
            released: false,
        };

        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);
        env.storage()
            .instance()
            .set(&DataKey::Escrow(loan_id), &escrow);
        env.storage()
            .instance()
            .set(&DataKey::NextLoanId, &(loan_id + 1));

        env.events().publish(
            (Symbol::new(&env, "loan_disbursed"), loan_id),
            LoanDisbursedEvent {
                loan_id,
                pool_id,
                proposal_id,
                borrower,
                amount,
                release_time,
                currency,
            },
        );

        Ok(loan_id)
    }

    // ============================================
    // ESCROW RELEASE
    // ============================================

    /// Release a held escrow to the borrower
    ///
    /// Only the recorded borrower may release, once the hold period has
    /// elapsed, repayment is complete and the registered oracle has
    /// verified the proposal's impact. A released escrow is terminal.
    ///
    /// # Errors
    /// - `NotFound`: No loan/escrow stored under this id
    /// - `NotAuthorized`: Caller is not the recorded borrower
    /// - `InvalidStatus`: Escrow already released
    /// - `InvalidTimestamp`: Release time not yet reached
    /// - `RepaymentIncomplete`: Repayment obligation not complete
    /// - `InvalidOracle`: No oracle contract registered
    /// - `ImpactNotVerified`: Oracle has not verified the impact
    pub fn release_escrow(env: Env, caller: Address, loan_id: u64) -> Result<(), Error> {
        caller.require_auth();

        let mut loan: Loan = env
            .storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::NotFound)?;
        let mut escrow: Escrow = env
            .storage()
            .instance()
            .get(&DataKey::Escrow(loan_id))
            .ok_or(Error::NotFound)?;

        if caller != loan.borrower {
            return Err(Error::NotAuthorized);
        }

        if escrow.released {
            return Err(Error::InvalidStatus);
        }

        if env.ledger().sequence() < escrow.release_time {
            return Err(Error::InvalidTimestamp);
        }

        let repayment: Address = env
            .storage()
            .instance()
            .get(&DataKey::Repayment)
            .ok_or(Error::NotInitialized)?;
        let repaid: bool = env.invoke_contract(
            &repayment,
            &Symbol::new(&env, "is_repayment_complete"),
            vec![&env, loan_id.into_val(&env)],
        );
        if !repaid {
            return Err(Error::RepaymentIncomplete);
        }

        let oracle: Address = env
            .storage()
            .instance()
            .get(&DataKey::Oracle)
            .ok_or(Error::InvalidOracle)?;
        let verified: bool = env.invoke_contract(
            &oracle,
            &Symbol::new(&env, "is_impact_verified"),
            vec![&env, loan.proposal_id.into()],
        );
        if !verified {
            return Err(Error::ImpactNotVerified);
        }

        // Custody leg: contract -> borrower on the pool ledger
        let pool: Address = env
            .storage()
            .instance()
            .get(&DataKey::Pool)
            .ok_or(Error::NotInitialized)?;
        env.invoke_contract::<()>(
            &pool,
            &Symbol::new(&env, "transfer"),
            vec![
                &env,
                env.current_contract_address().to_val(),
                loan.borrower.to_val(),
                escrow.held_amount.into_val(&env),
            ],
        );

        escrow.released = true;
        loan.impact_verified = true;

        env.storage()
            .instance()
            .set(&DataKey::Escrow(loan_id), &escrow);
        env.storage().instance().set(&DataKey::Loan(loan_id), &loan);

        env.events().publish(
            (Symbol::new(&env, "escrow_released"), loan_id),
            EscrowReleasedEvent {
                loan_id,
                borrower: loan.borrower.clone(),
                amount: escrow.held_amount,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get a loan record
    pub fn get_loan(env: Env, loan_id: u64) -> Result<Loan, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::NotFound)
    }

    /// Get an escrow record
    pub fn get_escrow(env: Env, loan_id: u64) -> Result<Escrow, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Escrow(loan_id))
            .ok_or(Error::NotFound)
    }

    /// Number of loans disbursed so far
    pub fn get_loan_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::NextLoanId)
            .unwrap_or(0)
    }

    /// Flat escrow fee constant
    pub fn get_escrow_fee(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::EscrowFee)
            .unwrap_or(DEFAULT_ESCROW_FEE)
    }

    /// Registered oracle contract, if any
    pub fn get_oracle_contract(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Oracle)
            .ok_or(Error::InvalidOracle)
    }
}
