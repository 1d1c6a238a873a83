use crate::error::Error;
use crate::storage::{MAX_ESCROW_DURATION, MAX_GRACE_PERIOD, MAX_INTEREST_RATE};

use soroban_sdk::{Env, Symbol};

/// Settlement currencies the protocol accepts: the native token, a fiat
/// proxy and one alt coin.
pub fn is_supported_currency(env: &Env, currency: &Symbol) -> bool {
    *currency == Symbol::new(env, "XLM")
        || *currency == Symbol::new(env, "USD")
        || *currency == Symbol::new(env, "BTC")
}

/// Disbursement parameter checks, short-circuiting in declaration order.
/// The order decides which error code a caller observes when several
/// parameters are bad at once, so it is part of the contract surface.
pub fn validate_loan_params(
    env: &Env,
    pool_id: u32,
    proposal_id: u32,
    amount: i128,
    escrow_duration: u32,
    interest_rate: u32,
    grace_period: u32,
    currency: &Symbol,
) -> Result<(), Error> {
    if pool_id == 0 {
        return Err(Error::InvalidPoolId);
    }

    if proposal_id == 0 {
        return Err(Error::InvalidProposalId);
    }

    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    if escrow_duration == 0 || escrow_duration > MAX_ESCROW_DURATION {
        return Err(Error::InvalidEscrowDuration);
    }

    if interest_rate > MAX_INTEREST_RATE {
        return Err(Error::InvalidInterestRate);
    }

    if grace_period > MAX_GRACE_PERIOD {
        return Err(Error::InvalidGracePeriod);
    }

    if !is_supported_currency(env, currency) {
        return Err(Error::InvalidCurrency);
    }

    Ok(())
}
