//! # Escrow
//!
//! Wraps the host token contract for all value movement and owns the split
//! arithmetic: milestone amounts, the platform fee, and prorated refunds.
//!
//! All amounts are `i128` in units of the configured escrow token. Every
//! multiplication is checked (overflow raises [`Error::Overflow`]); every
//! division is deterministic floor division. Residual fractions are not
//! separately accounted — they remain in escrow as dust.
//!
//! A rejected token transfer traps, which aborts the whole invocation, so any
//! state written earlier in the same operation is discarded with it.

use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::storage;
use crate::Error;

/// Platform fee: 5 / 1000 (0.5%) of each released milestone amount.
pub const PLATFORM_FEE_NUM: i128 = 5;
pub const PLATFORM_FEE_DEN: i128 = 1000;

/// Milestone percentages are expressed out of 100.
pub const PERCENT_DENOM: i128 = 100;

fn token_client(env: &Env) -> token::Client {
    token::Client::new(env, &storage::get_token(env))
}

/// Pull `amount` from `from` into the contract's escrow balance.
pub fn deposit(env: &Env, from: &Address, amount: i128) {
    token_client(env).transfer(from, &env.current_contract_address(), &amount);
}

/// Push `amount` out of escrow to `to`. Zero amounts are skipped.
pub fn payout(env: &Env, to: &Address, amount: i128) {
    if amount > 0 {
        token_client(env).transfer(&env.current_contract_address(), to, &amount);
    }
}

/// Split a milestone release into `(creator_amount, platform_fee)`.
///
/// `milestone_amount = floor(raised * percentage / 100)`;
/// `platform_fee = floor(milestone_amount * 5 / 1000)`;
/// the creator receives the remainder.
pub fn milestone_split(env: &Env, raised: i128, percentage: u32) -> (i128, i128) {
    let gross = raised
        .checked_mul(percentage as i128)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow))
        / PERCENT_DENOM;
    let fee = gross
        .checked_mul(PLATFORM_FEE_NUM)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow))
        / PLATFORM_FEE_DEN;
    (gross - fee, fee)
}

/// Compute the refund owed on `contribution` after `released` of `raised`
/// has already left escrow.
///
/// `refund = floor(contribution * (raised - released) / raised)` — the refund
/// itself is floored, not the deducted share, so the sum of all refunds can
/// never exceed what remains in escrow. With nothing released this is the
/// full contribution.
pub fn refund_amount(env: &Env, contribution: i128, released: i128, raised: i128) -> i128 {
    if released == 0 || raised == 0 {
        return contribution;
    }
    let remaining = raised - released;
    contribution
        .checked_mul(remaining)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow))
        / raised
}
