//! Fixed-point helpers. Every division floors, so the ledger can only
//! under-distribute.

/// 1.0 with 18 decimals (scales and the reward accumulator)
pub const WAD: i128 = 1_000_000_000_000_000_000;
/// 100% = 10,000 basis points
pub const BASIS_POINTS: i128 = 10_000;

/// floor(x * y / denominator)
pub fn mul_div_down(x: i128, y: i128, denominator: i128) -> Option<i128> {
    if denominator <= 0 {
        return None;
    }
    x.checked_mul(y)?.checked_div(denominator)
}

/// Principal units minted for a target amount
///
/// Formula: principal = target × scale / WAD
///
/// Example:
/// - target: 100, scale: 1.05
/// - principal: 105
pub fn principal_units(target: i128, scale: i128) -> Option<i128> {
    mul_div_down(target, scale, WAD)
}

/// Target amount backing a principal amount at `scale`
///
/// Formula: target = principal × WAD / scale
pub fn target_units(principal: i128, scale: i128) -> Option<i128> {
    mul_div_down(principal, WAD, scale)
}

/// Issuance fee taken from a deposit
///
/// Formula: fee = amount × fee_bps / 10,000
pub fn issuance_fee(amount: i128, fee_bps: i128) -> Option<i128> {
    mul_div_down(amount, fee_bps, BASIS_POINTS)
}

/// Accumulator increase for a reward inflow spread over `total_stake`
///
/// Formula: delta = reward × WAD / total_stake
pub fn reward_per_stake(reward: i128, total_stake: i128) -> Option<i128> {
    mul_div_down(reward, WAD, total_stake)
}

/// Reward earned by `stake` since `checkpoint`
///
/// Formula: owed = stake × (accumulator − checkpoint) / WAD
pub fn accrued_reward(stake: i128, accumulator: i128, checkpoint: i128) -> Option<i128> {
    let growth = accumulator.checked_sub(checkpoint)?;
    if growth < 0 {
        return None;
    }
    mul_div_down(stake, growth, WAD)
}

/// Target released to yield holders when the scale grows from
/// `last_scale` to `scale`
///
/// Formula: surplus = yield × WAD / last_scale − yield × WAD / scale
///
/// Example:
/// - yield: 100, last_scale: 1.0, scale: 1.25
/// - surplus: 100 − 80 = 20
pub fn yield_surplus(yield_amount: i128, last_scale: i128, scale: i128) -> Option<i128> {
    if scale <= last_scale {
        return Some(0);
    }
    target_units(yield_amount, last_scale)?.checked_sub(target_units(yield_amount, scale)?)
}

/// Single scale at which `yield_amount` is worth `units` of target
///
/// Used to merge a position entered at several scales.
///
/// Formula: scale = yield × WAD / units
pub fn merged_scale(yield_amount: i128, units: i128) -> Option<i128> {
    mul_div_down(yield_amount, WAD, units)
}
