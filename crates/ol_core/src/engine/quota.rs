//! Quota adjustment after a scored round.
//!
//! The league runs one canonical adjustment rule, the settlement variant:
//! beat your quota by two or more and half the overage (rounded up) is
//! added; miss it by three or more and two points come off; anything in
//! between leaves the quota alone. A difference-based variant that
//! triggered at minus two circulated in older sheets and is deliberately
//! not implemented alongside this one.

/// New quota from the previous quota and the round score.
///
/// Total over all integer inputs and idempotent for equal inputs.
pub fn adjust_quota(previous: i32, score: i32) -> i32 {
    let diff = score - previous;
    if diff >= 2 {
        // ceil(diff / 2) for a positive diff
        previous + (diff + 1) / 2
    } else if diff <= -3 {
        previous - 2
    } else {
        previous
    }
}
