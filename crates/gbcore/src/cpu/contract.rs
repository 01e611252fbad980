//! Fail-fast checks for caller bugs.
//!
//! A violated contract is a decoder bug. It is logged and then panics at the
//! caller's location.

/// Return `value` unchanged if it is below `MAX`, otherwise violate the
/// `value < MAX` contract.
#[track_caller]
#[inline]
pub(crate) fn checked_u8<const MAX: u8>(value: u8) -> u8 {
    if value >= MAX {
        violated(&format!("value < {MAX} (got {value})"));
    }
    value
}

#[cold]
#[track_caller]
fn violated(what: &str) -> ! {
    let location = std::panic::Location::caller();
    log::error!("contract violation: {} at {}", what, location);
    panic!("contract violation: {}", what);
}
