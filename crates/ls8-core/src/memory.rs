//! Memory model primitives for the flat 256-byte address space.

use crate::Fault;

/// Size in bytes of the flat architectural address space.
pub const MEMORY_BYTES: usize = 256;

/// Highest valid memory address.
pub const LAST_ADDRESS: usize = MEMORY_BYTES - 1;

/// Canonical zeroed backing store.
#[must_use]
pub const fn new_address_space() -> [u8; MEMORY_BYTES] {
    [0; MEMORY_BYTES]
}

/// Rejects addresses outside `0..=255`.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] for any address past [`LAST_ADDRESS`].
#[allow(clippy::missing_const_for_fn)]
pub fn validate_address(address: usize) -> Result<usize, Fault> {
    if address <= LAST_ADDRESS {
        Ok(address)
    } else {
        Err(Fault::AddressOutOfRange { address })
    }
}

#[cfg(test)]
mod tests {
    use super::{new_address_space, validate_address, LAST_ADDRESS, MEMORY_BYTES};
    use crate::Fault;

    #[test]
    fn canonical_backing_store_is_256_zero_bytes() {
        let memory = new_address_space();
        assert_eq!(memory.len(), MEMORY_BYTES);
        assert!(memory.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn address_validation_covers_exact_boundary() {
        assert_eq!(validate_address(0), Ok(0));
        assert_eq!(validate_address(LAST_ADDRESS), Ok(LAST_ADDRESS));
        assert_eq!(
            validate_address(MEMORY_BYTES),
            Err(Fault::AddressOutOfRange {
                address: MEMORY_BYTES
            })
        );
    }
}
