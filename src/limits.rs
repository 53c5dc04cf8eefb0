//! DoS prevention constants.
//!
//! These limits keep recursion and container depth bounded on
//! pathological inputs. Ordinary documents never reach them.

/// Maximum nesting depth for block containers (lists, blockquotes).
///
/// Once the open container chain is this deep, further container
/// markers on a line are treated as text.
pub const MAX_BLOCK_NESTING: usize = 64;

/// Maximum nesting depth for emphasis and link labels.
///
/// An emphasis opener found at this depth stays a literal delimiter run.
pub const MAX_INLINE_NESTING: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MAX_BLOCK_NESTING >= 16) };
        const { assert!(MAX_BLOCK_NESTING <= 256) };
        const { assert!(MAX_INLINE_NESTING >= 16) };
    }
}
