//! Color and label helpers for rendering pins.

use crate::constants::AUTHOR_PALETTE;

/// Stable pin color for an author.
///
/// The hash runs in 64-bit floats and only the shifted operand is truncated
/// to a signed 32-bit integer, so every client picks the same color for the
/// same name.
pub fn author_color(author: &str) -> &'static str {
    let hash = author.encode_utf16().fold(0.0f64, |hash, unit| {
        let shifted = f64::from(to_int32(hash).wrapping_shl(5));
        f64::from(unit) + (shifted - hash)
    });
    AUTHOR_PALETTE[(hash.abs() % AUTHOR_PALETTE.len() as f64) as usize]
}

/// Truncate to a signed 32-bit integer, wrapping modulo 2^32.
fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(4_294_967_296.0) as u32 as i32
}

/// Uppercase first letter of an author name, shown inside the pin.
pub fn author_initial(author: &str) -> String {
    author
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_color_is_stable() {
        assert_eq!(author_color("alice"), author_color("alice"));
        assert!(AUTHOR_PALETTE.contains(&author_color("bob")));
    }

    #[test]
    fn test_author_color_known_values() {
        // "a" hashes to 97, "ab" to 97 * 31 + 98 = 3105.
        assert_eq!(author_color("a"), AUTHOR_PALETTE[7]);
        assert_eq!(author_color("ab"), AUTHOR_PALETTE[5]);
        assert_eq!(author_color(""), AUTHOR_PALETTE[0]);
    }

    #[test]
    fn test_author_color_past_32_bits() {
        // Hash of "christopher" is 4358627063, beyond i32::MAX.
        assert_eq!(author_color("christopher"), AUTHOR_PALETTE[3]);
        assert_eq!(author_color("alexandria_ocasio"), AUTHOR_PALETTE[2]);
        assert_eq!(author_color("alice"), AUTHOR_PALETTE[0]);
    }

    #[test]
    fn test_to_int32_wraps() {
        assert_eq!(to_int32(4_358_627_063.0), 63_659_767);
        assert_eq!(to_int32(2_147_483_648.0), i32::MIN);
        assert_eq!(to_int32(-1.5), -1);
        assert_eq!(to_int32(f64::NAN), 0);
    }

    #[test]
    fn test_author_initial() {
        assert_eq!(author_initial("alice"), "A");
        assert_eq!(author_initial("émile"), "É");
        assert_eq!(author_initial(""), "?");
    }
}
