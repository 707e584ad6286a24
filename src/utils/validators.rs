// utils/validators.rs

/// TRC-20 receive address check: 'T' prefix, 34 characters, base58 alphabet
/// (no 0, O, I or l).
pub fn is_valid_trc20_address(address: &str) -> bool {
    if !address.starts_with('T') || address.len() != 34 {
        return false;
    }

    address[1..]
        .chars()
        .all(|c| matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        assert!(is_valid_trc20_address(
            "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"
        ));
    }

    #[test]
    fn test_wrong_prefix() {
        assert!(!is_valid_trc20_address(
            "XR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"
        ));
    }

    #[test]
    fn test_wrong_length() {
        assert!(!is_valid_trc20_address("T123"));
        assert!(!is_valid_trc20_address(
            "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6tXX"
        ));
    }

    #[test]
    fn test_forbidden_characters() {
        // 0, O, I and l are not in the base58 alphabet.
        assert!(!is_valid_trc20_address(
            "T07NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"
        ));
        assert!(!is_valid_trc20_address(
            "TO7NHqjeKQxGTCi8q8ZY4pL8otSzgjLjIl"
        ));
    }
}
