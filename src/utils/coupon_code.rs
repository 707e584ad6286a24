// utils/coupon_code.rs
use rand::Rng;

const CODE_LEN: usize = 10;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 10-character uppercase alphanumeric coupon code.
pub fn generate_coupon_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_coupon_code();
        assert_eq!(code.len(), 10);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_codes_differ() {
        // Not a collision proof, just a sanity check that the generator
        // is not constant.
        let a = generate_coupon_code();
        let b = generate_coupon_code();
        let c = generate_coupon_code();
        assert!(a != b || b != c);
    }
}
