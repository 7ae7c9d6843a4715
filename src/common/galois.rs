// Galois field tables
//------------------------------------------------------------------------------

// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1
const PRIMITIVE_POLY: u16 = 0x11D;

const fn build_exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut value: u16 = 1;
    let mut exp = 0;
    while exp < 256 {
        table[exp] = value as u8;
        value <<= 1;
        if value > 255 {
            value ^= PRIMITIVE_POLY;
        }
        exp += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let exp_table = build_exp_table();
    let mut table = [0u8; 256];
    let mut exp = 0;
    // alpha^255 == alpha^0, so only the first 255 powers are distinct
    while exp < 255 {
        table[exp_table[exp] as usize] = exp as u8;
        exp += 1;
    }
    table
}

pub(crate) static EXP_TABLE: [u8; 256] = build_exp_table();

// LOG_TABLE[0] is unused, 0 has no logarithm
pub(crate) static LOG_TABLE: [u8; 256] = build_log_table();

// Field arithmetic
//------------------------------------------------------------------------------

pub trait GaloisField {
    fn mul(a: u8, b: u8) -> u8;
}

/// GF(2), coefficients are single bits.
pub struct GF2;

/// GF(256) generated by alpha = 2 over `PRIMITIVE_POLY`.
pub struct GF256;

impl GaloisField for GF2 {
    #[inline]
    fn mul(a: u8, b: u8) -> u8 {
        debug_assert!(a <= 1 && b <= 1, "GF(2) operands must be bits: {a}, {b}");
        a & b
    }
}

impl GaloisField for GF256 {
    #[inline]
    fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_sum = (LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize) % 255;
        EXP_TABLE[log_sum]
    }
}

impl GF256 {
    #[inline]
    pub fn exp(exp: usize) -> u8 {
        EXP_TABLE[exp % 255]
    }
}

// Computes the remainder of message(x) * x^n divided by the monic generator(x),
// where n = generator.len() - 1. Coefficients are ordered highest degree first.
// The remainder always holds exactly n coefficients, leading zeros included.
pub fn poly_rem<F: GaloisField>(message: &[u8], generator: &[u8]) -> Vec<u8> {
    debug_assert!(!generator.is_empty() && generator[0] == 1, "Generator must be monic");

    let len = message.len();
    let n = generator.len() - 1;

    let mut res = message.to_vec();
    res.resize(len + n, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }
        for (u, v) in res[i + 1..].iter_mut().zip(generator[1..].iter()) {
            *u ^= F::mul(*v, lead_coeff);
        }
    }

    res.split_off(len)
}

#[cfg(test)]
mod galois_tests {
    use proptest::prelude::*;

    use super::{poly_rem, GaloisField, EXP_TABLE, GF2, GF256, LOG_TABLE};

    #[test]
    fn test_tables() {
        assert_eq!(EXP_TABLE[0], 1);
        assert_eq!(EXP_TABLE[1], 2);
        assert_eq!(EXP_TABLE[8], 29);
        assert_eq!(EXP_TABLE[255], 1);
        for x in 1..=255u8 {
            assert_eq!(GF256::exp(LOG_TABLE[x as usize] as usize), x);
        }
        assert_eq!(LOG_TABLE[1], 0);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(GF256::mul(1, 1), 1);
        assert_eq!(GF256::mul(2, 2), 4);
        assert_eq!(GF256::mul(0, 200), 0);
        assert_eq!(GF256::mul(200, 0), 0);
        assert_eq!(GF256::mul(128, 2), 29);
    }

    #[test]
    fn test_multiply_gf2() {
        assert_eq!(GF2::mul(0, 0), 0);
        assert_eq!(GF2::mul(0, 1), 0);
        assert_eq!(GF2::mul(1, 0), 0);
        assert_eq!(GF2::mul(1, 1), 1);
    }

    #[test]
    fn test_poly_rem_gf2() {
        // 0b10101 * x^10 mod 0b10100110111 == 0b1001000111
        let msg = [1, 0, 1, 0, 1];
        let gen = [1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 1];
        let rem = poly_rem::<GF2>(&msg, &gen);
        assert_eq!(rem, vec![1, 0, 0, 1, 0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_poly_rem_keeps_leading_zeros() {
        let rem = poly_rem::<GF2>(&[0, 0, 0, 0, 0], &[1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 1]);
        assert_eq!(rem.len(), 10);
        assert!(rem.iter().all(|&b| b == 0));
    }

    proptest! {
        #[test]
        fn proptest_multiply_commutative(a in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(GF256::mul(a, b), GF256::mul(b, a));
        }

        #[test]
        fn proptest_multiply_identity_and_zero(x in any::<u8>()) {
            prop_assert_eq!(GF256::mul(x, 1), x);
            prop_assert_eq!(GF256::mul(x, 0), 0);
            prop_assert_eq!(GF256::mul(0, x), 0);
        }

        #[test]
        fn proptest_multiply_associative(a in any::<u8>(), b in any::<u8>(), c in any::<u8>()) {
            prop_assert_eq!(GF256::mul(GF256::mul(a, b), c), GF256::mul(a, GF256::mul(b, c)));
        }
    }
}
