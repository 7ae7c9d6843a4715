use std::ops::Deref;

use tracing::trace;

use crate::common::{
    galois::{poly_rem, GaloisField, GF256},
    metadata::{ECLevel, Version},
};

// Final codeword sequence: interleaved data blocks followed by interleaved ecc blocks
pub fn structure_codewords(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let (data_blocks, ecc_blocks) = ecc(data, version, ec_level);
    trace!(
        "Split {} data codewords into {} blocks with {} ecc codewords each",
        data.len(),
        data_blocks.len(),
        version.ecc_per_block(ec_level)
    );

    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));

    debug_assert_eq!(res.len(), version.total_codewords(ec_level), "Structured length mismatch");
    res
}

// ECC: Error Correction Codeword generator
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    let gen_poly = generator_polynomial(version.ecc_per_block(ec_level));
    let ecc_blocks = data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Product of (x - a^i) for i in 0..ecc_count, highest degree first. The leading coefficient
// is always 1.
pub fn generator_polynomial(ecc_count: usize) -> Vec<u8> {
    let mut gen_poly = vec![1, 1];
    for i in 1..ecc_count {
        let root = GF256::exp(i);
        let mut next = vec![0; gen_poly.len() + 1];
        for (j, &coeff) in gen_poly.iter().enumerate() {
            next[j] ^= coeff;
            next[j + 1] ^= GF256::mul(coeff, root);
        }
        gen_poly = next;
    }
    gen_poly
}

// Remainder of the block polynomial shifted by the ecc count, divided by the generator
// polynomial. Its coefficients are the ecc.
fn ecc_per_block(block: &[u8], gen_poly: &[u8]) -> Vec<u8> {
    poly_rem::<GF256>(block, gen_poly)
}

// Takes the i-th codeword of every block in turn, skipping blocks that are too short
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

#[cfg(test)]
mod ec_tests {
    use test_case::test_case;

    use super::{
        blockify, ecc, ecc_per_block, generator_polynomial, interleave, structure_codewords,
    };
    use crate::common::galois::{GaloisField, GF256};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_generator_polynomial_small() {
        // (x + 1)(x + 2)
        assert_eq!(generator_polynomial(2), vec![1, 3, 2]);
        assert_eq!(generator_polynomial(1), vec![1, 1]);
    }

    #[test]
    fn test_generator_polynomial_7() {
        // a^0, a^87, a^229, a^146, a^149, a^238, a^102, a^21
        let exps = [0, 87, 229, 146, 149, 238, 102, 21];
        let expected = exps.iter().map(|&e| GF256::exp(e)).collect::<Vec<_>>();
        assert_eq!(generator_polynomial(7), expected);
    }

    #[test_case(7)]
    #[test_case(10)]
    #[test_case(30)]
    fn test_generator_polynomial_roots(ecc_count: usize) {
        let gen_poly = generator_polynomial(ecc_count);
        assert_eq!(gen_poly.len(), ecc_count + 1);
        for i in 0..ecc_count {
            let x = GF256::exp(i);
            let val = gen_poly.iter().fold(0, |acc, &coeff| GF256::mul(acc, x) ^ coeff);
            assert_eq!(val, 0, "a^{i} is not a root");
        }
    }

    #[test]
    fn test_poly_mod_1() {
        let res = ecc_per_block(
            b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11",
            &generator_polynomial(10),
        );
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", &generator_polynomial(13));
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", &generator_polynomial(18));
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_poly_mod_keeps_leading_zeros() {
        let res = ecc_per_block(&[0; 9], &generator_polynomial(17));
        assert_eq!(res, vec![0; 17]);
    }

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (data, ecc) = ecc(msg, Version::new(1).unwrap(), ECLevel::M);
        assert_eq!(data, vec![&msg[..]]);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (_, ecc) = ecc(msg, Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_blockify() {
        let data = (0..62).collect::<Vec<u8>>();
        let blocks = blockify(&data, Version::new(5).unwrap(), ECLevel::Q);
        let sizes = blocks.iter().map(|b| b.len()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![15, 15, 16, 16]);
        assert_eq!(blocks[2][0], 30);
        assert_eq!(blocks[3][15], 61);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
        assert!(interleave::<u8, Vec<u8>>(&[]).is_empty());
    }

    #[test]
    fn test_structure_codewords() {
        let data = (0..62).collect::<Vec<u8>>();
        let ver = Version::new(5).unwrap();
        let res = structure_codewords(&data, ver, ECLevel::Q);
        assert_eq!(res.len(), ver.total_codewords(ECLevel::Q));
        assert_eq!(&res[..6], &[0, 15, 30, 46, 1, 16]);
        // Short blocks run out first, the tail only holds the longer blocks
        assert_eq!(&res[60..62], &[45, 61]);
    }

    #[test]
    fn test_structure_codewords_single_block() {
        let data = [0x40, 0xB4, 0x84, 0x54, 0xC4, 0xC4, 0xF2, 0x05, 0x74];
        let ver = Version::new(1).unwrap();
        let res = structure_codewords(&data, ver, ECLevel::H);
        assert_eq!(&res[..9], &data);
        assert_eq!(res.len(), 26);
    }
}
