use std::ops::{Deref, Not};

use super::error::{QRError, QRResult};
use super::galois::{poly_rem, GF2};
use super::mask::MaskPattern;

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (*Self::MIN..=*Self::MAX).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    // Bit length of the byte mode character count field
    pub fn char_count_bit_len(self) -> usize {
        if self.0 < 10 {
            8
        } else {
            16
        }
    }

    fn block_structure(self, ecl: ECLevel) -> BlockStructure {
        ECC_TABLE[self.0 - 1][ecl as usize]
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.block_structure(ecl).0
    }

    // Returns (group 1 block size, group 1 block count, group 2 block size, group 2 block count)
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let (_, g1_count, g1_size, g2_count, g2_size) = self.block_structure(ecl);
        (g1_size, g1_count, g2_size, g2_count)
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        let (_, g1_count, _, g2_count, _) = self.block_structure(ecl);
        g1_count + g2_count
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        let (_, g1_count, g1_size, g2_count, g2_size) = self.block_structure(ecl);
        g1_count * g1_size + g2_count * g2_size
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn ecc_codewords(self, ecl: ECLevel) -> usize {
        self.block_count(ecl) * self.ecc_per_block(ecl)
    }

    pub fn total_codewords(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) + self.ecc_codewords(ecl)
    }

    // 18 bit version information, 6 data bits followed by 12 BCH bits.
    // Versions below 7 carry no version information.
    pub fn info(self) -> Option<u32> {
        if self.0 < 7 {
            return None;
        }
        let data = bits_of(self.0 as u32, VERSION_INFO_BIT_LEN - VERSION_ERROR_BIT_LEN);
        let ecc = poly_rem::<GF2>(&data, &VERSION_INFO_GENERATOR);
        Some(((self.0 as u32) << VERSION_ERROR_BIT_LEN) | bits_to_int(&ecc))
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Default)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    #[default]
    H = 3,
}

impl ECLevel {
    // Two bit code embedded in the format information
    pub fn format_code(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Color {
    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

// Format information
//------------------------------------------------------------------------------

// 15 bit format information: ec level code, mask index and 10 BCH bits, xored with
// FORMAT_MASK
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let format_data = (ecl.format_code() << 3) | *mask as u32;
    let data = bits_of(format_data, FORMAT_INFO_BIT_LEN - FORMAT_ERROR_BIT_LEN);
    let ecc = poly_rem::<GF2>(&data, &FORMAT_INFO_GENERATOR);
    ((format_data << FORMAT_ERROR_BIT_LEN) | bits_to_int(&ecc)) ^ FORMAT_MASK
}

// MSB first
fn bits_of(number: u32, bit_len: usize) -> Vec<u8> {
    (0..bit_len).rev().map(|i| ((number >> i) & 1) as u8).collect()
}

fn bits_to_int(bits: &[u8]) -> u32 {
    bits.iter().fold(0, |n, &b| (n << 1) | b as u32)
}


// Global constants
//------------------------------------------------------------------------------

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static FORMAT_ERROR_BIT_LEN: usize = 10;

pub static FORMAT_MASK: u32 = 0b101010000010010;

static FORMAT_INFO_GENERATOR: [u8; 11] = [1, 0, 1, 0, 0, 1, 1, 0, 1, 1, 1];

pub static VERSION_INFO_BIT_LEN: usize = 18;

pub static VERSION_ERROR_BIT_LEN: usize = 12;

static VERSION_INFO_GENERATOR: [u8; 13] = [1, 1, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 1];

static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// (ecc per block, group 1 blocks, group 1 block size, group 2 blocks, group 2 block size)
type BlockStructure = (usize, usize, usize, usize, usize);

// Indexed by version - 1, then by ECLevel as L, M, Q, H
static ECC_TABLE: [[BlockStructure; 4]; 40] = [
    [( 7,  1,  19,  0,   0), (10,  1,  16,  0,   0), (13,  1,  13,  0,   0), (17,  1,   9,  0,   0)], // 1
    [(10,  1,  34,  0,   0), (16,  1,  28,  0,   0), (22,  1,  22,  0,   0), (28,  1,  16,  0,   0)], // 2
    [(15,  1,  55,  0,   0), (26,  1,  44,  0,   0), (18,  2,  17,  0,   0), (22,  2,  13,  0,   0)], // 3
    [(20,  1,  80,  0,   0), (18,  2,  32,  0,   0), (26,  2,  24,  0,   0), (16,  4,   9,  0,   0)], // 4
    [(26,  1, 108,  0,   0), (24,  2,  43,  0,   0), (18,  2,  15,  2,  16), (22,  2,  11,  2,  12)], // 5
    [(18,  2,  68,  0,   0), (16,  4,  27,  0,   0), (24,  4,  19,  0,   0), (28,  4,  15,  0,   0)], // 6
    [(20,  2,  78,  0,   0), (18,  4,  31,  0,   0), (18,  2,  14,  4,  15), (26,  4,  13,  1,  14)], // 7
    [(24,  2,  97,  0,   0), (22,  2,  38,  2,  39), (22,  4,  18,  2,  19), (26,  4,  14,  2,  15)], // 8
    [(30,  2, 116,  0,   0), (22,  3,  36,  2,  37), (20,  4,  16,  4,  17), (24,  4,  12,  4,  13)], // 9
    [(18,  2,  68,  2,  69), (26,  4,  43,  1,  44), (24,  6,  19,  2,  20), (28,  6,  15,  2,  16)], // 10
    [(20,  4,  81,  0,   0), (30,  1,  50,  4,  51), (28,  4,  22,  4,  23), (24,  3,  12,  8,  13)], // 11
    [(24,  2,  92,  2,  93), (22,  6,  36,  2,  37), (26,  4,  20,  6,  21), (28,  7,  14,  4,  15)], // 12
    [(26,  4, 107,  0,   0), (22,  8,  37,  1,  38), (24,  8,  20,  4,  21), (22, 12,  11,  4,  12)], // 13
    [(30,  3, 115,  1, 116), (24,  4,  40,  5,  41), (20, 11,  16,  5,  17), (24, 11,  12,  5,  13)], // 14
    [(22,  5,  87,  1,  88), (24,  5,  41,  5,  42), (30,  5,  24,  7,  25), (24, 11,  12,  7,  13)], // 15
    [(24,  5,  98,  1,  99), (28,  7,  45,  3,  46), (24, 15,  19,  2,  20), (30,  3,  15, 13,  16)], // 16
    [(28,  1, 107,  5, 108), (28, 10,  46,  1,  47), (28,  1,  22, 15,  23), (28,  2,  14, 17,  15)], // 17
    [(30,  5, 120,  1, 121), (26,  9,  43,  4,  44), (28, 17,  22,  1,  23), (28,  2,  14, 19,  15)], // 18
    [(28,  3, 113,  4, 114), (26,  3,  44, 11,  45), (26, 17,  21,  4,  22), (26,  9,  13, 16,  14)], // 19
    [(28,  3, 107,  5, 108), (26,  3,  41, 13,  42), (30, 15,  24,  5,  25), (28, 15,  15, 10,  16)], // 20
    [(28,  4, 116,  4, 117), (26, 17,  42,  0,   0), (28, 17,  22,  6,  23), (30, 19,  16,  6,  17)], // 21
    [(28,  2, 111,  7, 112), (28, 17,  46,  0,   0), (30,  7,  24, 16,  25), (24, 34,  13,  0,   0)], // 22
    [(30,  4, 121,  5, 122), (28,  4,  47, 14,  48), (30, 11,  24, 14,  25), (30, 16,  15, 14,  16)], // 23
    [(30,  6, 117,  4, 118), (28,  6,  45, 14,  46), (30, 11,  24, 16,  25), (30, 30,  16,  2,  17)], // 24
    [(26,  8, 106,  4, 107), (28,  8,  47, 13,  48), (30,  7,  24, 22,  25), (30, 22,  15, 13,  16)], // 25
    [(28, 10, 114,  2, 115), (28, 19,  46,  4,  47), (28, 28,  22,  6,  23), (30, 33,  16,  4,  17)], // 26
    [(30,  8, 122,  4, 123), (28, 22,  45,  3,  46), (30,  8,  23, 26,  24), (30, 12,  15, 28,  16)], // 27
    [(30,  3, 117, 10, 118), (28,  3,  45, 23,  46), (30,  4,  24, 31,  25), (30, 11,  15, 31,  16)], // 28
    [(30,  7, 116,  7, 117), (28, 21,  45,  7,  46), (30,  1,  23, 37,  24), (30, 19,  15, 26,  16)], // 29
    [(30,  5, 115, 10, 116), (28, 19,  47, 10,  48), (30, 15,  24, 25,  25), (30, 23,  15, 25,  16)], // 30
    [(30, 13, 115,  3, 116), (28,  2,  46, 29,  47), (30, 42,  24,  1,  25), (30, 23,  15, 28,  16)], // 31
    [(30, 17, 115,  0,   0), (28, 10,  46, 23,  47), (30, 10,  24, 35,  25), (30, 19,  15, 35,  16)], // 32
    [(30, 17, 115,  1, 116), (28, 14,  46, 21,  47), (30, 29,  24, 19,  25), (30, 11,  15, 46,  16)], // 33
    [(30, 13, 115,  6, 116), (28, 14,  46, 23,  47), (30, 44,  24,  7,  25), (30, 59,  16,  1,  17)], // 34
    [(30, 12, 121,  7, 122), (28, 12,  47, 26,  48), (30, 39,  24, 14,  25), (30, 22,  15, 41,  16)], // 35
    [(30,  6, 121, 14, 122), (28,  6,  47, 34,  48), (30, 46,  24, 10,  25), (30,  2,  15, 64,  16)], // 36
    [(30, 17, 122,  4, 123), (28, 29,  46, 14,  47), (30, 49,  24, 10,  25), (30, 24,  15, 46,  16)], // 37
    [(30,  4, 122, 18, 123), (28, 13,  46, 32,  47), (30, 48,  24, 14,  25), (30, 42,  15, 32,  16)], // 38
    [(30, 20, 117,  4, 118), (28, 40,  47,  7,  48), (30, 43,  24, 22,  25), (30, 10,  15, 67,  16)], // 39
    [(30, 19, 118,  6, 119), (28, 18,  47, 31,  48), (30, 34,  24, 34,  25), (30, 20,  15, 61,  16)], // 40
];
