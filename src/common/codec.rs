use tracing::debug;

use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Byte mode encoder
//------------------------------------------------------------------------------

// Finds the smallest version that fits the data, upgrades it to the requested version if the
// request is larger, and encodes the data as padded byte mode codewords
pub fn encode(
    data: &[u8],
    ecl: ECLevel,
    version: Option<Version>,
) -> QRResult<(Vec<u8>, Version)> {
    let min_ver = find_min_version(data.len(), ecl)?;
    let ver = match version {
        Some(v) if v > min_ver => v,
        Some(v) => {
            if v < min_ver {
                debug!("Requested version {} is too small, using version {}", *v, *min_ver);
            }
            min_ver
        }
        None => min_ver,
    };
    Ok((encode_with_version(data, ecl, ver), ver))
}

fn find_min_version(data_len: usize, ecl: ECLevel) -> QRResult<Version> {
    Version::all().find(|&v| fits(data_len, ecl, v)).ok_or(QRError::DataTooLong)
}

// Mode indicator, character count and data must fit the data bit capacity. Below version 10
// this is exactly `data_len + 2 <= data codewords`, from version 10 the 16 bit count field
// needs half a codeword more.
fn fits(data_len: usize, ecl: ECLevel, ver: Version) -> bool {
    let header_len = MODE_INDICATOR_BIT_LEN + ver.char_count_bit_len();
    header_len + (data_len << 3) <= ver.data_bit_capacity(ecl)
}

pub(crate) fn encode_with_version(data: &[u8], ecl: ECLevel, ver: Version) -> Vec<u8> {
    debug_assert!(
        fits(data.len(), ecl, ver),
        "Data of len {} doesn't fit in version {}",
        data.len(),
        *ver
    );

    let bcap = ver.data_bit_capacity(ecl);
    let mut bs = BitStream::new(bcap);

    push_header(&mut bs, data.len(), ver);
    data.iter().for_each(|&b| bs.push_bits(b, 8));
    push_terminator(&mut bs);
    push_padding_bits(&mut bs);

    pad_remaining_capacity(bs.into_codewords(), ver.data_codewords(ecl))
}

fn push_header(bs: &mut BitStream, char_count: usize, ver: Version) {
    bs.push_bits(BYTE_MODE_INDICATOR, MODE_INDICATOR_BIT_LEN);
    bs.push_bits(char_count as u16, ver.char_count_bit_len());
}

fn push_terminator(bs: &mut BitStream) {
    let bit_len = std::cmp::min(TERMINATOR_BIT_LEN, bs.capacity() - bs.len());
    bs.push_bits(0u8, bit_len);
}

fn push_padding_bits(bs: &mut BitStream) {
    let offset = bs.len() & 7;
    if offset > 0 {
        bs.push_bits(0u8, 8 - offset);
    }
}

fn pad_remaining_capacity(mut codewords: Vec<u8>, capacity: usize) -> Vec<u8> {
    let len = codewords.len();
    codewords.extend(PADDING_CODEWORDS.iter().cycle().take(capacity.saturating_sub(len)));
    codewords
}

// Text input
//------------------------------------------------------------------------------

// Maps each char to its code point as a single byte. Chars above U+00FF have no byte mode
// representation and are rejected
pub fn latin1_bytes(text: &str) -> QRResult<Vec<u8>> {
    text.chars().map(|c| u8::try_from(c).map_err(|_| QRError::InvalidChar)).collect()
}


// Global constants
//------------------------------------------------------------------------------

static MODE_INDICATOR_BIT_LEN: usize = 4;

static BYTE_MODE_INDICATOR: u8 = 0b0100;

static TERMINATOR_BIT_LEN: usize = 4;

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
