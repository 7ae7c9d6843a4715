use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::metadata::{Color, ECLevel};
use crate::builder::{Matrix, QR};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskingPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Each function returns true for the modules to be flipped
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

// Best mask selection
//------------------------------------------------------------------------------

// Masks the filled matrix with every pattern and keeps the candidate with the lowest penalty.
// Ties go to the lowest pattern index.
pub fn apply_best_mask(matrix: &Matrix, ecl: ECLevel) -> QR {
    let mut candidates = evaluate_masks(matrix, ecl);
    debug_assert_eq!(candidates.len(), 8, "Expected a candidate per mask pattern");

    let mut scores = [0u32; 8];
    let mut best = 0;
    for (i, (_, score)) in candidates.iter().enumerate() {
        trace!("Mask {i} penalty: {score}");
        scores[i] = *score;
        if *score < scores[best] {
            best = i;
        }
    }

    let (mut qr, _) = candidates.swap_remove(best);
    qr.set_penalty_scores(scores);
    qr
}

fn evaluate_mask(matrix: &Matrix, ecl: ECLevel, pattern: MaskPattern) -> (QR, u32) {
    let qr = matrix.masked(ecl, pattern);
    let penalty = compute_total_penalty(&qr);
    (qr, penalty)
}

#[cfg(not(feature = "parallel"))]
fn evaluate_masks(matrix: &Matrix, ecl: ECLevel) -> Vec<(QR, u32)> {
    MaskPattern::all().map(|m| evaluate_mask(matrix, ecl, m)).collect()
}

// Candidates are independent, rayon keeps the collected order so tie breaking is unchanged
#[cfg(feature = "parallel")]
fn evaluate_masks(matrix: &Matrix, ecl: ECLevel) -> Vec<(QR, u32)> {
    use rayon::prelude::*;

    let patterns = MaskPattern::all().collect::<Vec<_>>();
    patterns.into_par_iter().map(|m| evaluate_mask(matrix, ecl, m)).collect()
}

// Penalty
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Rows are scanned as one continuous sequence, then columns. The run only resets when the
// color changes.
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width();
    let rows = (0..w).flat_map(|r| (0..w).map(move |c| (r, c)));
    let cols = (0..w).flat_map(|c| (0..w).map(move |r| (r, c)));
    run_penalty(rows.map(|(r, c)| qr.get(r, c))) + run_penalty(cols.map(|(r, c)| qr.get(r, c)))
}

fn run_penalty(modules: impl IntoIterator<Item = Color>) -> u32 {
    let mut pen = 0;
    let mut last = Color::Light;
    let mut run_len = 0;
    for clr in modules {
        if clr != last {
            last = clr;
            run_len = 1;
            continue;
        }
        run_len += 1;
        match run_len {
            5 => pen += 3,
            6.. => pen += 1,
            _ => (),
        }
    }
    pen
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = qr.get(r, c);
            if clr == qr.get(r + 1, c) && clr == qr.get(r, c + 1) && clr == qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    let len = FINDER_PENALTY_PATTERNS[0].len();
    for i in 0..w {
        let get = |j: usize| if is_hor { qr.get(i, j) } else { qr.get(j, i) };
        for j in 0..(w + 1).saturating_sub(len) {
            for pattern in FINDER_PENALTY_PATTERNS.iter() {
                if pattern.iter().enumerate().all(|(k, &clr)| get(j + k) == clr) {
                    pen += FINDER_PENALTY;
                }
            }
        }
    }
    pen
}

// Twice the distance in percent from the 50% dark ratio, after rounding the ratio to the
// nearer multiple of 5
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let tot = w * w;
    let lower = (dark_cnt * 20 / tot) * 5;
    let upper = (dark_cnt * 20).div_ceil(tot) * 5;
    let dev = std::cmp::min(lower.abs_diff(50), upper.abs_diff(50));
    (dev * 2) as u32
}


// Global constants
//------------------------------------------------------------------------------

static FINDER_PENALTY: u32 = 40;

static FINDER_PENALTY_PATTERNS: [[Color; 11]; 2] = {
    use Color::{Dark as D, Light as L};
    [[L, L, L, L, D, L, D, D, D, L, D], [D, L, D, D, D, L, D, L, L, L, L]]
};
