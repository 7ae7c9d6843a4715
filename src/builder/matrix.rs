use tracing::trace;

use super::QR;
use crate::common::{
    bitstream::BitStream,
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{format_info, Color, ECLevel, Version},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Unset,
    ReservedFormat,
    ReservedVersion,
    Light,
    Dark,
}

impl From<Color> for Module {
    fn from(clr: Color) -> Self {
        match clr {
            Color::Light => Module::Light,
            Color::Dark => Module::Dark,
        }
    }
}

impl Module {
    pub fn color(self) -> Option<Color> {
        match self {
            Module::Light => Some(Color::Light),
            Module::Dark => Some(Color::Dark),
            _ => None,
        }
    }
}

// Working grid of the builder. Holds function patterns, reserved areas and data, along with
// a mask of the modules filled by the data placer, since only those are subject to masking
#[derive(Debug, Clone)]
pub struct Matrix {
    grid: Vec<Module>,
    data_mask: Vec<bool>,
    w: usize,
    ver: Version,
}

impl Matrix {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        Self { grid: vec![Module::Unset; w * w], data_mask: vec![false; w * w], w, ver }
    }

    pub fn count_data_modules(&self) -> usize {
        self.data_mask.iter().filter(|&&d| d).count()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.w as i16;
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for i in 0..w {
            for j in 0..w {
                let is_data = self.is_data(i, j);
                let c = match self.get(i, j) {
                    Module::Unset => '.',
                    Module::ReservedFormat => 'm',
                    Module::ReservedVersion => 'v',
                    Module::Dark if is_data => 'd',
                    Module::Light if is_data => 'D',
                    Module::Dark => 'f',
                    Module::Light => 'F',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be greater than or equal to w");
        debug_assert!(-w <= c && c < w, "column should be greater than or equal to w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }

    pub fn is_data(&self, r: i16, c: i16) -> bool {
        self.data_mask[self.coord_to_index(r, c)]
    }

    fn set_data(&mut self, r: i16, c: i16, clr: Color) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = Module::from(clr);
        self.data_mask[index] = true;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl Matrix {
    fn draw_finder_patterns(&mut self) {
        self.draw_finder_pattern_at(0, 0);
        self.draw_finder_pattern_at(0, -7);
        self.draw_finder_pattern_at(-7, 0);
    }

    // (r, c) is the top left corner of the pattern
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        for i in 0..7 {
            for j in 0..7 {
                let module = match (i, j) {
                    (0 | 6, _) | (_, 0 | 6) => Module::Dark,
                    (1 | 5, _) | (_, 1 | 5) => Module::Light,
                    _ => Module::Dark,
                };
                self.set(r + i, c + j, module);
            }
        }
    }

    fn draw_separators(&mut self) {
        for &(r, c, is_hor) in SEPARATOR_STRIPS.iter() {
            for i in 0..8 {
                if is_hor {
                    self.set(r, c + i, Module::Light);
                } else {
                    self.set(r + i, c, Module::Light);
                }
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl Matrix {
    // Runs between the separators, dark on even indices
    fn draw_timing_patterns(&mut self) {
        let w = self.w as i16;
        for i in TIMING_START..w - TIMING_START {
            let module = Module::from(Color::from(i & 1 == 0));
            self.set(TIMING_LINE, i, module);
            self.set(i, TIMING_LINE, module);
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl Matrix {
    // Every pair of listed positions is a center, except those already covered by finders
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                if self.get(r, c) == Module::Unset {
                    self.draw_alignment_pattern_at(r, c);
                }
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2 {
            for j in -2..=2 {
                let module = match (i, j) {
                    (-2 | 2, _) | (_, -2 | 2) | (0, 0) => Module::Dark,
                    _ => Module::Light,
                };
                self.set(r + i, c + j, module);
            }
        }
    }
}

#[cfg(test)]
mod alignment_pattern_tests {
    use super::Matrix;
    use crate::common::metadata::Version;

    fn draw(ver: usize) -> Matrix {
        let mut mat = Matrix::new(Version::new(ver).unwrap());
        mat.draw_finder_patterns();
        mat.draw_separators();
        mat.draw_alignment_patterns();
        mat
    }

    #[test]
    fn test_alignment_pattern_1() {
        let mut mat = Matrix::new(Version::MIN);
        mat.draw_finder_patterns();
        mat.draw_separators();
        let before = mat.to_debug_str();
        mat.draw_alignment_patterns();
        assert_eq!(mat.to_debug_str(), before);
    }

    #[test]
    fn test_alignment_pattern_3() {
        assert_eq!(
            draw(3).to_debug_str(),
            "\n\
             fffffffF.............Ffffffff\n\
             fFFFFFfF.............FfFFFFFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFfffFfF.............FfFfffFf\n\
             fFFFFFfF.............FfFFFFFf\n\
             fffffffF.............Ffffffff\n\
             FFFFFFFF.............FFFFFFFF\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             .............................\n\
             ....................fffff....\n\
             FFFFFFFF............fFFFf....\n\
             fffffffF............fFfFf....\n\
             fFFFFFfF............fFFFf....\n\
             fFfffFfF............fffff....\n\
             fFfffFfF.....................\n\
             fFfffFfF.....................\n\
             fFFFFFfF.....................\n\
             fffffffF.....................\n"
        );
    }

    #[test]
    fn test_alignment_pattern_7() {
        assert_eq!(
            draw(7).to_debug_str(),
            "\n\
             fffffffF.............................Ffffffff\n\
             fFFFFFfF.............................FfFFFFFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF.............................FfFfffFf\n\
             fFfffFfF............fffff............FfFfffFf\n\
             fFFFFFfF............fFFFf............FfFFFFFf\n\
             fffffffF............fFfFf............Ffffffff\n\
             FFFFFFFF............fFFFf............FFFFFFFF\n\
             ....................fffff....................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....fffff...........fffff...........fffff....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fFfFf...........fFfFf...........fFfFf....\n\
             ....fFFFf...........fFFFf...........fFFFf....\n\
             ....fffff...........fffff...........fffff....\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             .............................................\n\
             ....................fffff...........fffff....\n\
             FFFFFFFF............fFFFf...........fFFFf....\n\
             fffffffF............fFfFf...........fFfFf....\n\
             fFFFFFfF............fFFFf...........fFFFf....\n\
             fFfffFfF............fffff...........fffff....\n\
             fFfffFfF.....................................\n\
             fFfffFfF.....................................\n\
             fFFFFFfF.....................................\n\
             fffffffF.....................................\n"
        );
    }
}

// All function patterns
//------------------------------------------------------------------------------

impl Matrix {
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_finder_patterns();
        self.draw_separators();
        self.draw_alignment_patterns();
        self.draw_timing_patterns();
        self.set(DARK_MODULE.0, DARK_MODULE.1, Module::Dark);
    }
}

// Format & version info
//------------------------------------------------------------------------------

impl Matrix {
    pub fn reserve_info_areas(&mut self) {
        for &(r, c) in FORMAT_INFO_COORDS_MAIN.iter().chain(FORMAT_INFO_COORDS_SIDE.iter()) {
            self.set(r, c, Module::ReservedFormat);
        }
        if self.ver.info().is_some() {
            for &(r, c) in VERSION_INFO_COORDS_TR.iter().chain(VERSION_INFO_COORDS_BL.iter()) {
                self.set(r, c, Module::ReservedVersion);
            }
        }
    }

    fn draw_format_info(&mut self, info: u32) {
        self.draw_number(info, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(info, &FORMAT_INFO_COORDS_SIDE);
    }

    fn draw_version_info(&mut self) {
        if let Some(info) = self.ver.info() {
            self.draw_number(info, &VERSION_INFO_COORDS_TR);
            self.draw_number(info, &VERSION_INFO_COORDS_BL);
        }
    }

    // Bit i of the number goes to the i-th coordinate, LSB first
    fn draw_number(&mut self, number: u32, coords: &[(i16, i16)]) {
        for (i, &(r, c)) in coords.iter().enumerate() {
            debug_assert!(
                matches!(self.get(r, c), Module::ReservedFormat | Module::ReservedVersion),
                "Info bit drawn outside reserved area: ({r}, {c})"
            );
            self.set(r, c, Module::from(Color::from((number >> i) & 1 == 1)));
        }
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Matrix {
    // Places the payload MSB first along the zigzag path and returns the number of payload
    // bits consumed. Modules left over once the payload runs out are remainder bits, they are
    // filled light but still count as data.
    pub fn draw_payload(&mut self, mut payload: BitStream) -> usize {
        let mut placed = 0;
        for (r, c) in EncRegionIter::new(self.w) {
            if self.get(r, c) != Module::Unset {
                continue;
            }
            let bit = match payload.take_bit() {
                Some(bit) => {
                    placed += 1;
                    bit
                }
                None => false,
            };
            self.set_data(r, c, Color::from(bit));
        }

        debug_assert!(!self.grid.contains(&Module::Unset), "Unset module left after placement");
        debug_assert!(payload.take_bit().is_none(), "Payload exceeds encoding region");
        let remainder = self.count_data_modules() - placed;
        trace!("Placed {placed} payload bits, {remainder} remainder bits");

        placed
    }

    // Copy of the filled matrix with the pattern applied to the data modules and the info
    // bits for the pattern embedded
    pub fn masked(&self, ecl: ECLevel, pattern: MaskPattern) -> QR {
        let mask_fn = pattern.mask_functions();
        let mut candidate = self.clone();
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if !candidate.is_data(r, c) || !mask_fn(r, c) {
                    continue;
                }
                if let Some(color) = candidate.get(r, c).color() {
                    candidate.set(r, c, Module::from(!color));
                }
            }
        }
        candidate.draw_format_info(format_info(ecl, pattern));
        candidate.draw_version_info();

        debug_assert!(
            candidate.grid.iter().all(|m| m.color().is_some()),
            "Unresolved module in masked matrix"
        );
        let grid = candidate.grid.iter().map(|m| m.color().unwrap_or(Color::Light)).collect();
        QR::new(grid, self.w, self.ver, ecl, pattern)
    }
}


// Global constants
//------------------------------------------------------------------------------

// (row, column, is_horizontal) of the 8 module separator strips
static SEPARATOR_STRIPS: [(i16, i16, bool); 6] =
    [(7, 0, true), (-8, 0, true), (0, 7, false), (-8, 7, false), (0, -8, false), (7, -8, true)];

static TIMING_LINE: i16 = 6;

static TIMING_START: i16 = 7;

static DARK_MODULE: (i16, i16) = (-8, 8);

// Coordinates in bit order, LSB first. Negative indices wrap from the far edge.
static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (0, -11),
    (0, -10),
    (0, -9),
    (1, -11),
    (1, -10),
    (1, -9),
    (2, -11),
    (2, -10),
    (2, -9),
    (3, -11),
    (3, -10),
    (3, -9),
    (4, -11),
    (4, -10),
    (4, -9),
    (5, -11),
    (5, -10),
    (5, -9),
];

static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-11, 0),
    (-10, 0),
    (-9, 0),
    (-11, 1),
    (-10, 1),
    (-9, 1),
    (-11, 2),
    (-10, 2),
    (-9, 2),
    (-11, 3),
    (-10, 3),
    (-9, 3),
    (-11, 4),
    (-10, 4),
    (-9, 4),
    (-11, 5),
    (-10, 5),
    (-9, 5),
];
