use crate::common::{
    mask::MaskPattern,
    metadata::{Color, ECLevel, Version},
};

// Finished symbol. Every module is resolved to a color and nothing changes after the build.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Box<[Color]>,
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: MaskPattern,
    penalty_scores: [u32; 8],
}

impl QR {
    pub(crate) fn new(
        grid: Vec<Color>,
        w: usize,
        ver: Version,
        ecl: ECLevel,
        mask: MaskPattern,
    ) -> Self {
        debug_assert_eq!(grid.len(), w * w, "Grid doesn't match width {w}");
        Self { grid: grid.into_boxed_slice(), w, ver, ecl, mask, penalty_scores: [0; 8] }
    }

    pub(crate) fn set_penalty_scores(&mut self, scores: [u32; 8]) {
        self.penalty_scores = scores;
    }

    pub fn grid(&self) -> &[Color] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Penalty of each mask candidate, indexed by pattern. The chosen mask holds the minimum.
    pub fn penalty_scores(&self) -> [u32; 8] {
        self.penalty_scores
    }

    pub fn metadata(&self) -> String {
        format!("{{ Version: {}, Ec level: {:?}, Mask: {} }}", *self.ver, self.ecl, *self.mask)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == Color::Dark).count()
    }

    pub fn get(&self, r: usize, c: usize) -> Color {
        debug_assert!(r < self.w && c < self.w, "Module ({r}, {c}) is out of bounds");
        self.grid[r * self.w + c]
    }
}

// Render
//------------------------------------------------------------------------------

impl QR {
    /// Draws the symbol with block characters, `module_sz` characters per module and a 4 module
    /// quiet zone. Light modules are drawn solid so the code reads on dark terminals.
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE_SIZE * module_sz;
        let qr_sz = self.w * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;
                canvas.push(self.get(r, c).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}


// Global constants
//------------------------------------------------------------------------------

static QUIET_ZONE_SIZE: usize = 4;
