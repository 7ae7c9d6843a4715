// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks two column wide lanes from the bottom right corner leftwards, snaking up and down
// alternately, and yields every module in placement order as (row, column). Callers skip
// modules that are already occupied. The lane containing the vertical timing column is
// shifted one column left.
#[derive(Clone)]
pub struct EncRegionIter {
    // Right column of current lane
    lane: i16,
    // 0 for right column of lane, 1 for left
    x_off: i16,
    r: i16,
    w: i16,
    upwards: bool,
}

impl EncRegionIter {
    pub fn new(w: usize) -> Self {
        let w = w as i16;
        Self { lane: w - 1, x_off: 0, r: w - 1, w, upwards: true }
    }

    fn advance(&mut self) {
        self.x_off += 1;
        if self.x_off < 2 {
            return;
        }
        self.x_off = 0;

        if self.upwards {
            self.r -= 1;
            if self.r < 0 {
                self.upwards = false;
                self.r = 0;
                self.lane -= 2;
                if self.lane == VERT_TIMING_COL {
                    self.lane -= 1;
                }
            }
        } else {
            self.r += 1;
            if self.r >= self.w {
                self.upwards = true;
                self.r = self.w - 1;
                self.lane -= 2;
            }
        }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.lane <= 0 {
            return None;
        }
        let res = (self.r, self.lane - self.x_off);
        self.advance();
        Some(res)
    }
}


// Global constants
//------------------------------------------------------------------------------

static VERT_TIMING_COL: i16 = 6;
