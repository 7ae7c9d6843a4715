mod ec;
mod matrix;
mod qr;

pub(crate) use matrix::Matrix;
pub use qr::QR;

use tracing::{debug, info};

use crate::common::{
    bitstream::BitStream,
    codec::encode,
    error::QRResult,
    mask::apply_best_mask,
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::default() }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Lower bound for the version. A version too small for the data is ignored in favor of
    /// the smallest one that fits.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!("{{ Version: {:?}, Ec level: {:?} }}", *v, self.ec_level),
            None => format!("{{ Version: None, Ec level: {:?} }}", self.ec_level),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        // Encode data and pick the version
        let (encoded, version) = encode(self.data, self.ec_level, self.version)?;
        debug!(
            "Encoded {} bytes into {} data codewords, version {}",
            self.data.len(),
            encoded.len(),
            *version
        );

        // Compute error correction codewords & interleave
        let codewords = ec::structure_codewords(&encoded, version, self.ec_level);
        let payload = BitStream::from(&codewords);

        // Construct matrix template
        let mut matrix = Matrix::new(version);
        matrix.draw_all_function_patterns();
        matrix.reserve_info_areas();

        let placed = matrix.draw_payload(payload);
        debug_assert_eq!(placed, codewords.len() << 3, "Payload not fully placed");

        let qr = apply_best_mask(&matrix, self.ec_level);
        info!("Generated QR {}", qr.metadata());
        debug!("Mask penalties: {:?}", qr.penalty_scores());

        Ok(qr)
    }
}
