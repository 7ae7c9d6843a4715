//! # qrcraft
//!
//! A Rust library for encoding byte strings into QR Code symbols (versions 1 to 40) in byte
//! mode, with Reed-Solomon error correction and penalty scored mask selection.
//!
//! ## Features
//!
//! - **Version selection**: Picks the smallest version that holds the data, or honors a larger
//!   requested version
//! - **Reed-Solomon Error Correction**: Configurable levels (L, M, Q, H), with block splitting
//!   and interleaving
//! - **Mask selection**: Scores all 8 mask patterns with the 4 penalty rules and keeps the
//!   lowest
//! - **Parallel masking**: The `parallel` feature evaluates mask candidates with rayon
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrcraft::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Smallest version that fits, error correction level H
//! let qr = QRBuilder::new(b"HELLO WORLD").build()?;
//! assert_eq!(*qr.version(), 2);
//!
//! print!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcraft::{ECLevel, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!".as_bytes())
//!     .version(Version::new(7)?) // Lower bound, the smallest fitting version wins if larger
//!     .ec_level(ECLevel::M) // Defaults to ECLevel::H
//!     .build()?;
//!
//! for r in 0..qr.width() {
//!     for c in 0..qr.width() {
//!         let _is_dark = qr.get(r, c) == qrcraft::Color::Dark;
//!     }
//! }
//! println!("Mask {} with penalties {:?}", *qr.mask(), qr.penalty_scores());
//! # Ok(())
//! # }
//! ```
//!
//! ### Text Input
//!
//! Byte mode carries one byte per character. Text is accepted when every character is at most
//! U+00FF:
//!
//! ```rust
//! use qrcraft::{encode, latin1_bytes, ECLevel, QRError};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = latin1_bytes("Grüße")?;
//! let qr = encode(&data, None, Some(ECLevel::Q))?;
//! assert_eq!(*qr.version(), 1);
//!
//! assert_eq!(latin1_bytes("€"), Err(QRError::InvalidChar));
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! Versions 1 to 40, with sizes from 21x21 to 177x177 modules. Versions 7 and above carry
//! version information blocks.
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ### Rendering
//! The finished [`QR`] exposes its grid of [`Color`] modules. Rendering it to pixels, quiet
//! zone included, is left to the caller. [`QR::to_str`] draws it with block characters.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, QR};
pub use common::codec::latin1_bytes;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};

/// Encodes `data` in byte mode. `version` is a lower bound for the symbol version and `ecl`
/// defaults to [`ECLevel::H`]. Fails with [`QRError::DataTooLong`] when no version holds the
/// data.
pub fn encode(data: &[u8], version: Option<Version>, ecl: Option<ECLevel>) -> QRResult<QR> {
    let mut builder = QRBuilder::new(data);
    builder.ec_level(ecl.unwrap_or_default());
    if let Some(v) = version {
        builder.version(v);
    }
    builder.build()
}
