use std::error::Error;

use tracing_subscriber::EnvFilter;

use qrcraft::{latin1_bytes, ECLevel, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    // RUST_LOG=qrcraft=trace shows block structure and every mask penalty
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qrcraft=debug")),
        )
        .init();

    let data = latin1_bytes("This example shows all available configuration options. Grüße!")?;

    let qr = QRBuilder::new(&data)
        .version(Version::new(7)?) // Lower bound, smallest fitting version if not provided
        .ec_level(ECLevel::Q) // Error correction level - if not provided, defaults to ECLevel::H
        .build()?;

    print!("{}", qr.to_str(1));

    println!("QR metadata: {}", qr.metadata());
    println!("Mask penalties: {:?}", qr.penalty_scores());
    println!("Dark modules: {} of {}", qr.count_dark_modules(), qr.width() * qr.width());

    Ok(())
}
