use std::error::Error;

use qrcraft::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Simplest usage - provide only data, version and error correction level are chosen
    let qr = QRBuilder::new(b"Hello, World!").build()?;

    // Draw to the terminal, 1 character per module
    print!("{}", qr.to_str(1));

    println!("QR metadata: {}", qr.metadata());
    Ok(())
}
