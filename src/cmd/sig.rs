use wirearg::wire::{Result, sig};

/// Validate a signature and print its top-level tokens.
pub fn run(signature: &str) -> Result<()> {
	sig::validate(signature)?;
	let tokens = sig::split(signature)?;

	println!("signature: {signature}");
	println!("tokens: {}", tokens.len());
	for (index, token) in tokens.iter().enumerate() {
		println!("  [{index}] {token}");
	}
	Ok(())
}
