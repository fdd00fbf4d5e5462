use hlc_rle::config::{ExecutionMode, RleConfig};
use hlc_rle::{format, pipeline};

fn main() {
	let data = b"aaaabbbbbbcccccccccccdd".repeat(3);
	let cfg = RleConfig::default().with_workers(4).with_mode(ExecutionMode::Threads);

	let encoded = pipeline::encode_buffer(&data, &cfg).unwrap();
	println!(
		"{} bytes -> {} tokens across {} chunks ({} fused)",
		encoded.stats.original_size, encoded.stats.token_count, encoded.stats.chunks, encoded.stats.fusions
	);

	let text = format::to_bytes(&encoded.tokens, cfg.format).unwrap();
	println!("{}", String::from_utf8_lossy(&text));
}
