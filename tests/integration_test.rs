use hlc_rle::config::{ExecutionMode, OutputFormat, RleConfig};
use hlc_rle::pipeline;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use tempfile::TempDir;

#[test]
fn encode_file_to_text() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("test.txt");
	let output_path = temp_dir.path().join("compressed.txt");

	let mut input_file = File::create(&input_path).unwrap();
	input_file.write_all(b"aaaaaaaaaabbbbbbbbbbccccccccccd").unwrap();
	drop(input_file);

	let cfg = RleConfig::default().with_workers(4);
	let stats = {
		let mut reader = BufReader::new(File::open(&input_path).unwrap());
		let mut writer = BufWriter::new(File::create(&output_path).unwrap());
		pipeline::encode(&mut reader, &mut writer, &cfg).unwrap()
	};

	let written = std::fs::read(&output_path).unwrap();
	assert_eq!(written, b"a10b10c10d1");
	assert_eq!(stats.original_size, 31);
	assert_eq!(stats.encoded_size, written.len() as u64);
	assert_eq!(stats.token_count, 4);
	assert_eq!(stats.chunks, 4);
}

#[test]
fn encode_empty_file() {
	let temp_dir = TempDir::new().unwrap();
	let input_path = temp_dir.path().join("empty.txt");
	File::create(&input_path).unwrap();

	let mut reader = BufReader::new(File::open(&input_path).unwrap());
	let mut output = Vec::new();
	let cfg = RleConfig::default().with_workers(4).with_mode(ExecutionMode::Threads);
	let stats = pipeline::encode(&mut reader, &mut output, &cfg).unwrap();

	assert!(output.is_empty());
	assert_eq!(stats.token_count, 0);
	assert_eq!(stats.ratio, 0.0);
}

#[test]
fn json_output_and_stats() {
	let mut input = std::io::Cursor::new(b"zzzzzzq".to_vec());
	let mut output = Vec::new();
	let cfg = RleConfig::default()
		.with_workers(3)
		.with_format(OutputFormat::Json);
	let stats = pipeline::encode(&mut input, &mut output, &cfg).unwrap();

	let tokens: serde_json::Value = serde_json::from_slice(&output).unwrap();
	assert_eq!(tokens, serde_json::json!([{"symbol": 122, "count": 6}, {"symbol": 113, "count": 1}]));

	let stats_json = serde_json::to_value(&stats).unwrap();
	assert_eq!(stats_json["token_count"], 2);
	assert_eq!(stats_json["fusions"], 2);
}

#[test]
fn binary_output_length() {
	let data = vec![0u8; 5000];
	let cfg = RleConfig::default()
		.with_workers(8)
		.with_format(OutputFormat::Binary);
	let encoded = hlc_rle::encode_data(&data, &cfg).unwrap();
	assert_eq!(encoded.len(), 9);
	assert_eq!(encoded[0], 0);
	assert_eq!(u64::from_le_bytes(encoded[1..9].try_into().unwrap()), 5000);
}
