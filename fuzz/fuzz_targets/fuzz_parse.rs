#![no_main]

use libfuzzer_sys::fuzz_target;
use wavmeta::{ReadOptions, WavFile};

fuzz_target!(|data: &[u8]| {
    let options = ReadOptions::default()
        .max_chunk_size(1 << 20)
        .eager_decode(true);
    let Ok(wav) = WavFile::from_reader_with_options(std::io::Cursor::new(data), &options) else {
        return;
    };

    let _ = wav.loop_metadata();
    let _ = wav.info_metadata();
    let _ = wav.raw_frames().map(|frames| frames.count());

    // Serialized output must parse back to the same bytes.
    let bytes = wav.to_bytes().expect("parsed container must serialize");
    let again = WavFile::from_bytes(&bytes).expect("serialized container must parse");
    assert_eq!(again.to_bytes().expect("reparsed container must serialize"), bytes);
});
