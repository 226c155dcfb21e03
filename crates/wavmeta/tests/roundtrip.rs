//! Round-trip tests: parse, serialize, parse again.
//!
//! ```bash
//! cargo test -p wavmeta --test roundtrip
//! ```

use pretty_assertions::assert_eq;

use wavmeta::{
    ChunkTag, CueChunk, CuePoint, FormatChunk, ListChunk, LoopPoint, LoopType, SampleChunk,
    WavBuilder, WavFile,
};

fn inam() -> ChunkTag {
    ChunkTag::from_bytes(*b"INAM")
}

/// Encodes one chunk by hand: tag, size, payload and a pad byte for odd sizes.
fn raw_chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn raw_riff(chunks: &[&[u8]]) -> Vec<u8> {
    let body = chunks.concat();
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend(body);
    out
}

/// A container with every decoded chunk kind, in a deliberately unusual order.
fn scrambled() -> WavFile {
    let smpl = SampleChunk {
        sample_period: 22675,
        midi_unity_note: 60,
        loops: vec![
            LoopPoint::forward(1, 0, 99),
            LoopPoint {
                loop_type: LoopType::Other(40),
                ..LoopPoint::forward(2, 10, 50)
            },
        ],
        sampler_data_size: 3,
        sampler_data: vec![7, 8, 9],
        ..Default::default()
    };
    let cue = CueChunk {
        points: vec![CuePoint::in_data(1, 0), CuePoint::in_data(2, 10)],
    };
    let info = ListChunk::new(ChunkTag::INFO)
        .with_subchunk(inam(), &b"Odd name\0"[..])
        .with_subchunk(ChunkTag::from_bytes(*b"ISFT"), &b"wavmeta"[..]);

    WavBuilder::new()
        .chunk(ChunkTag::from_bytes(*b"JUNK"), vec![0xAA; 7])
        .data((0u8..=200).collect::<Vec<_>>())
        .sample(&smpl)
        .cue(&cue)
        .format(&FormatChunk::pcm(2, 44100, 16))
        .list(&info)
        .chunk(ChunkTag::from_bytes(*b"bext"), vec![1; 5])
        .build()
        .unwrap()
}

#[test]
fn serialization_is_a_fixed_point() {
    let first = scrambled().to_bytes().unwrap();
    let second = WavFile::from_bytes(&first).unwrap().to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn non_canonical_input_is_reordered_byte_for_byte() {
    let junk = raw_chunk(b"JUNK", b"abc");
    let data = raw_chunk(b"data", &[1, 2, 3, 4, 5]);
    let fmt = raw_chunk(b"fmt ", &FormatChunk::pcm(1, 8000, 8).to_payload());
    // INFO list with one odd-sized entry: type, INAM, size 3, "Pad", pad byte
    let mut info_payload = b"INFOINAM".to_vec();
    info_payload.extend_from_slice(&3u32.to_le_bytes());
    info_payload.extend_from_slice(b"Pad\0");
    let info = raw_chunk(b"LIST", &info_payload);
    let bext = raw_chunk(b"bext", &[0x7F]);

    let source = raw_riff(&[&junk, &data, &fmt, &info, &bext]);
    let expected = raw_riff(&[&fmt, &info, &junk, &data, &bext]);

    let wav = WavFile::from_bytes(&source).unwrap();
    assert_eq!(wav.to_bytes().unwrap(), expected);
    assert_eq!(wav.info_metadata().unwrap()[&inam()], "Pad");
}

#[test]
fn canonical_input_is_reproduced_exactly() {
    let canonical = scrambled().to_bytes().unwrap();
    let wav = WavFile::from_bytes(&canonical).unwrap();
    assert!(wav.warnings().is_empty());
    assert_eq!(wav.to_bytes().unwrap(), canonical);
}

#[test]
fn reparsed_chunks_are_canonical_and_verbatim() {
    let original = scrambled();
    let wav = WavFile::from_bytes(&original.to_bytes().unwrap()).unwrap();

    let order: Vec<_> = wav.chunks().iter().map(|c| c.tag().to_string()).collect();
    assert_eq!(order, ["fmt ", "LIST", "JUNK", "data", "smpl", "cue ", "bext"]);

    for chunk in original.chunks() {
        let reparsed = wav.chunk(chunk.tag()).unwrap();
        assert_eq!(reparsed.payload(), chunk.payload(), "{}", chunk.tag());
    }
}

#[test]
fn decoded_fields_survive_round_trip() {
    let wav = WavFile::from_bytes(&scrambled().to_bytes().unwrap()).unwrap();

    let format = wav.format().unwrap();
    assert_eq!((format.channels, format.sample_rate), (2, 44100));
    assert_eq!(format.block_align, 4);

    let loops = wav.loop_metadata().unwrap();
    assert_eq!(loops.len(), 2);
    assert_eq!(loops[1].loop_type, LoopType::Other(40));
    assert_eq!(wav.root_note().unwrap(), Some(60));
    assert_eq!(
        wav.sample_metadata().unwrap().unwrap().sampler_data,
        [7, 8, 9]
    );

    assert_eq!(wav.cue_points().unwrap().len(), 2);
    assert_eq!(wav.info_metadata().unwrap()[&inam()], "Odd name");

    // 201 bytes of 4-byte frames: the trailing byte is dropped.
    assert_eq!(wav.frame_count().unwrap(), 50);
}

#[test]
fn written_file_reopens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scrambled.wav");
    scrambled().write_file(&path).unwrap();

    let wav = WavFile::open(&path).unwrap();
    assert_eq!(wav.chunks().len(), 7);
    assert_eq!(
        u64::from(wav.riff_size().unwrap()) + 8,
        std::fs::metadata(&path).unwrap().len()
    );
}
