//! Integration tests for streaming segmentation across refills

use std::io::{self, Read};
use std::sync::Arc;

use paoding_core::{
    Analyzer, CharSource, Dictionary, Mode, Segmenter, SegmentError, StrSource, Token, Utf8Source,
};

/// Mock reader that provides data in small byte chunks
struct ChunkedReader {
    data: Vec<u8>,
    position: usize,
    chunk_size: usize,
    fail_at_end: bool,
}

impl ChunkedReader {
    fn new(data: &str, chunk_size: usize) -> Self {
        Self {
            data: data.as_bytes().to_vec(),
            position: 0,
            chunk_size,
            fail_at_end: false,
        }
    }

    fn failing(data: &str, chunk_size: usize) -> Self {
        Self {
            fail_at_end: true,
            ..Self::new(data, chunk_size)
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.data.len() {
            if self.fail_at_end {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "socket read timed out"));
            }
            return Ok(0);
        }

        let remaining = self.data.len() - self.position;
        let to_read = remaining.min(self.chunk_size).min(buf.len());

        buf[..to_read].copy_from_slice(&self.data[self.position..self.position + to_read]);
        self.position += to_read;

        Ok(to_read)
    }
}

/// Char source handing out at most `step` characters per read
struct Trickle {
    inner: StrSource,
    step: usize,
}

impl CharSource for Trickle {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let limit = buf.len().min(self.step);
        self.inner.read_chars(&mut buf[..limit])
    }
}

fn dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words([
        "中华", "华人", "人民", "共和国", "共和", "国", "你好", "世界", "北京大学", "大学",
    ]))
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn test_word_split_across_refill_is_one_token() {
    // Capacity 4 puts "共和国" across the first refill boundary.
    let mut segmenter = Segmenter::with_dictionary(
        dictionary(),
        Mode::MaxWordLength,
        4,
        StrSource::new("你好共和国"),
    )
    .unwrap();

    let tokens: Vec<Token> = segmenter.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(texts(&tokens), vec!["你好", "共和国"]);
    assert_eq!((tokens[1].start, tokens[1].end), (2, 5));
}

#[test]
fn test_byte_chunks_split_multibyte_chars() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MaxWordLength, 8).unwrap();
    let text = "你好，世界。中华人民共和国";
    let expected = analyzer.analyze(text).unwrap();

    for chunk_size in [1, 2, 5, 7] {
        let tokens = analyzer
            .analyze_reader(ChunkedReader::new(text, chunk_size))
            .unwrap();
        assert_eq!(tokens, expected, "chunk size {chunk_size}");
    }
}

#[test]
fn test_trickling_source_matches_whole_input() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MostWords, 6).unwrap();
    let text = "北京大学的中华人民共和国 abc12 世界";
    let expected = analyzer.analyze(text).unwrap();

    for step in 1..=6 {
        let source = Trickle {
            inner: StrSource::new(text),
            step,
        };
        let tokens: Vec<Token> = analyzer
            .tokenizer(source)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tokens, expected, "step {step}");
    }
}

#[test]
fn test_offsets_are_global_and_contiguous() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MostWords, 4).unwrap();
    let text = "你好世界".repeat(50);
    let tokens = analyzer.analyze(&text).unwrap();

    assert_eq!(tokens.len(), 100);
    let mut expected_start = 0;
    for token in &tokens {
        assert_eq!(token.start, expected_start);
        assert_eq!(token.end, token.start + token.char_len());
        expected_start = token.end;
    }
    assert_eq!(expected_start, 200);
}

#[test]
fn test_long_latin_run_exceeding_window() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MostWords, 4).unwrap();
    let text = "你好abcdefghij世界";
    let tokens = analyzer.analyze(text).unwrap();

    let joined: String = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(joined, text);
    assert_eq!(tokens.first().unwrap().text, "你好");
    assert_eq!(tokens.last().unwrap().text, "世界");
    assert!(tokens.windows(2).all(|pair| pair[0].end == pair[1].start));
}

#[test]
fn test_io_error_after_valid_prefix() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MostWords, 8).unwrap();
    let mut segmenter = analyzer.tokenizer(Utf8Source::new(ChunkedReader::failing("你好世界", 3)));

    let mut emitted = Vec::new();
    let err = loop {
        match segmenter.next_token() {
            Ok(Some(token)) => emitted.push(token.text),
            Ok(None) => panic!("stream ended without reporting the read failure"),
            Err(e) => break e,
        }
    };

    assert_eq!(emitted, vec!["你好", "世界"]);
    match err {
        SegmentError::Io(e) => {
            assert_eq!(e.kind(), io::ErrorKind::TimedOut);
            assert_eq!(e.to_string(), "socket read timed out");
        }
        other => panic!("expected an I/O error, got {other}"),
    }
}

#[test]
fn test_invalid_utf8_is_reported() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MostWords, 8).unwrap();
    let mut bytes = "你好".as_bytes().to_vec();
    bytes.extend_from_slice(&[0xC3, 0x28]);

    let err = analyzer.analyze_reader(io::Cursor::new(bytes)).unwrap_err();
    match err {
        SegmentError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
        other => panic!("expected an I/O error, got {other}"),
    }
}

#[test]
fn test_segmenter_reuse_across_streams() {
    let analyzer = Analyzer::with_dictionary(dictionary(), Mode::MaxWordLength, 5).unwrap();
    let mut segmenter = analyzer.tokenizer(StrSource::new("中华人民共和国"));
    let first: Vec<Token> = segmenter.by_ref().collect::<Result<_, _>>().unwrap();

    for input in ["你好世界", "", "中华人民共和国"] {
        segmenter.reset(StrSource::new(input));
        let tokens: Vec<Token> = segmenter.by_ref().collect::<Result<_, _>>().unwrap();
        assert_eq!(tokens, analyzer.analyze(input).unwrap());
    }

    segmenter.reset(StrSource::new("中华人民共和国"));
    let again: Vec<Token> = segmenter.by_ref().collect::<Result<_, _>>().unwrap();
    assert_eq!(first, again);
}
