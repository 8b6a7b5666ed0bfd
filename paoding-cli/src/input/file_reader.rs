//! File reading with charset decoding

use anyhow::{Context, Result};
use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use paoding_core::{CharSource, Utf8Source};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::CliError;

/// Character source handed to a segmenter
pub type BoxedSource = Box<dyn CharSource + Send>;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const DECODE_CHUNK: usize = 8 * 1024;

/// Opens inputs as character sources
pub struct FileReader;

impl FileReader {
    /// Resolve an encoding label; no label means UTF-8
    pub fn encoding(label: Option<&str>) -> Result<&'static Encoding> {
        match label {
            None => Ok(UTF_8),
            Some(label) => Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| CliError::UnknownEncoding(label.to_string()).into()),
        }
    }

    /// Open a file for segmentation
    pub fn open(path: &Path, encoding: &'static Encoding) -> Result<BoxedSource> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_reader(file, encoding)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Wrap any byte reader.
    ///
    /// Input is decoded chunk by chunk in every encoding. A leading UTF-8
    /// byte order mark is dropped.
    pub fn from_reader<R: Read + Send + 'static>(
        reader: R,
        encoding: &'static Encoding,
    ) -> io::Result<BoxedSource> {
        let mut reader = BufReader::new(reader);
        if encoding == UTF_8 {
            if reader.fill_buf()?.starts_with(UTF8_BOM) {
                reader.consume(UTF8_BOM.len());
            }
            return Ok(Box::new(Utf8Source::new(reader)));
        }
        Ok(Box::new(DecodingSource::new(reader, encoding)))
    }
}

/// Streams a legacy-charset reader through an `encoding_rs` decoder.
///
/// Malformed sequences become U+FFFD and are reported once at end of input.
struct DecodingSource<R> {
    reader: R,
    decoder: Decoder,
    bytes: Box<[u8]>,
    text: String,
    /// Byte position in `text` of the next character to hand out
    next: usize,
    had_errors: bool,
    finished: bool,
}

impl<R: Read> DecodingSource<R> {
    fn new(reader: R, encoding: &'static Encoding) -> Self {
        Self {
            reader,
            decoder: encoding.new_decoder(),
            bytes: vec![0; DECODE_CHUNK].into_boxed_slice(),
            text: String::new(),
            next: 0,
            had_errors: false,
            finished: false,
        }
    }

    fn refill(&mut self) -> io::Result<()> {
        let read = self.reader.read(&mut self.bytes)?;
        let last = read == 0;

        self.text.clear();
        self.next = 0;
        let mut input = &self.bytes[..read];
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(input.len())
                .unwrap_or(input.len() * 3 + 16);
            self.text.reserve(needed);
            let (result, consumed, errors) = self.decoder.decode_to_string(input, &mut self.text, last);
            self.had_errors |= errors;
            input = &input[consumed..];
            if let CoderResult::InputEmpty = result {
                break;
            }
        }

        if last {
            self.finished = true;
            if self.had_errors {
                log::warn!(
                    "input is not valid {}; malformed sequences were replaced",
                    self.decoder.encoding().name()
                );
            }
        }
        Ok(())
    }
}

impl<R: Read> CharSource for DecodingSource<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.next < self.text.len() {
                let mut count = 0;
                for (slot, ch) in buf.iter_mut().zip(self.text[self.next..].chars()) {
                    *slot = ch;
                    self.next += ch.len_utf8();
                    count += 1;
                }
                return Ok(count);
            }
            if self.finished {
                return Ok(0);
            }
            self.refill()?;
        }
    }
}
