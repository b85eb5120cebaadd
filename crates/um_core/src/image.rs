//! Loading of Universal Machine program images.

use thiserror::Error;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Size of a machine word in the image file.
const WORD_SIZE: usize = 4;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to load program image: {0}")]
    IoError(#[from] io::Error),

    #[error("byte length must be a multiple of 4, is {0}")]
    InvalidSize(usize),
}

/// A program image: the initial contents of segment 0.
pub struct Image {
    words: Vec<u32>,
}

impl Image {
    /// Load and validate an image file.
    pub fn from_file(path: &Path) -> Result<Self, ImageError> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();

        file.read_to_end(&mut data)?;

        Self::from_bytes(&data)
    }

    /// Build an image from the raw bytes of an image file.
    ///
    /// The file stores words big endian regardless of host endianness; the
    /// byte order is fixed here, exactly once.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.len() % WORD_SIZE != 0 {
            return Err(ImageError::InvalidSize(data.len()));
        }

        let words = bytemuck::pod_collect_to_vec::<u8, u32>(data)
            .into_iter()
            .map(u32::from_be)
            .collect();

        Ok(Self { words })
    }

    /// Build an image from words already in host order.
    pub fn from_words(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Number of instruction words in the image.
    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    pub(crate) fn into_words(self) -> Vec<u32> {
        self.words
    }
}
