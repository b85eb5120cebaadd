use crate::{Image, ImageError};

use std::path::Path;

#[test]
fn words_are_big_endian() {
    let image = Image::from_bytes(&[0xd0, 0x00, 0x00, 0x41, 0x70, 0x00, 0x00, 0x00]).unwrap();
    assert_eq!(image.word_len(), 2);
    assert_eq!(image.into_words(), vec![0xd000_0041, 0x7000_0000]);
}

#[test]
fn misaligned_size_rejected() {
    assert!(matches!(
        Image::from_bytes(&[0; 5]),
        Err(ImageError::InvalidSize(5))
    ));
}

#[test]
fn missing_file_reported() {
    let result = Image::from_file(Path::new("no-such-image.um"));
    assert!(matches!(result, Err(ImageError::IoError(..))));
}
