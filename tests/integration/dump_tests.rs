//! End-to-end dump tests.
//!
//! Tests verify:
//! - The text layout for bare TIFF files in both byte orders
//! - JPEG files with an Exif APP1 segment decode at base 12
//! - The Exif sub-directory is followed, or skipped with follow_exif off
//! - Truncated files keep their partial output and report a short read
//! - IFD loops and hostile counts are reported without hanging or allocating

use tiff_metadata::{DecodeOptions, FormatError, IoError, TiffError};

use super::test_utils::{
    dump_text, minimal_tiff, shorts, tiff_with_exif, wrap_in_jpeg, ByteOrderType, IfdBuilder,
    TiffBuilder, TAG_COMPRESSION, TAG_EXIF_IFD, TAG_EXPOSURE_PROGRAM, TAG_IMAGE_LENGTH,
    TAG_IMAGE_WIDTH, TYPE_SHORT,
};

const SCENARIO_A_BODY: &str = "Magic 42
IFD offset 8
number of IFD entries 1

IFD entry 1
\tTag 256 (0100.H) ImageWidth
\tType 3 SHORT
\tCount 1
\tValue 100 pixels

End of IFD list
";

// =============================================================================
// Bare TIFF
// =============================================================================

#[test]
fn test_little_endian_tiff() {
    let data = minimal_tiff(ByteOrderType::LittleEndian);
    assert_eq!(&data[0..2], b"II");

    let (result, text) = dump_text(data, DecodeOptions::default());
    let summary = result.unwrap();

    assert_eq!(summary.primary_ifds, 1);
    assert_eq!(summary.exif_ifds, 0);
    assert_eq!(
        text,
        format!("Intel (little-endian) byte order\n{}", SCENARIO_A_BODY)
    );
}

#[test]
fn test_big_endian_tiff_matches_little_endian() {
    let data = minimal_tiff(ByteOrderType::BigEndian);
    assert_eq!(&data[0..2], b"MM");

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(result.is_ok());
    assert_eq!(
        text,
        format!("Motorola (big-endian) byte order\n{}", SCENARIO_A_BODY)
    );
}

#[test]
fn test_indirect_shorts_and_descriptions() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let data = TiffBuilder::new()
            .with_byte_order(order)
            .add_ifd(
                IfdBuilder::new()
                    .external(258, TYPE_SHORT, 3, shorts(order, &[8, 8, 8]))
                    .short(TAG_COMPRESSION, 5),
            )
            .build();

        let (result, text) = dump_text(data, DecodeOptions::default());
        assert!(result.is_ok());
        // Directory at 8 holds 2 entries, so external data starts at 8 + 30
        assert!(text.contains("\tCount 3\n\tOffset 38\n\t  0 Value 8\n\t  1 Value 8\n\t  2 Value 8\n"));
        assert!(text.contains("\tValue 5 LZW compression\n"));
    }
}

#[test]
fn test_chained_primary_ifds() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(TAG_IMAGE_WIDTH, 100))
        .add_ifd(IfdBuilder::new().short(TAG_IMAGE_WIDTH, 50))
        .build();

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert_eq!(result.unwrap().primary_ifds, 2);
    assert!(text.contains("\nnext IFD offset 26\nnumber of IFD entries 1\n"));
    assert!(text.contains("\tValue 50 pixels\n\nEnd of IFD list\n"));
}

// =============================================================================
// JPEG / Exif
// =============================================================================

#[test]
fn test_jpeg_exif_container() {
    let data = wrap_in_jpeg(&minimal_tiff(ByteOrderType::BigEndian));

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(result.is_ok());
    assert_eq!(
        text,
        format!(
            "JPEG file\nMotorola (big-endian) byte order\n{}",
            SCENARIO_A_BODY
        )
    );
}

#[test]
fn test_jpeg_without_exif_segment() {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(matches!(result, Err(FormatError::MissingExifHeader)));
    assert_eq!(text, "JPEG file\n");
}

#[test]
fn test_exif_subdirectory_is_followed() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let (result, text) = dump_text(tiff_with_exif(order), DecodeOptions::default());
        let summary = result.unwrap();
        assert_eq!(summary.primary_ifds, 1);
        assert_eq!(summary.exif_ifds, 1);

        let (primary, exif) = text.split_once("\nExif header\n").expect("Exif banner");
        assert!(primary.contains("\tOffset 62\n\t  String \"Canon\"\n"));
        assert!(primary.contains("\tTag 34665 (8769.H) ExifIFDPointer\n\tType 4 LONG\n\tCount 1\n\tValue 68 unknown\n"));
        assert!(primary.ends_with("\nEnd of IFD list\n"));

        assert!(exif.starts_with("number of IFD entries 3\n"));
        assert!(exif.contains("\tTag 33434 (829A.H) ExposureTime\n\tType 5 RATIONAL\n\tCount 1\n\tOffset 110\n\t  0 Value (1/250) 0.004000\n"));
        assert!(exif.contains("\tValue 2 Normal program\n"));
        assert!(exif.contains("\tType 7 UNDEFINED\n\tCount 4\n00000000  30 32 33 30 "));
        assert!(exif.ends_with("|0230|\n00000004\n\nEnd of IFD list\n"));
    }
}

#[test]
fn test_nested_exif_pointer_is_not_followed() {
    let mut data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(TAG_IMAGE_WIDTH, 100))
        .with_exif(
            IfdBuilder::new()
                .short(TAG_EXPOSURE_PROGRAM, 2)
                .long(TAG_EXIF_IFD, 68),
        )
        .build();
    // Primary IFD at 8 (2 entries), Exif IFD at 38 (2 entries), then a
    // third directory that only the nested pointer reaches
    assert_eq!(data.len(), 68);
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&TAG_IMAGE_LENGTH.to_le_bytes());
    data.extend_from_slice(&TYPE_SHORT.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&[7, 0, 0, 0]);
    data.extend_from_slice(&0u32.to_le_bytes());

    let (result, text) = dump_text(data, DecodeOptions::default());
    let summary = result.unwrap();
    assert_eq!(summary.primary_ifds, 1);
    assert_eq!(summary.exif_ifds, 1);

    assert_eq!(text.matches("Exif header").count(), 1);
    let (_, exif) = text.split_once("\nExif header\n").expect("Exif banner");
    assert!(exif.contains("\tTag 34665 (8769.H) ExifIFDPointer\n\tType 4 LONG\n\tCount 1\n\tValue 68 unknown\n"));
    assert!(exif.ends_with("\nEnd of IFD list\n"));
    assert!(!text.contains("ImageLength"));
}

#[test]
fn test_exif_in_jpeg() {
    let data = wrap_in_jpeg(&tiff_with_exif(ByteOrderType::LittleEndian));

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert_eq!(result.unwrap().exif_ifds, 1);
    assert!(text.starts_with("JPEG file\nIntel (little-endian) byte order\n"));
    assert!(text.contains("\nExif header\n"));
    assert!(text.contains("0 Value (1/250) 0.004000"));
}

#[test]
fn test_exif_skipped_when_disabled() {
    let options = DecodeOptions { follow_exif: false };
    let (result, text) = dump_text(tiff_with_exif(ByteOrderType::LittleEndian), options);

    assert_eq!(result.unwrap().exif_ifds, 0);
    assert!(text.contains("ExifIFDPointer"));
    assert!(!text.contains("Exif header"));
    assert!(!text.contains("ExposureTime"));
}

// =============================================================================
// Malformed Input
// =============================================================================

#[test]
fn test_truncated_after_entry_count() {
    let mut data = minimal_tiff(ByteOrderType::LittleEndian);
    data.truncate(10);

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(matches!(
        result,
        Err(FormatError::Tiff(TiffError::Io(IoError::ShortRead {
            offset: 10,
            requested: 12,
            available: 0,
        })))
    ));
    assert!(text.ends_with("IFD offset 8\nnumber of IFD entries 1\n"));
    assert!(!text.contains("IFD entry 1"));
}

#[test]
fn test_ifd_loop_is_reported() {
    let mut data = minimal_tiff(ByteOrderType::LittleEndian);
    // Point the next-IFD offset back at the first directory
    let next_pos = data.len() - 4;
    data[next_pos..].copy_from_slice(&8u32.to_le_bytes());

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(matches!(
        result,
        Err(FormatError::Tiff(TiffError::IfdLoop(8)))
    ));
    assert_eq!(text.matches("number of IFD entries").count(), 1);
    assert!(text.ends_with("\nnext IFD offset 8\n"));
}

#[test]
fn test_hostile_count_is_a_short_read() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().inline(TAG_IMAGE_WIDTH, TYPE_SHORT, u32::MAX, [0x40, 0, 0, 0]))
        .build();

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(matches!(
        result,
        Err(FormatError::Tiff(TiffError::Io(IoError::ShortRead { offset: 64, .. })))
    ));
    assert!(text.ends_with("number of IFD entries 1\n"));
}

#[test]
fn test_unknown_tag_and_type_are_not_errors() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().inline(0xC000, 99, 1, [0xAB, 0, 0, 0]))
        .build();

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(result.is_ok());
    assert!(text.contains("\tTag 49152 (C000.H) unknown\n\tType 99 unknown\n\tCount 1\n\tValue 0xab\n"));
}

#[test]
fn test_bad_magic() {
    let mut data = minimal_tiff(ByteOrderType::LittleEndian);
    data[2] = 43;

    let (result, text) = dump_text(data, DecodeOptions::default());
    assert!(matches!(
        result,
        Err(FormatError::Tiff(TiffError::InvalidMagic(43)))
    ));
    assert!(text.is_empty());
}
