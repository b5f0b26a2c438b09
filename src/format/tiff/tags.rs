//! TIFF field types, tag names and value descriptions.
//!
//! This module is the vocabulary of the dump:
//! - Field types determine how values are encoded and how wide they are
//! - Tag names and value descriptions are read-only lookup tables
//!
//! Every lookup is total: unknown codes produce a sentinel instead of an error.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF 6.0 field types.
///
/// Each known field type has a fixed per-element size, which is what decides
/// whether an entry's payload fits inline in the 4-byte value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte,
    /// 8-bit ASCII character, NUL terminated runs
    Ascii,
    /// Unsigned 16-bit integer
    Short,
    /// Unsigned 32-bit integer
    Long,
    /// Two LONGs: numerator and denominator
    Rational,
    /// Signed 8-bit integer
    SByte,
    /// Opaque byte
    Undefined,
    /// Signed 16-bit integer
    SShort,
    /// Signed 32-bit integer
    SLong,
    /// Two SLONGs: numerator and denominator
    SRational,
    /// IEEE-754 single precision
    Float,
    /// IEEE-754 double precision
    Double,
    /// Any code outside 1..=12
    Unknown(u16),
}

impl FieldType {
    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Create a FieldType from its numeric code. Total over all codes.
    pub const fn from_u16(value: u16) -> Self {
        match value {
            1 => FieldType::Byte,
            2 => FieldType::Ascii,
            3 => FieldType::Short,
            4 => FieldType::Long,
            5 => FieldType::Rational,
            6 => FieldType::SByte,
            7 => FieldType::Undefined,
            8 => FieldType::SShort,
            9 => FieldType::SLong,
            10 => FieldType::SRational,
            11 => FieldType::Float,
            12 => FieldType::Double,
            other => FieldType::Unknown(other),
        }
    }

    /// The numeric code of this type.
    pub const fn as_u16(self) -> u16 {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 2,
            FieldType::Short => 3,
            FieldType::Long => 4,
            FieldType::Rational => 5,
            FieldType::SByte => 6,
            FieldType::Undefined => 7,
            FieldType::SShort => 8,
            FieldType::SLong => 9,
            FieldType::SRational => 10,
            FieldType::Float => 11,
            FieldType::Double => 12,
            FieldType::Unknown(code) => code,
        }
    }

    /// Size of a single value of this type in bytes. 0 for unknown types.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
            FieldType::Unknown(_) => 0,
        }
    }

    /// Canonical TIFF name of the type, or "unknown".
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Unknown(_) => "unknown",
        }
    }

    /// Check if `count` values of this type fit in the 4-byte value slot.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.size_in_bytes() as u64 * u64::from(count) <= Self::INLINE_THRESHOLD
    }
}

// =============================================================================
// Tags
// =============================================================================

/// ExifIFDPointer: a LONG whose value is the offset of the Exif sub-IFD.
pub const TAG_EXIF_IFD_POINTER: u16 = 0x8769;

/// Tag names, sorted by tag number.
static TAG_NAMES: &[(u16, &str)] = &[
    (254, "NewSubfileType"),
    (255, "SubfileType"),
    (256, "ImageWidth"),
    (257, "ImageLength"),
    (258, "BitsPerSample"),
    (259, "Compression"),
    (262, "PhotometricInterpretation"),
    (263, "Threshholding"),
    (264, "CellWidth"),
    (265, "CellLength"),
    (266, "FillOrder"),
    (269, "DocumentName"),
    (270, "ImageDescription"),
    (271, "Make"),
    (272, "Model"),
    (273, "StripOffsets"),
    (274, "Orientation"),
    (277, "SamplesPerPixel"),
    (278, "RowsPerStrip"),
    (279, "StripByteCounts"),
    (280, "MinSampleValue"),
    (281, "MaxSampleValue"),
    (282, "XResolution"),
    (283, "YResolution"),
    (284, "PlanarConfiguration"),
    (286, "XPosition"),
    (287, "YPosition"),
    (288, "FreeOffsets"),
    (289, "FreeByteCounts"),
    (290, "GrayResponseUnit"),
    (291, "GrayResponseCurve"),
    (292, "T4Options"),
    (293, "T6Options"),
    (296, "ResolutionUnit"),
    (297, "PageNumber"),
    (301, "TransferFunction"),
    (305, "Software"),
    (306, "DateTime"),
    (315, "Artist"),
    (316, "HostComputer"),
    (317, "Predictor"),
    (318, "WhitePoint"),
    (319, "PrimaryChromaticities"),
    (320, "ColorMap"),
    (321, "HalftoneHints"),
    (322, "TileWidth"),
    (323, "TileHeight"),
    (324, "TileOffsets"),
    (325, "TileByteCounts"),
    (332, "InkSet"),
    (333, "InkNames"),
    (334, "NumberOfInks"),
    (336, "DotRange"),
    (337, "TargetPrinter"),
    (338, "ExtraSamples"),
    (339, "SampleFormat"),
    (340, "SMinSampleValue"),
    (341, "SMaxSampleValue"),
    (342, "TransferRange"),
    (512, "JPEGProc"),
    (513, "JPEGInterchangeFormat"),
    (514, "JPEGInterchangeFormatLength"),
    (515, "JPEGRestartInterval"),
    (517, "JPEGLosslessPredictors"),
    (518, "JPEGPointTransforms"),
    (519, "JPEGQTables"),
    (520, "JPEGDCTables"),
    (521, "JPEGACTables"),
    (529, "YCbCrCoefficients"),
    (530, "YCbCrSubSampling"),
    (531, "YCbCrPositioning"),
    (532, "ReferenceBlackWhite"),
    (33434, "ExposureTime"),
    (33437, "FNumber"),
    (34665, "ExifIFDPointer"),
    (34850, "ExposureProgram"),
    (34852, "SpectralSensitivity"),
    (34855, "ISOSpeedRatings"),
    (34856, "OECF"),
    (36864, "ExifVersion"),
    (36867, "DateTimeOriginal"),
    (36868, "DateTimeDigitized"),
    (37121, "ComponentsConfiguration"),
    (37122, "CompressedBitsPerPixel"),
    (37377, "ShutterSpeedValue"),
    (37378, "ApertureValue"),
    (37379, "BrightnessValue"),
    (37380, "ExposureBiasValue"),
    (37381, "MaxApertureValue"),
    (37382, "SubjectDistance"),
    (37383, "MeteringMode"),
    (37384, "LightSource"),
    (37385, "Flash"),
    (37386, "FocalLength"),
    (37500, "MakerNote"),
    (37510, "UserComment"),
    (37520, "SubSecTime"),
    (37521, "SubSecTimeOriginal"),
    (37522, "SubSecTimeDigitized"),
    (40960, "FlashpixVersion"),
    (40961, "ColorSpace"),
    (40962, "PixelXDimension"),
    (40963, "PixelYDimension"),
    (40964, "RelatedSoundFile"),
    (41483, "FlashEnergy"),
    (41484, "SpatialFrequencyResponse"),
    (41486, "FocalPlaneXResolution"),
    (41487, "FocalPlaneYResolution"),
    (41488, "FocalPlaneResolutionUnit"),
    (41492, "SubjectLocation"),
    (41493, "ExposureIndex"),
    (41495, "SensingMethod"),
    (41728, "FileSource"),
    (41729, "SceneType"),
    (41730, "CFAPattern"),
    (41985, "CustomRendered"),
    (41986, "ExposureMode"),
    (41987, "WhiteBalance"),
    (41988, "DigitalZoomRatio"),
    (41989, "FocalLengthIn35mmFilm"),
    (41990, "SceneCaptureType"),
    (41991, "GainControl"),
    (42016, "ImageUniqueID"),
];

/// Human name of a tag, or "unknown".
pub fn tag_name(tag: u16) -> &'static str {
    TAG_NAMES
        .binary_search_by_key(&tag, |&(number, _)| number)
        .map(|index| TAG_NAMES[index].1)
        .unwrap_or("unknown")
}

// =============================================================================
// Value Descriptions
// =============================================================================

/// Human description of a decoded value for a given tag.
///
/// Tags without a table give "unknown". Tags with a table, or with a unit
/// that does not depend on the value, give "" when the value has no entry.
pub fn value_description(tag: u16, value: u32) -> &'static str {
    match tag {
        // ImageWidth, ImageLength
        256 | 257 => "pixels",
        // NewSubfileType, BitsPerSample, StripOffsets, SamplesPerPixel,
        // RowsPerStrip, StripByteCounts, Software
        254 | 258 | 273 | 277 | 278 | 279 | 305 => "",
        // Compression
        259 => match value {
            1 => "No compression",
            2 => "CCITT Group 3 compression",
            5 => "LZW compression",
            32773 => "PackBits compression",
            _ => "",
        },
        // PhotometricInterpretation
        262 => match value {
            0 => "WhiteIsZero",
            1 => "BlackIsZero",
            2 => "RGB",
            3 => "Palette color",
            4 => "Transparency mask",
            _ => "",
        },
        // Orientation
        274 => match value {
            1 => "Row0:top,Col0:left",
            2 => "Row0:top,Col0:right",
            3 => "Row0:bottom,Col0:right",
            4 => "Row0:bottom,Col0:left",
            5 => "Row0:left,Col0:top",
            6 => "Row0:right,Col0:top",
            7 => "Row0:right,Col0:bottom",
            8 => "Row0:left,Col0:bottom",
            _ => "",
        },
        // PlanarConfiguration
        284 => match value {
            1 => "Chunky",
            2 => "Planar",
            _ => "",
        },
        // ResolutionUnit, FocalPlaneResolutionUnit
        296 | 41488 => match value {
            1 => "No absolute unit",
            2 => "Inch",
            3 => "Centimeter",
            _ => "",
        },
        // Predictor
        317 => match value {
            1 => "No prediction scheme",
            2 => "Horizontal differencing",
            _ => "",
        },
        // SampleFormat
        339 => match value {
            1 => "Unsigned integer data",
            2 => "Two's complement signed integer data",
            3 => "IEEE floating point data",
            4 => "Undefined data format",
            _ => "",
        },
        // ExposureTime
        33434 => "seconds",
        // ExposureProgram
        34850 => match value {
            0 => "Not defined",
            1 => "Manual",
            2 => "Normal program",
            3 => "Aperture priority",
            4 => "Shutter priority",
            5 => "Creative program",
            6 => "Action program",
            7 => "Portrait mode",
            8 => "Landscape mode",
            _ => "",
        },
        _ => "unknown",
    }
}

// =============================================================================
// Tests
// =============================================================================
