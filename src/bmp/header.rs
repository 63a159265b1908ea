//! BMP header layout: field offsets, probing and the 54-byte header writer.

use crate::error::BitmapError;

/// Size of the `BITMAPFILEHEADER`.
pub(crate) const FILE_HEADER_SIZE: u32 = 14;
/// Size of the `BITMAPINFOHEADER` written on encode.
pub(crate) const INFO_HEADER_SIZE: u32 = 40;
/// Pixel array offset of every file this crate writes.
pub(crate) const PIXEL_ARRAY_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 2835 pixels/metre, about 72 DPI.
pub(crate) const RESOLUTION_PPM: i32 = 2835;

// Field offsets from the start of the file.
const OFF_FILE_SIZE: usize = 2;
const OFF_DATA_OFFSET: usize = 10;
const OFF_INFO_SIZE: usize = 14;
const OFF_WIDTH: usize = 18;
const OFF_HEIGHT: usize = 22;
const OFF_PLANES: usize = 26;
const OFF_BPP: usize = 28;
const OFF_COMPRESSION: usize = 30;

/// Header fields needed to locate and validate the pixel array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    /// File size as declared at offset 2.
    pub file_size: u32,
    /// Start of the pixel array (offset 10).
    pub data_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
}

impl BmpInfo {
    /// Bytes per stored pixel (`bits_per_pixel / 8`).
    pub fn bytes_per_pixel(&self) -> u64 {
        u64::from(self.bits_per_pixel / 8)
    }

    /// Pixel bytes per row, before padding.
    pub fn bytes_per_row(&self) -> u64 {
        u64::from(self.width) * self.bytes_per_pixel()
    }

    /// Zero bytes appended to each row to reach a multiple of 4.
    pub fn padding(&self) -> u64 {
        row_padding(self.bytes_per_row())
    }

    /// Row length on disk, padding included.
    pub fn stride(&self) -> u64 {
        self.bytes_per_row() + self.padding()
    }

    /// File size implied by the data offset, stride and height.
    ///
    /// `None` when the product does not fit in a `u64`; no such header can
    /// describe a real file.
    pub fn expected_file_size(&self) -> Option<u64> {
        self.stride()
            .checked_mul(u64::from(self.height))?
            .checked_add(u64::from(self.data_offset))
    }

    /// Whether the declared file size matches [`Self::expected_file_size`].
    pub fn is_consistent(&self) -> bool {
        self.expected_file_size() == Some(u64::from(self.file_size))
    }
}

/// Padding that brings `bytes_per_row` up to a multiple of 4.
pub fn row_padding(bytes_per_row: u64) -> u64 {
    (4 - bytes_per_row % 4) % 4
}

/// Read an unsigned little-endian field of `N` bytes at `offset`.
fn read_le<const N: usize>(data: &[u8], offset: usize) -> Result<u32, BitmapError> {
    let bytes = data
        .get(offset..offset + N)
        .ok_or(BitmapError::UnexpectedEof)?;
    Ok(bytes
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
}

/// Parse the fields [`BmpInfo`] carries. No consistency checks.
pub(crate) fn parse(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    Ok(BmpInfo {
        file_size: read_le::<4>(data, OFF_FILE_SIZE)?,
        data_offset: read_le::<4>(data, OFF_DATA_OFFSET)?,
        width: read_le::<4>(data, OFF_WIDTH)?,
        height: read_le::<4>(data, OFF_HEIGHT)?,
        bits_per_pixel: read_le::<2>(data, OFF_BPP)? as u16,
    })
}

/// Checks only applied in strict mode: signature, info header size,
/// planes and compression.
pub(crate) fn check_strict(data: &[u8]) -> Result<(), BitmapError> {
    if data.get(0..2) != Some(b"BM".as_slice()) {
        return Err(BitmapError::UnrecognizedFormat);
    }
    let info_size = read_le::<4>(data, OFF_INFO_SIZE)?;
    if info_size < INFO_HEADER_SIZE {
        return Err(BitmapError::InvalidHeader(format!(
            "info header size {info_size} is smaller than {INFO_HEADER_SIZE}"
        )));
    }
    let planes = read_le::<2>(data, OFF_PLANES)?;
    if planes != 1 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP planes field is {planes}, expected 1"
        )));
    }
    let compression = read_le::<4>(data, OFF_COMPRESSION)?;
    if compression != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "BMP compression {compression} unsupported, only uncompressed RGB"
        )));
    }
    Ok(())
}

/// Append the 14-byte file header and 40-byte info header for a
/// bottom-up 24-bit image.
pub(crate) fn write(out: &mut Vec<u8>, file_size: u32, pixel_data_size: u32, width: i32, height: i32) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&PIXEL_ARRAY_OFFSET.to_le_bytes());

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes());
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
