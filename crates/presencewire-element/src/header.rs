use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{ElementError, Result};
use crate::version::PRESENCE_VERSION_V1;

/// Largest value length a header can describe (7-bit length field).
pub const MAX_DATA_LENGTH: usize = 127;

/// MSB of every header byte: set when another header byte follows.
const TAG_BITMASK: u8 = 0b1000_0000;

// Single-byte form: 0b0LLL_TTTT.
const SINGLE_LENGTH_BITMASK: u8 = 0b0111_0000;
const SINGLE_LENGTH_OFFSET: u32 = 4;
const SINGLE_TYPE_BITMASK: u8 = 0b0000_1111;
const SINGLE_MAX_TYPE: u32 = 1 << 4;
const SINGLE_MAX_LENGTH: u8 = 1 << 3;

// Multi-byte form: 0b1LLL_LLLL, then 7-bit type groups, big-endian.
const MULTIPLE_BITMASK: u8 = 0b0111_1111;
const TYPE_GROUP_BITS: u32 = 7;

/// A `u32` type needs at most five 7-bit groups.
const MAX_TYPE_BYTES: usize = 5;

/// Header of a single data element.
///
/// Wire format:
/// ```text
/// single byte (type < 16, length < 8):
/// ┌───┬────────┬──────────┐
/// │ 0 │ length │ type     │
/// │ 1b│ 3b     │ 4b       │
/// └───┴────────┴──────────┘
///
/// multi-byte (otherwise):
/// ┌───┬──────────┐ ┌───┬─────────┐     ┌───┬─────────┐
/// │ 1 │ length   │ │ 1 │ type hi │ ... │ 0 │ type lo │
/// │ 1b│ 7b       │ │ 1b│ 7b      │     │ 1b│ 7b      │
/// └───┴──────────┘ └───┴─────────┘     └───┴─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataElementHeader {
    data_type: u32,
    length: u8,
    version: u8,
}

impl DataElementHeader {
    /// Create a header for a value of `length` bytes.
    pub fn new(version: u8, data_type: u32, length: usize) -> Result<Self> {
        if version != PRESENCE_VERSION_V1 {
            return Err(ElementError::UnsupportedVersion(version));
        }
        if length > MAX_DATA_LENGTH {
            return Err(ElementError::LengthOutOfRange { length });
        }
        Ok(Self {
            data_type,
            length: length as u8,
            version,
        })
    }

    /// The data element type.
    pub fn data_type(&self) -> u32 {
        self.data_type
    }

    /// Length of the value that follows the header.
    pub fn length(&self) -> usize {
        usize::from(self.length)
    }

    /// Advertisement version this header was built for.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// True when the header fits the single-byte form.
    pub fn is_single_byte(&self) -> bool {
        self.data_type < SINGLE_MAX_TYPE && self.length < SINGLE_MAX_LENGTH
    }

    /// Number of bytes the encoded header occupies.
    pub fn encoded_len(&self) -> usize {
        if self.is_single_byte() {
            return 1;
        }
        1 + type_group_count(self.data_type)
    }

    /// Append the encoded header to `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        if self.is_single_byte() {
            dst.put_u8(
                ((self.length << SINGLE_LENGTH_OFFSET) & SINGLE_LENGTH_BITMASK)
                    | (self.data_type as u8 & SINGLE_TYPE_BITMASK),
            );
            return;
        }

        dst.put_u8(TAG_BITMASK | (self.length & MULTIPLE_BITMASK));
        let groups = type_group_count(self.data_type);
        for index in (0..groups).rev() {
            let group = ((self.data_type >> (index as u32 * TYPE_GROUP_BITS)) as u8)
                & MULTIPLE_BITMASK;
            if index == 0 {
                dst.put_u8(group);
            } else {
                dst.put_u8(group | TAG_BITMASK);
            }
        }
    }

    /// Encode the header into a standalone buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Decode a header from the start of `src`.
    ///
    /// Returns the header and the number of bytes it occupied. Bytes after the
    /// header are not inspected.
    pub fn decode(src: &[u8]) -> Result<(Self, usize)> {
        let first = *src.first().ok_or(ElementError::Truncated {
            needed: 1,
            remaining: 0,
        })?;

        if first & TAG_BITMASK == 0 {
            let header = Self {
                data_type: u32::from(first & SINGLE_TYPE_BITMASK),
                length: (first & SINGLE_LENGTH_BITMASK) >> SINGLE_LENGTH_OFFSET,
                version: PRESENCE_VERSION_V1,
            };
            return Ok((header, 1));
        }

        let length = first & MULTIPLE_BITMASK;
        let mut data_type: u32 = 0;
        for (index, &byte) in src[1..].iter().enumerate() {
            if index == MAX_TYPE_BYTES || data_type > (u32::MAX >> TYPE_GROUP_BITS) {
                tracing::trace!(index, "data element type overflows u32");
                return Err(ElementError::MalformedHeader);
            }
            data_type = (data_type << TYPE_GROUP_BITS) | u32::from(byte & MULTIPLE_BITMASK);
            if byte & TAG_BITMASK == 0 {
                let header = Self {
                    data_type,
                    length,
                    version: PRESENCE_VERSION_V1,
                };
                return Ok((header, index + 2));
            }
        }

        tracing::trace!(len = src.len(), "header continuation runs past end of input");
        Err(ElementError::MalformedHeader)
    }
}

/// Encode a `(type, length)` pair, choosing the single-byte form when both fit.
pub fn encode_header(data_type: u32, length: usize) -> Result<Bytes> {
    Ok(DataElementHeader::new(PRESENCE_VERSION_V1, data_type, length)?.to_bytes())
}

/// Decode the header starting at `offset` into `src`.
///
/// Returns `(type, length, bytes_consumed)`.
pub fn decode_header(src: &[u8], offset: usize) -> Result<(u32, usize, usize)> {
    // `needed` counts from the start of `src`: the offset plus one header byte.
    let tail = src
        .get(offset..)
        .filter(|tail| !tail.is_empty())
        .ok_or(ElementError::Truncated {
            needed: offset.saturating_add(1),
            remaining: src.len(),
        })?;
    let (header, consumed) = DataElementHeader::decode(tail)?;
    Ok((header.data_type(), header.length(), consumed))
}

/// Number of 7-bit groups needed for `data_type`. Zero still takes one group.
fn type_group_count(data_type: u32) -> usize {
    let significant_bits = u32::BITS - data_type.leading_zeros();
    significant_bits.div_ceil(TYPE_GROUP_BITS).max(1) as usize
}
