use bytes::{BufMut, Bytes, BytesMut};

use crate::data_type::type_name;
use crate::error::Result;
use crate::header::DataElementHeader;
use crate::version::PRESENCE_VERSION_V1;

/// A typed field of an advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataElement {
    /// The data element type.
    pub data_type: u32,
    /// The raw value bytes.
    pub value: Bytes,
}

impl DataElement {
    /// Create a new data element.
    pub fn new(data_type: u32, value: impl Into<Bytes>) -> Self {
        Self {
            data_type,
            value: value.into(),
        }
    }

    /// Header describing this element. Fails if the value exceeds 127 bytes.
    pub fn header(&self) -> Result<DataElementHeader> {
        DataElementHeader::new(PRESENCE_VERSION_V1, self.data_type, self.value.len())
    }

    /// Total wire size: header plus value.
    pub fn wire_size(&self) -> Result<usize> {
        Ok(self.header()?.encoded_len() + self.value.len())
    }

    /// Append header and value to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let header = self.header()?;
        dst.reserve(header.encoded_len() + self.value.len());
        header.encode(dst);
        dst.put_slice(&self.value);
        Ok(())
    }

    /// Encode the element into a standalone buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Human-readable name of the element type.
    pub fn type_name(&self) -> &'static str {
        type_name(self.data_type)
    }
}
