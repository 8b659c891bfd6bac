use crate::section::MAX_SECTION_LENGTH;

/// Controls how strictly the parser treats the section framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// When true, the section-length byte must equal the number of bytes that
    /// follow it. When false it is only logged.
    pub enforce_section_length: bool,
    /// Maximum number of decrypted inner data elements accepted per section.
    /// The default of [`MAX_SECTION_LENGTH`] never binds for a section that
    /// fits the length byte; lower it to reject element-dense sections.
    pub max_inner_elements: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            enforce_section_length: true,
            max_inner_elements: MAX_SECTION_LENGTH,
        }
    }
}

impl ParserConfig {
    /// Config that treats the section-length byte as advisory.
    pub fn advisory() -> Self {
        Self {
            enforce_section_length: false,
            ..Self::default()
        }
    }
}
