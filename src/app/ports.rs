use crate::error::Result;
use crate::pipeline::migration::OutputDocument;
use crate::types::InputDocument;

/// Where the cooperative directory comes from
pub trait DocumentSourcePort {
    fn load(&self) -> Result<InputDocument>;

    /// Human-readable location for console output
    fn describe(&self) -> String;
}

/// Where the migrated document goes. Implementations must not leave a
/// partially written document behind on failure.
pub trait DocumentSinkPort {
    /// Persist the document, returning the number of bytes written
    fn write(&self, document: &OutputDocument) -> Result<usize>;

    fn describe(&self) -> String;
}
