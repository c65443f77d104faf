/*!
 * Bilingual memoQ XLIFF handling.
 *
 * Submodules cover the full document lifecycle: event-level parsing and
 * serialization, the analyzed segment view, the inline element catalogue,
 * target reconstruction from translated text, and lossless write-back.
 */

pub mod events;
pub mod fragment;
pub mod inline;
pub mod reader;
pub mod reconstruct;
pub mod writer;

pub use events::XmlEvent;
pub use fragment::{ChildElement, Fragment};
pub use inline::{InlineElement, InlineElementMap, InlineTagKind};
pub use reader::{SegmentUnit, XliffDocument};
pub use reconstruct::rebuild;
pub use writer::{update_document, write_file};
