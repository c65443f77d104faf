/*!
 * Inline tag protection.
 *
 * Segment text leaves the core for an external translation engine; inline
 * markup must survive that trip unchanged. This module hides recognized
 * markup behind opaque placeholders before the text leaves and puts it back
 * afterwards:
 *
 * - `codec`: reversible extraction/restoration of inline markup
 * - `discrepancy`: diff and repair of tag sets after translation
 */

pub use self::codec::{TagCodec, TagDictionary};
pub use self::discrepancy::{DiscrepancySet, diff, strip};

pub mod codec;
pub mod discrepancy;
