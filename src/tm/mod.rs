/*!
 * Reuse memory (translation memory).
 *
 * An append-mostly collection of previously translated source/target pairs,
 * scored against new segments to decide between exact reuse, revision of an
 * existing translation, and full translation:
 *
 * - `fuzzy`: edit-distance similarity scoring and match selection
 * - `store`: shared, lock-guarded memory extended by every translated segment
 * - `tmx`: loader for TMX reuse-memory files
 */

pub use self::fuzzy::{DEFAULT_FUZZY_THRESHOLD, FuzzyMatcher, MatchDecision, TmMatch};
pub use self::store::{TmEntry, TmStore};
pub use self::tmx::load_tmx;

pub mod fuzzy;
pub mod store;
pub mod tmx;
