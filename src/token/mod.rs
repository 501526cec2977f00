//! Continuation token subsystem
//!
//! A token is an opaque, transport-safe string carrying the sort-key values
//! of the last row a caller saw. It holds no server-side state.
//!
//! # Wire format
//!
//! `base64url_nopad(json({"v": 1, "k": {field: tagged_value}}))`
//!
//! Tagged values keep their exact type across the round trip: integers stay
//! integers, floats stay floats (NaN and infinities included), ids and
//! timestamps keep their type instead of degrading to strings.
//!
//! # Failure policy
//!
//! Decoding is fail-open. A token that cannot be decoded means
//! "no prior position" and the caller gets the first page.

mod codec;
mod errors;
mod position;

pub use codec::{TokenCodec, DEFAULT_MAX_TOKEN_LEN, TOKEN_VERSION};
pub use errors::{TokenError, TokenResult};
pub use position::SeekPosition;
