//! causematch-inspect — stateless value inspectors for causematch assertions.
//!
//! - [`match_len`] / [`match_cap`] — length and capacity
//! - [`at_index`] / [`at_every`] / [`at_key`] — elements of slices and maps
//! - [`match_field`] — one field of a serializable struct
//! - [`panic_with`] — the message a closure panics with
//! - [`not_error`] — `Result::Ok`
//! - [`have_header`] / [`have_response_code`] / [`have_json_body`] — a
//!   recorded HTTP response
//! - [`EnvVars`] / [`temp_dir`] — scoped test fixtures
//!
//! ```rust
//! use causematch_core::{equal, expect, have_prefix};
//! use causematch_inspect::{at_every, match_len};
//!
//! let names = vec!["foo", "foobar"];
//! expect(&names).to(match_len(equal(2_usize)));
//! expect(&names).to(at_every(have_prefix("foo")));
//! ```

pub mod collection;
pub mod field;
pub mod fixture;
pub mod len;
pub mod panics;
pub mod response;
pub mod result;

pub use collection::{at_every, at_index, at_key, AtEvery, AtIndex, AtKey};
pub use field::{match_field, MatchField};
pub use fixture::{temp_dir, EnvVars};
pub use len::{match_cap, match_len, HasCapacity, HasLen, MatchCap, MatchLen};
pub use panics::{panic_with, PanicWith};
pub use response::{
    have_header, have_json_body, have_response_code, HaveHeader, HaveJsonBody, HaveResponseCode,
    RecorderError, ResponseRecorder,
};
pub use result::{not_error, NotError};
