//! Profile management
//!
//! Profiles are named, independent configuration contexts (e.g. "work",
//! "personal") stored in the `profiles` array of the config document. One
//! of them may be active at a time.
//!
//! Every name a user types goes through [`clean_name`] before it is stored
//! or looked up, so `"Work"`, `" work "` and `"WORK"` all address the same
//! profile.
//!
//! # Example
//!
//! ```rust,no_run
//! use projecttools::ConfigStore;
//!
//! # fn example() -> projecttools::Result<()> {
//! let store = ConfigStore::at_default_location()?;
//! let profiles = store.profiles();
//!
//! let added = profiles.add("Work")?;
//! assert_eq!(added.profile.name, "work");
//!
//! profiles.add("home")?;
//! profiles.switch("home")?;
//!
//! let removed = profiles.remove("home")?;
//! assert_eq!(removed.active_profile.as_deref(), Some("work"));
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! Removing a profile does not touch workspaces or projects that may refer
//! to it.

mod manager;
mod types;

use std::sync::LazyLock;

use rand::Rng;
use regex::{Captures, Regex};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::config::Profile;
use crate::error::{Error, Result};

pub use manager::ProfileManager;
pub use types::{AddedProfile, ProfileEntry, RemovedProfile, SwitchedProfile};

/// Prefix of generated profile ids
pub const PROFILE_ID_PREFIX: &str = "prof";

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_-]").expect("static regex is valid"));

/// Normalize a profile name into its storage key
///
/// Trims surrounding whitespace, lowercases, and replaces every character
/// outside `[a-z0-9_-]` with `-`. Characters outside the Basic Multilingual
/// Plane become `--`, one per UTF-16 code unit, so names match those written
/// by the JavaScript `pt`. The result is a fixed point:
/// `clean_name(&clean_name(n)) == clean_name(n)`.
///
/// ```rust
/// use projecttools::profiles::clean_name;
///
/// assert_eq!(clean_name("  Work "), "work");
/// assert_eq!(clean_name("My Project!"), "my-project-");
/// ```
pub fn clean_name(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    DISALLOWED
        .replace_all(&lowered, |caps: &Captures<'_>| {
            "-".repeat(caps[0].chars().map(char::len_utf16).sum())
        })
        .into_owned()
}

/// Reject blank input, then normalize it
pub(crate) fn require_name(input: &str) -> Result<String> {
    if input.trim().is_empty() {
        return Err(Error::EmptyProfileName);
    }
    Ok(clean_name(input))
}

/// Build a new profile stamped with the current time
pub(crate) fn new_profile(name: &str) -> Result<Profile> {
    let now = OffsetDateTime::now_utc();
    Ok(Profile {
        id: generate_id(PROFILE_ID_PREFIX, now),
        name: name.to_string(),
        created: iso_timestamp(now)?,
        extra: serde_json::Map::new(),
    })
}

/// `<prefix>_<unix millis>_<random base36>`
fn generate_id(prefix: &str, now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

/// UTC timestamp with millisecond precision, e.g. `2024-05-01T10:20:30.123Z`
fn iso_timestamp(now: OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    now.format(&format)
        .map_err(|e| Error::Config(format!("Failed to format timestamp: {e}")))
}
