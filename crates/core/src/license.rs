//! Listed-license registry collaborator
//!
//! The identifier classifier needs to ask "is this string a known listed
//! license short id?". That question is answered by an external registry;
//! this module defines the seam and ships a built-in table of well-known
//! ids so the classifier is usable standalone and in tests.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Registry of listed license short identifiers
///
/// Implementations may be backed by a static table, a data file, or a
/// remote registry snapshot. Lookups must be cheap; the classifier calls
/// this on every identifier it sees.
pub trait LicenseCatalog: Send + Sync {
    /// Check whether `id` is a known listed-license short identifier
    fn is_listed_license_id(&self, id: &str) -> bool;
}

/// Short identifiers of widely used listed licenses
///
/// A pragmatic subset of the public registry, enough for classification of
/// common documents without any I/O.
static LISTED_LICENSE_IDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "0BSD",
        "AGPL-3.0-only",
        "AGPL-3.0-or-later",
        "Apache-1.1",
        "Apache-2.0",
        "Artistic-2.0",
        "BSD-2-Clause",
        "BSD-3-Clause",
        "BSD-4-Clause",
        "BSL-1.0",
        "CC-BY-4.0",
        "CC-BY-SA-4.0",
        "CC0-1.0",
        "CDDL-1.0",
        "EPL-1.0",
        "EPL-2.0",
        "EUPL-1.2",
        "GPL-2.0-only",
        "GPL-2.0-or-later",
        "GPL-3.0-only",
        "GPL-3.0-or-later",
        "ISC",
        "LGPL-2.1-only",
        "LGPL-2.1-or-later",
        "LGPL-3.0-only",
        "LGPL-3.0-or-later",
        "MIT",
        "MIT-0",
        "MPL-1.1",
        "MPL-2.0",
        "MS-PL",
        "OFL-1.1",
        "Unlicense",
        "WTFPL",
        "X11",
        "Zlib",
    ])
});

/// Catalog backed by the built-in table of well-known listed licenses
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl LicenseCatalog for BuiltinCatalog {
    fn is_listed_license_id(&self, id: &str) -> bool {
        LISTED_LICENSE_IDS.contains(id)
    }
}
