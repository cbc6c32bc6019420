//! Console access checks and permission claims.
//!
//! ```
//! use zlog_core::perms::{Console, Method, allow};
//!
//! let admin_only = Method::for_consoles([Console::Admin]);
//! assert!(allow(Some(&admin_only), Console::Admin).is_ok());
//! assert!(allow(Some(&admin_only), Console::Portal).is_err());
//! ```

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Front end a caller signed in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Console {
    #[default]
    Unspecified,
    Portal,
    Admin,
}

/// Access rules of one callable method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Skip every console check.
    pub ignore: bool,
    /// Consoles allowed to call the method. Empty allows all.
    pub consoles: Vec<Console>,
}

impl Method {
    pub fn for_consoles(consoles: impl IntoIterator<Item = Console>) -> Self {
        Self {
            ignore: false,
            consoles: consoles.into_iter().collect(),
        }
    }

    pub fn ignored() -> Self {
        Self {
            ignore: true,
            consoles: Vec::new(),
        }
    }
}

/// Check whether `console` may call `method`.
///
/// A missing method, an ignored method and a method without consoles all
/// allow access. Otherwise `console` must be listed.
pub fn allow(method: Option<&Method>, console: Console) -> CoreResult<()> {
    let Some(method) = method else {
        return Ok(());
    };
    if method.ignore || method.consoles.is_empty() || method.consoles.contains(&console) {
        return Ok(());
    }
    Err(CoreError::AccessDenied)
}

/// Bit set of permissions held by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(u64);

impl Claim {
    pub const CREATE_OWN: Claim = Claim(1 << 0);
    pub const VIEW_OWN: Claim = Claim(1 << 1);
    pub const UPDATE_OWN: Claim = Claim(1 << 2);
    pub const DELETE_OWN: Claim = Claim(1 << 3);
    pub const VIEW_ANY: Claim = Claim(1 << 4);
    pub const ROOT: Claim = Claim(1 << 5);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Claim) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Claim {
    type Output = Claim;

    fn bitor(self, rhs: Claim) -> Claim {
        Claim(self.0 | rhs.0)
    }
}

impl BitOrAssign for Claim {
    fn bitor_assign(&mut self, rhs: Claim) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Create, view, update and delete on the caller's own resources.
pub const fn default_owner() -> Claim {
    Claim(Claim::CREATE_OWN.0 | Claim::VIEW_OWN.0 | Claim::DELETE_OWN.0 | Claim::UPDATE_OWN.0)
}

pub const fn default_root() -> Claim {
    Claim::ROOT
}

/// Root plus viewing anyone's resources.
pub const fn default_view_any() -> Claim {
    Claim(Claim::ROOT.0 | Claim::VIEW_ANY.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_table() {
        let cases: Vec<(&str, Option<Method>, bool)> = vec![
            ("missing method", None, true),
            ("ignored method", Some(Method::ignored()), true),
            ("no consoles listed", Some(Method::default()), true),
            ("console listed", Some(Method::for_consoles([Console::Portal])), true),
            ("console not listed", Some(Method::for_consoles([Console::Admin])), false),
            (
                "one of several listed",
                Some(Method::for_consoles([Console::Portal, Console::Admin])),
                true,
            ),
            (
                "ignored with consoles",
                Some(Method {
                    ignore: true,
                    consoles: vec![Console::Admin],
                }),
                true,
            ),
        ];

        for (name, method, allowed) in cases {
            let result = allow(method.as_ref(), Console::Portal);
            assert_eq!(result.is_ok(), allowed, "{name}");
        }
    }

    #[test]
    fn denial_names_the_reason() {
        let method = Method::for_consoles([Console::Admin]);
        let err = allow(Some(&method), Console::Portal).unwrap_err();
        assert_eq!(err, CoreError::AccessDenied);
        assert_eq!(err.to_string(), "access denied: console not allowed");
    }

    #[test]
    fn unspecified_console_needs_an_open_method() {
        assert!(allow(Some(&Method::ignored()), Console::Unspecified).is_ok());
        let portal = Method::for_consoles([Console::Portal]);
        assert!(allow(Some(&portal), Console::Unspecified).is_err());
    }

    #[test]
    fn default_claims() {
        let owner = default_owner();
        for bit in [Claim::CREATE_OWN, Claim::VIEW_OWN, Claim::UPDATE_OWN, Claim::DELETE_OWN] {
            assert!(owner.contains(bit));
        }
        assert!(!owner.contains(Claim::VIEW_ANY));
        assert!(!owner.contains(Claim::ROOT));

        assert_eq!(default_root(), Claim::ROOT);
        assert_eq!(default_view_any(), Claim::ROOT | Claim::VIEW_ANY);
        assert!(default_view_any().contains(default_root()));
        assert!(!default_root().contains(default_view_any()));
    }

    #[test]
    fn claims_accumulate() {
        let mut claim = Claim::empty();
        assert!(claim.is_empty());
        claim |= Claim::VIEW_OWN;
        claim |= Claim::VIEW_ANY;
        assert_eq!(claim.bits(), 0b1_0010);
        assert_eq!(claim.to_string(), "0x12");
        assert!(claim.contains(Claim::empty()));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn union_contains_both_sides(a in any::<u64>(), b in any::<u64>()) {
                let (a, b) = (Claim::from_bits(a), Claim::from_bits(b));
                let union = a | b;
                prop_assert!(union.contains(a));
                prop_assert!(union.contains(b));
            }
        }
    }
}
