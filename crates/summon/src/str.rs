//! String type wrapping [`Cow<'static, str>`].
use std::{borrow::Cow, ops::Deref};

use serde::{Deserialize, Serialize};

/// A transparent wrapper around [`Cow<'static, str>`].
///
/// Modal ids, element names and style values are usually static literals,
/// so this avoids allocating for them.
#[repr(transparent)]
#[derive(Clone, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Str {
    inner: Cow<'static, str>,
}

impl core::fmt::Display for Str {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&'static str> for Str {
    fn from(s: &'static str) -> Self {
        Str { inner: s.into() }
    }
}

impl From<String> for Str {
    fn from(s: String) -> Self {
        Str { inner: s.into() }
    }
}

impl<'a> From<&'a String> for Str {
    fn from(s: &'a String) -> Self {
        Str {
            inner: s.clone().into(),
        }
    }
}

impl<'a> From<&'a Str> for Str {
    fn from(s: &'a Str) -> Self {
        s.clone()
    }
}

impl From<Cow<'static, str>> for Str {
    fn from(inner: Cow<'static, str>) -> Self {
        Str { inner }
    }
}

impl Deref for Str {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Str {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for Str {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Str {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Str {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Str {
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_as_a_plain_string() {
        let id = Str::from(format!("modal-{}", 1));
        assert_eq!(r#""modal-1""#, serde_json::to_string(&id).unwrap());
        let back: Str = serde_json::from_str(r#""modal-1""#).unwrap();
        assert_eq!(id, back);
        assert_eq!(back, "modal-1");
    }
}
