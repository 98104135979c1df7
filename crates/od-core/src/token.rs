use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for color tokens.
///
/// Entries are never freed: every distinct token ever parsed stays for the
/// life of the process, including the partial words seen while a color is
/// being typed. The set is bounded by what one user types in a session.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// The raw text of a color reference exactly as written on a shape line
/// (`black`, `#ff8800`, `notacolor`, ...).
///
/// Tokens are never normalized: whatever the user typed is what gets
/// serialized back out. Whether the token names a drawable color is a
/// rendering question, answered by [`crate::model::Color::from_token`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorToken(Spur);

impl ColorToken {
    /// Intern a token, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ColorToken(INTERNER.get_or_intern(s))
    }

    /// Resolve back to the original text.
    pub fn as_str(&self) -> &'static str {
        INTERNER.resolve(&self.0)
    }

    /// Whether the token uses the `#` hex form.
    pub fn is_hex(&self) -> bool {
        self.as_str().starts_with('#')
    }
}

impl fmt::Debug for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ColorToken::intern(&s))
    }
}
