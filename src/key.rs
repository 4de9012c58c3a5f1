//! [`Key`] is a wrapper around a Gemini API key.

use zeroize::Zeroizing;

/// Error for when a key is empty or contains whitespace.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(any(feature = "partial-eq", test), derive(PartialEq))]
pub enum InvalidKey {
    /// The key was empty.
    #[error("API key is empty")]
    Empty,
    /// The key contained whitespace, which is never valid in a query string.
    #[error("API key contains whitespace at byte {at}")]
    Whitespace {
        /// Byte offset of the first whitespace character.
        at: usize,
    },
}

/// Stores a Gemini API key. The key is zeroized on drop and redacted from
/// [`Debug`] output. The [`Display`] implementation writes out the key. **Be
/// sure to zeroize whatever you write it to**. Prefer [`Key::read`] if you
/// just need to borrow it.
///
/// [`Display`]: std::fmt::Display
pub struct Key {
    inner: Zeroizing<String>,
}

impl Key {
    /// Borrow the key.
    pub fn read(&self) -> &str {
        self.inner.as_str()
    }
}

impl TryFrom<String> for Key {
    type Error = InvalidKey;

    /// Create a new key from a string. The string is moved into the key so it
    /// is zeroized along with it. Surrounding whitespace (like a trailing
    /// newline from a file) is trimmed.
    fn try_from(s: String) -> Result<Self, Self::Error> {
        let s = Zeroizing::new(s);
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidKey::Empty);
        }
        if let Some(at) = trimmed.find(char::is_whitespace) {
            return Err(InvalidKey::Whitespace { at });
        }

        Ok(Self {
            inner: Zeroizing::new(trimmed.to_string()),
        })
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}

impl std::fmt::Display for Key {
    /// Write out the key. Make sure to zeroize whatever you write it to if at
    /// all possible.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.read())
    }
}
