use crate::error::{Error, Result};
use std::fs::OpenOptions;

/// Modes a resource can be read from.
pub const READABLE_MODES: [&str; 18] = [
    "r", "rb", "rt", "r+", "r+b", "r+t", "w+", "w+b", "w+t", "a+", "a+b",
    "a+t", "x+", "x+b", "x+t", "c+", "c+b", "c+t",
];

/// Modes a resource can be written to.
pub const WRITABLE_MODES: [&str; 27] = [
    "r+", "r+b", "r+t", "w", "wb", "wt", "w+", "w+b", "w+t", "a", "ab", "at",
    "a+", "a+b", "a+t", "x", "xb", "xt", "x+", "x+b", "x+t", "c", "cb", "ct",
    "c+", "c+b", "c+t",
];

/// Whether `mode` is in the list of readable modes.
pub fn is_readable_mode(mode: &str) -> bool {
    READABLE_MODES.contains(&mode)
}

/// Whether `mode` is in the list of writable modes.
pub fn is_writable_mode(mode: &str) -> bool {
    WRITABLE_MODES.contains(&mode)
}

/// An fopen-style access mode.
///
/// A mode is made of a base letter among `r`, `w`, `a`, `x` and `c`,
/// optionally followed by `+` for read and write access, and by `b` or `t`.
/// The `+` and the suffix may come in either order; the mode is stored in
/// the normalized `<base>[+][b|t]` form.
///
/// ```
/// use iostream::handle::Mode;
///
/// let mode = Mode::parse("rb+").unwrap();
/// assert_eq!(mode.as_str(), "r+b");
/// assert!(mode.can_read() && mode.can_write());
/// assert!(Mode::parse("rw").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mode {
    repr: String,
    base: char,
    plus: bool,
}

impl Mode {
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidType(format!("invalid mode {:?}", s));
        let mut chars = s.chars();
        let base = match chars.next() {
            Some(c @ ('r' | 'w' | 'a' | 'x' | 'c')) => c,
            _ => return Err(invalid()),
        };

        let mut plus = false;
        let mut suffix: Option<char> = None;
        for c in chars {
            match c {
                '+' if !plus => plus = true,
                'b' | 't' if suffix.is_none() => suffix = Some(c),
                _ => return Err(invalid()),
            }
        }

        let mut repr = String::with_capacity(3);
        repr.push(base);
        if plus {
            repr.push('+');
        }
        if let Some(c) = suffix {
            repr.push(c);
        }
        Ok(Mode { repr, base, plus })
    }

    /// The `w+b` mode of anonymous read and write resources.
    pub(crate) fn read_write() -> Self {
        Mode {
            repr: String::from("w+b"),
            base: 'w',
            plus: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.repr
    }

    pub fn can_read(&self) -> bool {
        self.base == 'r' || self.plus
    }

    pub fn can_write(&self) -> bool {
        self.base != 'r' || self.plus
    }

    /// Writes always go to the end of the resource.
    pub fn is_append(&self) -> bool {
        self.base == 'a'
    }

    /// Opening in this mode discards the existing content.
    pub fn truncates(&self) -> bool {
        self.base == 'w'
    }

    /// Options to open a file in this mode.
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(self.can_read());
        match self.base {
            'r' => {
                options.write(self.plus);
            }
            'w' => {
                options.write(true).create(true).truncate(true);
            }
            'a' => {
                options.append(true).create(true);
            }
            'x' => {
                options.write(true).create_new(true);
            }
            'c' => {
                options.write(true).create(true);
            }
            _ => unreachable!(),
        }
        options
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.repr)
    }
}

impl std::str::FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mode::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_readable_mode, is_writable_mode, Mode};
    use super::{READABLE_MODES, WRITABLE_MODES};
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Mode::parse("r").unwrap().as_str(), "r");
        assert_eq!(Mode::parse("rb+").unwrap().as_str(), "r+b");
        assert_eq!(Mode::parse("w+t").unwrap().as_str(), "w+t");
        assert_eq!(Mode::parse("ab").unwrap().as_str(), "ab");
    }

    #[test]
    fn test_truncates() {
        assert!(Mode::parse("w").unwrap().truncates());
        assert!(Mode::parse("wb+").unwrap().truncates());
        for s in ["r+", "a", "x+", "c"] {
            assert!(!Mode::parse(s).unwrap().truncates(), "{}", s);
        }
    }

    #[test]
    fn test_parse_invalid() {
        for s in ["", "rw", "q", "r++", "rbt", "+r", "r+x"] {
            let e = Mode::parse(s).unwrap_err();
            assert_eq!(e.code(), ErrorCode::InvalidType);
        }
    }

    #[test]
    fn test_allow_lists_match_mode_flags() {
        for base in ["r", "w", "a", "x", "c"] {
            for plus in ["", "+"] {
                for suffix in ["", "b", "t"] {
                    let s = format!("{}{}{}", base, plus, suffix);
                    let mode = Mode::parse(&s).unwrap();
                    assert_eq!(is_readable_mode(&s), mode.can_read(), "{}", s);
                    assert_eq!(is_writable_mode(&s), mode.can_write(), "{}", s);
                }
            }
        }
    }

    #[test]
    fn test_allow_lists_are_normalized() {
        for s in READABLE_MODES.iter().chain(WRITABLE_MODES.iter()) {
            assert_eq!(Mode::parse(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn test_append() {
        assert!(Mode::parse("a+").unwrap().is_append());
        assert!(!Mode::parse("w").unwrap().is_append());
    }
}
