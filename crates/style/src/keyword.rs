//! Keyword-valued style enums share one textual form: lower-case, kebab-case words.

/// An enum whose values are written as bare keywords in declarations.
pub trait Keyword: Sized + Copy + 'static {
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    fn keyword(self) -> &'static str;

    /// Looks up a keyword, accepting either `_` or `-` as the word separator.
    fn from_keyword(s: &str) -> Option<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL.iter().copied().find(|v| v.keyword() == wanted)
    }
}

macro_rules! keywords {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $crate::keyword::Keyword for $ty {
            const ALL: &'static [Self] = &[$($ty::$variant),+];

            fn keyword(self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::keyword::Keyword::keyword(*self))
            }
        }
    };
}

pub(crate) use keywords;
