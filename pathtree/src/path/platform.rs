//! Platform-specific path syntax.
//!
//! Separator characters and root grammar differ between Unix-like systems and
//! Windows. All of that knowledge lives behind the [`Platform`] trait so the
//! path algebra itself never branches on the host operating system, and
//! Windows paths can be reasoned about on a Unix host (and vice versa).

use serde::{Deserialize, Serialize};

/// Path syntax of a platform.
///
/// # Examples
///
/// ```
/// use pathtree::path::{Platform, UnixPlatform, WindowsPlatform};
///
/// assert_eq!(UnixPlatform.separator(), '/');
/// assert_eq!(WindowsPlatform.separator(), '\\');
/// assert!(WindowsPlatform.has_drive_letter("C:\\Users"));
/// assert!(!UnixPlatform.has_drive_letter("C:\\Users"));
/// ```
pub trait Platform {
    /// The preferred separator between path components.
    fn separator(&self) -> char;

    /// The separator between entries of a path list (as in `PATH`).
    fn path_separator(&self) -> char;

    /// Whether `path` starts with a drive-letter prefix such as `C:`.
    fn has_drive_letter(&self, path: &str) -> bool;

    /// Whether `c` separates path components.
    ///
    /// Defaults to the preferred separator only.
    fn is_separator(&self, c: char) -> bool {
        c == self.separator()
    }

    /// Whether UNC roots (`\\server\share\`) are recognised.
    fn supports_unc(&self) -> bool {
        false
    }
}

/// Unix-like path syntax: `/` separator, `:` path-list separator, no drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnixPlatform;

impl Platform for UnixPlatform {
    fn separator(&self) -> char {
        '/'
    }

    fn path_separator(&self) -> char {
        ':'
    }

    fn has_drive_letter(&self, _path: &str) -> bool {
        false
    }
}

/// Windows path syntax: `\` separator (`/` also accepted), `;` path-list
/// separator, drive letters and UNC roots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    fn separator(&self) -> char {
        '\\'
    }

    fn path_separator(&self) -> char {
        ';'
    }

    fn has_drive_letter(&self, path: &str) -> bool {
        let mut chars = path.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
        )
    }

    fn is_separator(&self, c: char) -> bool {
        c == '\\' || c == '/'
    }

    fn supports_unc(&self) -> bool {
        true
    }
}

/// The platform of the host this crate was compiled for.
#[cfg(windows)]
pub type NativePlatform = WindowsPlatform;

/// The platform of the host this crate was compiled for.
#[cfg(not(windows))]
pub type NativePlatform = UnixPlatform;

/// Platform selection as it appears in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Whatever the host uses.
    #[default]
    Native,
    /// Force Unix syntax.
    Unix,
    /// Force Windows syntax.
    Windows,
}

impl PlatformKind {
    /// Parses a platform name.
    ///
    /// Recognizes: "native", "unix", "windows" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "unix" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            _ => Err(format!("invalid platform: {s}")),
        }
    }
}

/// A platform chosen at runtime from a [`PlatformKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynPlatform {
    /// Unix syntax.
    Unix(UnixPlatform),
    /// Windows syntax.
    Windows(WindowsPlatform),
}

impl From<PlatformKind> for DynPlatform {
    fn from(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::Unix => Self::Unix(UnixPlatform),
            PlatformKind::Windows => Self::Windows(WindowsPlatform),
            PlatformKind::Native if cfg!(windows) => Self::Windows(WindowsPlatform),
            PlatformKind::Native => Self::Unix(UnixPlatform),
        }
    }
}

impl Platform for DynPlatform {
    fn separator(&self) -> char {
        match self {
            Self::Unix(p) => p.separator(),
            Self::Windows(p) => p.separator(),
        }
    }

    fn path_separator(&self) -> char {
        match self {
            Self::Unix(p) => p.path_separator(),
            Self::Windows(p) => p.path_separator(),
        }
    }

    fn has_drive_letter(&self, path: &str) -> bool {
        match self {
            Self::Unix(p) => p.has_drive_letter(path),
            Self::Windows(p) => p.has_drive_letter(path),
        }
    }

    fn is_separator(&self, c: char) -> bool {
        match self {
            Self::Unix(p) => p.is_separator(c),
            Self::Windows(p) => p.is_separator(c),
        }
    }

    fn supports_unc(&self) -> bool {
        match self {
            Self::Unix(p) => p.supports_unc(),
            Self::Windows(p) => p.supports_unc(),
        }
    }
}
