//! Platform profiles: the workspace root and path syntax in effect for a run.

/// Workspace root on POSIX hosts.
pub(crate) const POSIX_WORKSPACE_ROOT: &str = "/workspace/";
/// Workspace root on Windows hosts.
pub(crate) const WINDOWS_WORKSPACE_ROOT: &str = "C:\\workspace\\";
/// Drive specifier prepended to drive-relative rooted paths on Windows.
pub(crate) const WINDOWS_DRIVE: &str = "C:";

/// Path syntax family used for cleaning and absoluteness checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PathStyle {
    Posix,
    Windows,
}

impl PathStyle {
    /// Canonical separator emitted by cleaning.
    pub(crate) fn separator(self) -> u8 {
        match self {
            PathStyle::Posix => b'/',
            PathStyle::Windows => b'\\',
        }
    }

    /// Windows accepts `/` as an alternate separator.
    pub(crate) fn is_separator(self, byte: u8) -> bool {
        match self {
            PathStyle::Posix => byte == b'/',
            PathStyle::Windows => byte == b'/' || byte == b'\\',
        }
    }
}

/// Containment boundary plus the path syntax it is expressed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PlatformProfile {
    pub(crate) style: PathStyle,
    pub(crate) workspace_root: String,
}

impl PlatformProfile {
    pub(crate) fn posix() -> Self {
        Self::with_root(PathStyle::Posix, POSIX_WORKSPACE_ROOT)
    }

    pub(crate) fn windows() -> Self {
        Self::with_root(PathStyle::Windows, WINDOWS_WORKSPACE_ROOT)
    }

    /// Build a profile with a custom root. The root should end in a separator.
    pub(crate) fn with_root(style: PathStyle, workspace_root: impl Into<String>) -> Self {
        Self {
            style,
            workspace_root: workspace_root.into(),
        }
    }

    /// Whether `\foo` is rewritten to `C:\foo` before the safety check.
    pub(crate) fn rewrites_leading_backslash(&self) -> bool {
        self.style == PathStyle::Windows
    }

    /// The root as cleaning would emit it (no trailing separator).
    pub(crate) fn root_without_separator(&self) -> &str {
        self.workspace_root
            .strip_suffix(char::from(self.style.separator()))
            .unwrap_or(&self.workspace_root)
    }
}

/// Pick the profile for the host operating system.
pub(crate) fn resolve_profile() -> PlatformProfile {
    if cfg!(windows) {
        PlatformProfile::windows()
    } else {
        PlatformProfile::posix()
    }
}
