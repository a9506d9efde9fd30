//! Lexical path helpers for POSIX and Windows syntax.
//!
//! Everything here works on raw bytes and never touches the filesystem, so
//! both styles can be evaluated on any host. Every separator, drive and dot
//! byte is ASCII, so non-UTF-8 path segments pass through untouched.

use crate::profile::PathStyle;

fn is_windows_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// Length of the leading volume name: a drive (`C:`) or a UNC share
/// (`\\host\share`). Always zero for POSIX paths.
pub(crate) fn volume_name_len(style: PathStyle, path: &[u8]) -> usize {
    if style == PathStyle::Posix {
        return 0;
    }
    let len = path.len();
    if len < 2 {
        return 0;
    }
    if path[1] == b':' && path[0].is_ascii_alphabetic() {
        return 2;
    }
    if len >= 5
        && is_windows_separator(path[0])
        && is_windows_separator(path[1])
        && !is_windows_separator(path[2])
        && path[2] != b'.'
    {
        // Host name runs to the next separator; the share name follows it.
        let mut n = 3;
        while n < len - 1 {
            if is_windows_separator(path[n]) {
                n += 1;
                if is_windows_separator(path[n]) || path[n] == b'.' {
                    return 0;
                }
                while n < len && !is_windows_separator(path[n]) {
                    n += 1;
                }
                return n;
            }
            n += 1;
        }
    }
    0
}

/// Whether a path is absolute under the given style.
///
/// On Windows `\foo` and `C:foo` are not absolute; UNC paths always are.
pub(crate) fn is_absolute(style: PathStyle, path: &[u8]) -> bool {
    match style {
        PathStyle::Posix => path.first() == Some(&b'/'),
        PathStyle::Windows => {
            let vol_len = volume_name_len(style, path);
            if vol_len == 0 {
                return false;
            }
            if is_windows_separator(path[0]) && is_windows_separator(path[1]) {
                return true;
            }
            path.get(vol_len).is_some_and(|&byte| style.is_separator(byte))
        }
    }
}

/// Lexically simplify a path: collapse separator runs, drop `.` segments,
/// and resolve `..` against preceding segments.
///
/// `..` directly under a root is dropped; leading `..` in a relative path is
/// kept. An empty result becomes `.`. Windows output uses `\` throughout and
/// keeps the volume name verbatim.
pub(crate) fn clean(style: PathStyle, path: &[u8]) -> Vec<u8> {
    let sep = style.separator();
    let vol_len = volume_name_len(style, path);
    let (volume, rest) = path.split_at(vol_len);
    let mut out: Vec<u8> = volume
        .iter()
        .map(|&byte| if style.is_separator(byte) { sep } else { byte })
        .collect();

    if rest.is_empty() {
        if vol_len > 2 {
            // Bare UNC share.
            return out;
        }
        out.push(b'.');
        return out;
    }

    let rooted = style.is_separator(rest[0]);
    let mut segments: Vec<&[u8]> = Vec::new();
    for segment in rest.split(|&byte| style.is_separator(byte)) {
        match segment {
            b"" | b"." => {}
            b".." => match segments.last() {
                Some(&last) if last != &b".."[..] => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(b".."),
            },
            other => segments.push(other),
        }
    }

    if rooted {
        out.push(sep);
    } else if segments.is_empty() {
        out.push(b'.');
        return out;
    }

    // `a\..\c:` must not turn into the drive `c:`.
    if style == PathStyle::Windows && vol_len == 0 && !rooted {
        if let Some(first) = segments.first() {
            if volume_name_len(style, first) == 2 {
                out.push(b'.');
                out.push(sep);
            }
        }
    }

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.extend_from_slice(segment);
    }
    out
}
