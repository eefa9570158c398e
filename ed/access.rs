//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Restricted-mode access checks.
//!
//! The restricted variant of the editor must not be able to leave its
//! working directory or spawn a shell, while ordinary same-directory
//! filenames remain usable.

use thiserror::Error;

use crate::ed::cli::{ModeFlags, Source};

/// Reasons restricted mode refuses a source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Shell access restricted")]
    Shell,
    #[error("Directory access restricted")]
    Directory,
}

/// Decide whether the named source may be touched at all.
///
/// Outside restricted mode every source is permitted. Performs no
/// filesystem access; the caller records the denial message.
pub fn may_access(flags: &ModeFlags, source: &Source) -> Result<(), AccessError> {
    if !flags.restricted {
        return Ok(());
    }
    match source {
        Source::ShellCommand(_) => Err(AccessError::Shell),
        Source::Path(name) if name == ".." || name.contains('/') => Err(AccessError::Directory),
        Source::Path(_) | Source::Stdin => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted() -> ModeFlags {
        ModeFlags {
            restricted: true,
            ..Default::default()
        }
    }

    #[test]
    fn shell_commands_are_denied() {
        let err = may_access(&restricted(), &Source::from_arg("!ls")).unwrap_err();
        assert_eq!(err, AccessError::Shell);
        assert_eq!(err.to_string(), "Shell access restricted");
    }

    #[test]
    fn parent_directory_is_denied() {
        let err = may_access(&restricted(), &Source::from_arg("..")).unwrap_err();
        assert_eq!(err, AccessError::Directory);
        assert_eq!(err.to_string(), "Directory access restricted");
    }

    #[test]
    fn any_path_separator_is_denied() {
        for name in ["/etc/passwd", "../x", "sub/dir", "dir/"] {
            let err = may_access(&restricted(), &Source::from_arg(name)).unwrap_err();
            assert_eq!(err, AccessError::Directory, "{} should be denied", name);
        }
    }

    #[test]
    fn plain_filenames_are_permitted() {
        for name in ["file.txt", ".hidden", "...", "a b c"] {
            assert!(
                may_access(&restricted(), &Source::from_arg(name)).is_ok(),
                "{} should be permitted",
                name
            );
        }
    }

    #[test]
    fn unrestricted_permits_everything() {
        let flags = ModeFlags::default();
        for name in ["!ls", "..", "/etc/passwd", "file.txt"] {
            assert!(may_access(&flags, &Source::from_arg(name)).is_ok());
        }
    }
}
