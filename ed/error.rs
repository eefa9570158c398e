//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Exit-status contract and error types for the ed startup subsystem.

use std::io;
use thiserror::Error;

use crate::ed::access::AccessError;

/// Final process status.
///
/// Every code path resolves to one of these four values. Once the
/// command loop has been entered, whatever it returns is passed through
/// unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Normal exit.
    Normal,
    /// Environmental problems: file not found, invalid flags, I/O errors.
    Environmental,
    /// Corrupt or invalid input file.
    CorruptInput,
    /// Internal consistency error (bug).
    InternalBug,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Normal => 0,
            ExitStatus::Environmental => 1,
            ExitStatus::CorruptInput => 2,
            ExitStatus::InternalBug => 3,
        }
    }
}

/// Failure modes reported by the initial-source loader.
///
/// `Corrupt` flags content the loader positively identified as invalid
/// (NUL bytes, malformed UTF-8); every other failure surfaces as the
/// generic `Io` case.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid or corrupt input")]
    Corrupt,
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Errors raised by commands inside the interactive loop.
#[derive(Debug, Error)]
pub enum EdError {
    #[error("Invalid address")]
    InvalidAddress,
    #[error("Unknown command")]
    UnknownCommand,
    #[error("No current filename")]
    NoFilename,
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("{0}")]
    Io(#[from] io::Error),
}
