//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! ed - edit text
//!
//! Startup front end for the ed line editor: command-line handling,
//! restricted-mode access checks and the initial-file-load protocol.
//!
//! Exit status: 0 for a normal exit, 1 for environmental problems
//! (file not found, invalid flags, I/O errors), 2 to indicate a corrupt
//! or invalid input file, 3 for an internal consistency error (bug).

mod ed;

use clap::Parser;
use std::panic::{self, AssertUnwindSafe};

use ed::cli::Args;
use ed::error::ExitStatus;
use ed::session::EdSession;
use ed::startup;

fn main() {
    let args = Args::try_parse().unwrap_or_else(|err| match err.kind() {
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
            print!("{err}");
            std::process::exit(ExitStatus::Normal.code());
        }
        _ => {
            eprint!("{err}");
            std::process::exit(ExitStatus::Environmental.code());
        }
    });

    let mut session = EdSession::new();

    // A panic anywhere past this point is an internal consistency error.
    let status = panic::catch_unwind(AssertUnwindSafe(|| startup::run(&args, &mut session)))
        .unwrap_or(ExitStatus::InternalBug);

    std::process::exit(status.code());
}
