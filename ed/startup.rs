//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Startup sequencing: options to mode flags, the optional initial load
//! and the hand-off to the command loop.

use gettextrs::{bind_textdomain_codeset, setlocale, textdomain, LocaleCategory};
use std::fs;

use crate::ed::access;
use crate::ed::cli::{self, Args, ModeFlags, Source};
use crate::ed::error::ExitStatus;
use crate::ed::session::Session;
use crate::ed::PROJECT_NAME;

/// Outcome of startup, handed exactly once to the command loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct StartupResult {
    /// A problem with the initial source was recorded for the session
    /// to surface.
    pub initial_error: bool,
    /// Report success regardless of later command failures.
    pub loose_exit: bool,
}

/// Initialize the locale from the ambient environment.
fn init_locale() -> Result<(), Box<dyn std::error::Error>> {
    setlocale(LocaleCategory::LcAll, "");
    textdomain(PROJECT_NAME)?;
    bind_textdomain_codeset(PROJECT_NAME, "UTF-8")?;
    Ok(())
}

/// True only when the source names an existing regular file.
fn is_regular_file(source: &Source) -> bool {
    match source {
        Source::Path(name) => fs::metadata(name)
            .map(|m| m.file_type().is_file())
            .unwrap_or(false),
        Source::ShellCommand(_) | Source::Stdin => false,
    }
}

/// Attempt the initial load.
///
/// `Ok(true)` means a problem was recorded for the session to surface
/// once the loop starts; `Err` is immediately fatal.
fn load_initial(
    flags: &ModeFlags,
    source: &Source,
    name: &str,
    session: &mut dyn Session,
) -> Result<bool, ExitStatus> {
    if let Err(denied) = access::may_access(flags, source) {
        session.set_error_msg(&denied.to_string());
        return Ok(true);
    }

    let mut deferred = false;
    match session.load_source(flags, source) {
        Ok(_lines) => {}
        Err(err) => {
            if !flags.scripted {
                eprintln!("{}: {}", name, err);
            }
            // Damage to a plain file on disk is unrecoverable; any
            // other source is surfaced once the loop starts.
            if is_regular_file(source) {
                return Err(ExitStatus::CorruptInput);
            }
            session.set_error_msg(&err.to_string());
            deferred = true;
        }
    }

    if !matches!(source, Source::ShellCommand(_)) {
        if let Err(e) = session.set_default_filename(name) {
            eprintln!("ed: {}", e);
            return Err(ExitStatus::Environmental);
        }
    }
    Ok(deferred)
}

/// Drive startup: apply options, initialize collaborators, perform the
/// optional initial load and enter the command loop. The loop's return
/// value becomes the process's exit status, unmodified.
pub fn run(args: &Args, session: &mut dyn Session) -> ExitStatus {
    let mut flags = ModeFlags::default();

    let loose_exit = match cli::apply_options(args, &mut flags, session) {
        Ok(loose) => loose,
        Err(status) => return status,
    };

    if let Err(e) = init_locale() {
        eprintln!("ed: {}", e);
        return ExitStatus::Environmental;
    }
    if let Err(e) = session.init_buffers() {
        eprintln!("ed: {}", e);
        return ExitStatus::Environmental;
    }

    let mut initial_error = false;
    if let Some(arg) = args.file.as_deref() {
        match Source::from_arg(arg) {
            Source::Stdin => flags.scripted = true,
            source => match load_initial(&flags, &source, arg, session) {
                Ok(deferred) => initial_error = deferred,
                Err(status) => return status,
            },
        }
    }

    if initial_error {
        // Shown even in scripted mode.
        println!("?");
    }

    session.run_loop(
        &flags,
        StartupResult {
            initial_error,
            loose_exit,
        },
    )
}
