//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Command-line surface, process-wide mode flags and option dispatch.

use clap::Parser;
use gettextrs::gettext;

use crate::ed::error::ExitStatus;
use crate::ed::session::Session;

/// ed - edit text
#[derive(Parser, Debug)]
#[command(name = "ed", version, about = gettext("ed - edit text"))]
pub struct Args {
    /// Use extended regular expressions.
    #[arg(short = 'E', long, help = gettext("Use extended regular expressions."))]
    pub extended_regexp: bool,

    /// Run in compatibility mode.
    #[arg(short = 'G', long, help = gettext("Run in compatibility mode."))]
    pub traditional: bool,

    /// Exit with 0 status even if a command fails.
    #[arg(short = 'l', long, help = gettext("Exit with 0 status even if a command fails."))]
    pub loose_exit_status: bool,

    /// Use STRING as an interactive prompt.
    #[arg(short = 'p', long, value_name = "STRING",
          help = gettext("Use STRING as an interactive prompt."))]
    pub prompt: Option<String>,

    /// Run in restricted mode.
    #[arg(short = 'r', long, help = gettext("Run in restricted mode."))]
    pub restricted: bool,

    /// Suppress diagnostics, byte counts and '!' prompt.
    #[arg(short = 's', long, visible_alias = "silent",
          help = gettext("Suppress diagnostics, byte counts and '!' prompt."))]
    pub quiet: bool,

    /// Be verbose; equivalent to the 'H' command.
    #[arg(short = 'v', long, help = gettext("Be verbose; equivalent to the 'H' command."))]
    pub verbose: bool,

    /// Strip carriage returns at end of text lines.
    #[arg(long, help = gettext("Strip carriage returns at end of text lines."))]
    pub strip_trailing_cr: bool,

    /// Start edit by reading in FILE.
    #[arg(value_name = "FILE",
          help = gettext("Start edit by reading in FILE ('-' reads standard input, '!CMD' reads the output of CMD)."))]
    pub file: Option<String>,
}

/// Process-wide mode flags.
///
/// Built once during startup and passed by reference into every
/// collaborator that needs one; flags are only ever raised, never
/// cleared back to their defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModeFlags {
    /// Use extended regular expressions.
    pub extended_regexp: bool,
    /// Restricted mode: no shell escapes, no pathnames outside the
    /// current directory.
    pub restricted: bool,
    /// Suppress diagnostics, byte counts and the '!' prompt.
    pub scripted: bool,
    /// Strip trailing carriage returns from loaded text.
    pub strip_cr: bool,
    /// Backwards-compatible behavior.
    pub traditional: bool,
}

/// How the trailing positional names the initial input.
///
/// Decided once at parse time so later code never sniffs prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An ordinary pathname.
    Path(String),
    /// Output of a shell command (leading '!').
    ShellCommand(String),
    /// Standard input ('-').
    Stdin,
}

impl Source {
    pub fn from_arg(arg: &str) -> Source {
        if arg == "-" {
            Source::Stdin
        } else if let Some(cmd) = arg.strip_prefix('!') {
            Source::ShellCommand(cmd.to_string())
        } else {
            Source::Path(arg.to_string())
        }
    }
}

/// Fold recognized options into the mode flags and forward the
/// side-effecting ones to the session.
///
/// Returns the loose-exit flag, which is not a mode flag; the sequencer
/// hands it to the command loop unchanged. The full destructuring keeps
/// the mapping exhaustive: an option added to [`Args`] without a
/// handling arm here fails to compile.
pub fn apply_options(
    args: &Args,
    flags: &mut ModeFlags,
    session: &mut dyn Session,
) -> Result<bool, ExitStatus> {
    let Args {
        extended_regexp,
        traditional,
        loose_exit_status,
        prompt,
        restricted,
        quiet,
        verbose,
        strip_trailing_cr,
        file: _,
    } = args;

    if *extended_regexp {
        flags.extended_regexp = true;
    }
    if *traditional {
        flags.traditional = true;
    }
    if *restricted {
        flags.restricted = true;
    }
    if *quiet {
        flags.scripted = true;
    }
    if *strip_trailing_cr {
        flags.strip_cr = true;
    }
    if let Some(prompt) = prompt {
        if let Err(e) = session.set_prompt(prompt) {
            eprintln!("ed: {}", e);
            return Err(ExitStatus::Environmental);
        }
    }
    if *verbose {
        session.set_verbose();
    }

    Ok(*loose_exit_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ed::session::testing::FakeSession;
    use clap::error::ErrorKind;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).expect("arguments should parse")
    }

    #[test]
    fn mode_flags_default_false() {
        let flags = ModeFlags::default();
        assert!(!flags.extended_regexp);
        assert!(!flags.restricted);
        assert!(!flags.scripted);
        assert!(!flags.strip_cr);
        assert!(!flags.traditional);
    }

    #[test]
    fn short_options_set_flags_and_positional() {
        let args = parse(&["ed", "-E", "-r", "file.txt"]);
        let mut flags = ModeFlags::default();
        let mut session = FakeSession::new();

        let loose = apply_options(&args, &mut flags, &mut session).unwrap();

        assert!(flags.extended_regexp);
        assert!(flags.restricted);
        assert!(!loose);
        assert_eq!(args.file.as_deref(), Some("file.txt"));
    }

    #[test]
    fn repeated_application_is_idempotent() {
        let args = parse(&["ed", "-E", "-s", "--strip-trailing-cr"]);
        let mut flags = ModeFlags::default();
        let mut session = FakeSession::new();

        apply_options(&args, &mut flags, &mut session).unwrap();
        apply_options(&args, &mut flags, &mut session).unwrap();

        assert!(flags.extended_regexp);
        assert!(flags.scripted);
        assert!(flags.strip_cr);
    }

    #[test]
    fn set_flags_are_never_cleared() {
        let args = parse(&["ed"]);
        let mut flags = ModeFlags {
            extended_regexp: true,
            restricted: true,
            scripted: true,
            strip_cr: true,
            traditional: true,
        };
        let mut session = FakeSession::new();

        apply_options(&args, &mut flags, &mut session).unwrap();

        assert!(flags.extended_regexp);
        assert!(flags.restricted);
        assert!(flags.scripted);
        assert!(flags.strip_cr);
        assert!(flags.traditional);
    }

    #[test]
    fn quiet_and_silent_are_one_option() {
        for argv in [["ed", "-s"], ["ed", "--quiet"], ["ed", "--silent"]] {
            let args = parse(&argv);
            let mut flags = ModeFlags::default();
            let mut session = FakeSession::new();
            apply_options(&args, &mut flags, &mut session).unwrap();
            assert!(flags.scripted, "{:?} should set scripted", argv);
        }
    }

    #[test]
    fn prompt_is_forwarded_with_no_positional() {
        let args = parse(&["ed", "-p", "> "]);
        let mut flags = ModeFlags::default();
        let mut session = FakeSession::new();

        apply_options(&args, &mut flags, &mut session).unwrap();

        assert_eq!(session.prompt.as_deref(), Some("> "));
        assert!(args.file.is_none());
    }

    #[test]
    fn prompt_failure_is_environmental() {
        let args = parse(&["ed", "-p", "> "]);
        let mut flags = ModeFlags::default();
        let mut session = FakeSession::new();
        session.prompt_failure = true;

        let err = apply_options(&args, &mut flags, &mut session).unwrap_err();
        assert_eq!(err, ExitStatus::Environmental);
    }

    #[test]
    fn verbose_is_forwarded() {
        let args = parse(&["ed", "-v"]);
        let mut flags = ModeFlags::default();
        let mut session = FakeSession::new();

        apply_options(&args, &mut flags, &mut session).unwrap();
        assert!(session.verbose);
    }

    #[test]
    fn loose_exit_status_is_not_a_mode_flag() {
        let args = parse(&["ed", "-l"]);
        let mut flags = ModeFlags::default();
        let mut session = FakeSession::new();

        let loose = apply_options(&args, &mut flags, &mut session).unwrap();
        assert!(loose);
        assert!(!flags.extended_regexp);
        assert!(!flags.restricted);
        assert!(!flags.scripted);
        assert!(!flags.strip_cr);
        assert!(!flags.traditional);
    }

    #[test]
    fn unknown_option_is_a_parse_error() {
        let err = Args::try_parse_from(["ed", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn strip_trailing_cr_is_long_only() {
        let err = Args::try_parse_from(["ed", "-S"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        let args = parse(&["ed", "--strip-trailing-cr"]);
        assert!(args.strip_trailing_cr);
    }

    #[test]
    fn source_is_tagged_once_at_parse_time() {
        assert_eq!(Source::from_arg("-"), Source::Stdin);
        assert_eq!(
            Source::from_arg("!date"),
            Source::ShellCommand("date".to_string())
        );
        assert_eq!(
            Source::from_arg("file.txt"),
            Source::Path("file.txt".to_string())
        );
    }
}
