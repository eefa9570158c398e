//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Session collaborators: buffer initialization, source loading and the
//! command loop entered once startup completes.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::process::{Command, Stdio};

use crate::ed::access;
use crate::ed::cli::{ModeFlags, Source};
use crate::ed::error::{EdError, ExitStatus, LoadError};
use crate::ed::startup::StartupResult;

/// Narrow contract between the startup sequencer and the rest of the
/// editor.
pub trait Session {
    /// Prepare the line buffer. Runs once, before any load.
    fn init_buffers(&mut self) -> io::Result<()>;

    /// Read the named source into the buffer and return the number of
    /// lines read. [`LoadError::Corrupt`] flags content the loader knows
    /// to be invalid; anything else is a generic failure.
    fn load_source(&mut self, flags: &ModeFlags, source: &Source) -> Result<usize, LoadError>;

    /// Record the session's default filename.
    fn set_default_filename(&mut self, name: &str) -> io::Result<()>;

    /// Install the interactive prompt string.
    fn set_prompt(&mut self, prompt: &str) -> io::Result<()>;

    /// Print error explanations after every '?' (the 'H' command).
    fn set_verbose(&mut self);

    /// Record a message for the 'h' command to display.
    fn set_error_msg(&mut self, msg: &str);

    /// Run the command loop. The return value is the process's final
    /// exit status, passed through unmodified.
    fn run_loop(&mut self, flags: &ModeFlags, startup: StartupResult) -> ExitStatus;
}

#[derive(Debug)]
enum Flow {
    Continue,
    Quit,
}

/// The working editor session: an in-memory line buffer plus the small
/// command set the startup front end needs end to end.
#[derive(Default)]
pub struct EdSession {
    lines: Vec<String>,
    /// 1-based current line; 0 while the buffer is empty.
    cur_line: usize,
    default_filename: Option<String>,
    prompt: String,
    show_prompt: bool,
    verbose: bool,
    last_error: Option<String>,
}

impl EdSession {
    pub fn new() -> EdSession {
        EdSession::default()
    }

    fn read_source(source: &Source) -> Result<Vec<u8>, LoadError> {
        match source {
            Source::Path(name) => Ok(fs::read(name)?),
            Source::ShellCommand(cmd) => {
                let output = Command::new("sh")
                    .arg("-c")
                    .arg(cmd)
                    .stderr(Stdio::inherit())
                    .output()?;
                Ok(output.stdout)
            }
            Source::Stdin => {
                let mut buf = Vec::new();
                io::stdin().lock().read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }

    fn append_text(&mut self, text: &str, strip_cr: bool) -> usize {
        let mut count = 0;
        for line in text.split_inclusive('\n') {
            let mut line = line.strip_suffix('\n').unwrap_or(line);
            if strip_cr {
                line = line.strip_suffix('\r').unwrap_or(line);
            }
            self.lines.push(line.to_string());
            count += 1;
        }
        self.cur_line = self.lines.len();
        count
    }

    fn exec_command(&mut self, flags: &ModeFlags, line: &str) -> Result<Flow, EdError> {
        match line {
            "q" | "Q" => return Ok(Flow::Quit),
            "h" => {
                if let Some(msg) = &self.last_error {
                    println!("{}", msg);
                }
            }
            "H" => {
                self.verbose = !self.verbose;
                if self.verbose {
                    if let Some(msg) = &self.last_error {
                        println!("{}", msg);
                    }
                }
            }
            "P" => self.show_prompt = !self.show_prompt,
            "p" => {
                if self.cur_line == 0 {
                    return Err(EdError::InvalidAddress);
                }
                println!("{}", self.lines[self.cur_line - 1]);
            }
            "=" => println!("{}", self.lines.len()),
            "f" => match &self.default_filename {
                Some(name) => println!("{}", name),
                None => return Err(EdError::NoFilename),
            },
            "" => {
                if self.cur_line >= self.lines.len() {
                    return Err(EdError::InvalidAddress);
                }
                self.cur_line += 1;
                println!("{}", self.lines[self.cur_line - 1]);
            }
            cmd if cmd.starts_with('!') => {
                let command = &cmd[1..];
                access::may_access(flags, &Source::ShellCommand(command.to_string()))?;
                Command::new("sh").arg("-c").arg(command).status()?;
                if !flags.scripted {
                    println!("!");
                }
            }
            _ => return Err(EdError::UnknownCommand),
        }
        Ok(Flow::Continue)
    }
}

impl Session for EdSession {
    fn init_buffers(&mut self) -> io::Result<()> {
        self.lines.clear();
        self.cur_line = 0;
        Ok(())
    }

    fn load_source(&mut self, flags: &ModeFlags, source: &Source) -> Result<usize, LoadError> {
        let raw = Self::read_source(source)?;
        if raw.contains(&0) {
            return Err(LoadError::Corrupt);
        }
        let text = String::from_utf8(raw).map_err(|_| LoadError::Corrupt)?;
        let bytes = text.len();
        let count = self.append_text(&text, flags.strip_cr);
        if !flags.scripted {
            println!("{}", bytes);
        }
        Ok(count)
    }

    fn set_default_filename(&mut self, name: &str) -> io::Result<()> {
        self.default_filename = Some(name.to_string());
        Ok(())
    }

    fn set_prompt(&mut self, prompt: &str) -> io::Result<()> {
        self.prompt = prompt.to_string();
        self.show_prompt = true;
        Ok(())
    }

    fn set_verbose(&mut self) {
        self.verbose = true;
    }

    fn set_error_msg(&mut self, msg: &str) {
        self.last_error = Some(msg.to_string());
    }

    fn run_loop(&mut self, flags: &ModeFlags, startup: StartupResult) -> ExitStatus {
        let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) } == 1;
        let mut had_error = startup.initial_error;
        let stdin = io::stdin();
        let mut input = String::new();

        loop {
            if self.show_prompt {
                print!("{}", self.prompt);
                let _ = io::stdout().flush();
            }
            input.clear();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    self.set_error_msg(&e.to_string());
                    had_error = true;
                    break;
                }
            }
            let line = input.trim_end_matches('\n');
            match self.exec_command(flags, line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    self.set_error_msg(&e.to_string());
                    println!("?");
                    if self.verbose {
                        println!("{}", e);
                    }
                    had_error = true;
                    // Redirected input cannot recover from a failed
                    // command; a terminal session keeps going.
                    if !interactive {
                        break;
                    }
                }
            }
        }

        if had_error && !startup.loose_exit {
            ExitStatus::Environmental
        } else {
            ExitStatus::Normal
        }
    }
}
