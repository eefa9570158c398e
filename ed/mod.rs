//
// Copyright (c) 2024 Hemi Labs, Inc.
//
// This file is part of the posixutils-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Startup subsystem for the ed line editor.
//!
//! Covers command-line handling, process-wide mode flags, restricted-mode
//! access checks and the initial-file-load protocol. The editing engine
//! proper sits behind the narrow [`session::Session`] contract.

pub mod access;
pub mod cli;
pub mod error;
pub mod session;
pub mod startup;

pub const PROJECT_NAME: &str = "posixutils-ed";
