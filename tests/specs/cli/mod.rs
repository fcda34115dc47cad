// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for the `pipeboard` binary.

mod common;
mod completion;
mod directory;
mod errors;
mod help;
mod hook;
mod init;
mod sync;
