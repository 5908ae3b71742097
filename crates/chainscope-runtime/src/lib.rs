#![forbid(unsafe_code)]

//! Elm-style program runtime: update/view loop, effect commands, and
//! threaded background tasks.

pub mod program;

pub use program::{Cmd, Model, Program, ProgramConfig};
