#![forbid(unsafe_code)]

//! ChainScope explorer: a terminal supply-chain risk explorer composing an
//! interactive risk tree, a global hotspot map, an alert feed, and a
//! regulations lookup over a pluggable backend data source.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod demo;
pub mod screens;
pub mod theme;
