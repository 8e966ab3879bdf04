#![warn(clippy::print_stdout)]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

pub mod cli;
pub mod config;
pub mod machine;
pub mod report;
