// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;

pub mod csv;
pub mod export;
pub mod file;
pub mod model;
pub mod progress;
pub mod ranking;
pub mod render;
pub mod results;
pub mod store;
pub mod trigger;
