#![no_std]

pub mod common;
pub mod config;
pub mod integration;
pub mod skey;
