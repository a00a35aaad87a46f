#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod encode;
pub mod error;
pub mod tokenize;
pub mod types;
