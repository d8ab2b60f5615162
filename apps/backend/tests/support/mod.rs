#![allow(dead_code)]

pub mod harness;
pub mod scripted_rules;
pub mod stalling_sink;
