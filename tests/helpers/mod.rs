#![allow(dead_code)]

pub mod generation_helpers;
pub mod source_fixtures;
