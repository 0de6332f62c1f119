// src/lib.rs

//! procon-gardener: archives accepted AtCoder submissions

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
