// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod completion_signaling;
pub mod config;
pub mod coordinator;
pub mod corpus;
pub mod error;
pub mod executor;
pub mod map_worker;
pub mod mapper;
pub mod reducer;
pub mod report;
pub mod shutdown_signal;
pub mod sweep;
pub mod tokenizer;
pub mod utils;
pub mod word_table;
pub mod work_sender;
pub mod worker;
pub mod worker_factory;
pub mod worker_io;
pub mod worker_runtime;

pub use error::{Result, WordCountError};
