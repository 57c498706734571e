//! Plant Doctor CLI
//!
//! 葉の写真を解析サービスに送り、診断結果をターミナルに表示する

pub mod cli;
pub mod client;
pub mod config;
pub mod decoder;
pub mod error;
pub mod flow;
pub mod interactive;
pub mod logging;
pub mod report;
