// src/lib.rs
//! Recover TON wallets from a pasted recovery phrase and report what they hold.
//!
//! The pipeline is linear: [`service::checker::read_text`] collects input,
//! [`core::extract`] finds the 24 words, [`core::wallet`] derives one address
//! per wallet version and id, [`service::FundsResolver`] queries toncenter and
//! tonapi, and [`report`] prints the result.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod core;
pub mod network;
pub mod report;
pub mod service;
