//! Scripts for deploying and initializing the crowdsale contract suite.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod client;
mod commands;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod migrations;
pub mod plan_file;
