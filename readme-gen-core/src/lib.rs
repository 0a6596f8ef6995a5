#![doc = "readme-gen-core: core pipeline library for readme-gen."]

//! This crate contains all data models and pipeline steps for readme-gen:
//! read a GitHub repository, compose the README prompt, call the hosted
//! model, and keep the result in an explicit session.
//!
//! # Usage
//! The CLI crate depends on this one for everything except argument parsing,
//! credential loading and terminal rendering.

pub mod artifact;
pub mod config;
pub mod contract;
pub mod error;
pub mod generation;
pub mod github;
pub mod model;
pub mod prompt;
pub mod reader;
pub mod repo_url;
pub mod session;

pub use error::{ReadmeError, Severity, SourceError};
pub use model::{Analysis, GeneratedReadme, KeyFile, RepositoryInfo};
