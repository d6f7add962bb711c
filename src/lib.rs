//! # Pordego (Authentication Gate)
//!
//! `pordego` answers one question: given a candidate identity (email) and
//! secret (password), may a session be granted — and if not, which remediation
//! should the caller offer?
//!
//! ## The gate
//!
//! The decision procedure lives in [`gate`] and consumes two collaborators
//! behind traits: a [`gate::store::CredentialStore`] (account lookup, absence
//! is a normal result) and a [`gate::hasher::SecretHasher`] (slow, salted
//! password verification). The gate never mutates accounts; registration,
//! verification, and approval workflows are external.
//!
//! ## Anti-enumeration
//!
//! An unknown identity and a wrong secret produce the same
//! `Invalid credentials` denial, and an unknown identity still pays for one
//! hash verification so the miss is not observably faster. This merged branch
//! is intentional; do not split it into distinct messages.
//!
//! ## Service surface
//!
//! The HTTP binding (`POST /v1/auth/login`, `GET /health`, Swagger UI at
//! `/docs`) is wired in [`pordego`]; the [`cli`] module handles flags,
//! environment configuration, and telemetry setup.

pub mod cli;
pub mod gate;
pub mod pordego;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
