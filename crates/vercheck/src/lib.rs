//! An HTTP service answering which of two [PEP 440](https://peps.python.org/pep-0440/)
//! version numbers is newer.
//!
//! The binary in `main.rs` parses the command line and hands a bound listener to
//! [`server::serve`], which routes every request through [`routes::handle`]. The
//! version semantics themselves live in the `vercheck-pep440` crate.

pub mod logging;
pub mod routes;
pub mod server;
