//! # IO Layer
//!
//! Interface layer exposing the domain to presentation frontends. Only the
//! REST surface lives here; screen layout and navigation belong to whatever
//! client consumes these routes.

pub mod rest;
