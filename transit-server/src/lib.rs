//! Transit arrivals backend.
//!
//! Proxies live train arrival predictions from the CTA Train Tracker API
//! and serves a normalized station list (one record per station, with the
//! set of lines calling there) to a front end.

pub mod config;
pub mod domain;
mod lenient;
pub mod stations;
pub mod tracker;
pub mod web;
