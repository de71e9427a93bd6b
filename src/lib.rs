//! Dinedex - Restaurant Directory Service
//!
//! REST API for registering users and managing restaurant listings with
//! geocoded addresses and S3-backed image galleries.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
