//! Attendance aggregation and muster roll reporting.
//!
//! This crate folds raw step-in/step-out attendance records and an employee
//! directory into a per-employee, per-day muster roll with totals, and
//! renders it as an on-screen table, a spreadsheet or a paginated document.
//! It also builds day-by-day shift summaries from an upstream attendance API.

#![warn(missing_docs)]

pub mod aggregation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod source;
pub mod view;
