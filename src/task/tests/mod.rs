//! Unit tests for the task module.
//!
//! Tests are organised by layer: domain values, the two repository adapters,
//! the action service and the list controller.

mod support;
