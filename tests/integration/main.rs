//! Integration tests for the test tree synchronization engine

mod change_notifications;
mod invalidation;
mod resolve;
mod suspending;
