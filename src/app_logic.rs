/*
 * This module provides the host-facing layer of the extension, centered around
 * `ShellMenuHandler`, which answers the menu host's questions about the
 * command tree and turns clicks into planned process launches.
 * Unit tests for `ShellMenuHandler` are in `handler_tests.rs`.
 */
pub mod handler;


pub use handler::ShellMenuHandler;
