//! Command line host for booklink: loads a site description, wires the
//! open-file capability and runs the render, presence and check commands.
//! The modules are public for the integration tests.
pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod site;
