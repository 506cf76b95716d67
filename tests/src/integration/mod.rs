//! # Integration Scenarios
//!
//! Every test runs the real account logic through the runtime: messages are
//! encoded to cells, queued, executed, bounced and read back through
//! get-methods.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod authorization;
#[cfg(test)]
mod node_flows;
#[cfg(test)]
mod supply;
