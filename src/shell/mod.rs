// Composition root for the webhook receiver.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the file system webhook store.
// - Wire the store into the receive handler and expose it over HTTP.

pub mod config;
pub mod http;
pub mod state;
