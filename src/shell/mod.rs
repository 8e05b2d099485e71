// Composition root for the tracker.
//
// Responsibilities
// - Read configuration from the environment.
// - Pick the store implementation and wire it into the use case handlers.
// - Expose the handlers over HTTP and GraphQL.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
