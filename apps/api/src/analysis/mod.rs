// Resume analysis records: insert validation, persistence, and HTTP handlers.
// Scoring itself happens elsewhere; this module only stores and serves results.

pub mod handlers;
pub mod store;
pub mod validation;
