pub mod dispatcher;
pub mod error;
pub mod locator;
pub mod routes;
pub mod tally;
