pub mod context;
pub mod outcome;
pub mod outlet;
pub mod ports;
pub mod queries;
pub mod search;
pub mod state;
pub mod synthesize;
pub mod workflow;
