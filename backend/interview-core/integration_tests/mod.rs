mod analysis;
mod call;
mod execution;
mod server;
