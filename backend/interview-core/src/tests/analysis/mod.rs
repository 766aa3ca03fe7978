mod client;
mod repo;
