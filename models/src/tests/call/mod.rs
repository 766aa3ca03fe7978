mod events;
mod session;
mod settings_builder;
mod snapshot;
