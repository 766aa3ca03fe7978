mod app_config;
mod env;
