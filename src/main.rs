#![allow(warnings)]
//! Join Frontend Entry Point

mod actions;
mod app;
mod board;
mod browser;
mod commands;
mod components;
mod config;
mod contacts;
mod context;
mod error;
mod logging;
mod models;
mod remote;
mod search;
mod session;
mod store;
mod subtasks;
mod summary;
mod sync;
mod validation;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(AppConfig::from_env().log_level);
    mount_to_body(App);
}
