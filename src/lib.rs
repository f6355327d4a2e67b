// Weekly workout plan generation backed by a chat-completion model

pub mod api;
pub mod config;
pub mod models;
pub mod services;
