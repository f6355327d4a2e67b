// API routes and handlers

pub mod health;
pub mod plan_week;
pub mod routes;
