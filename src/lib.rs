pub mod config;
pub mod feed;
pub mod football_data;
pub mod http_client;
pub mod provider;
pub mod schedule;
pub mod seed;
pub mod selection;
pub mod selector;
pub mod state;
pub mod team_db;
