mod concurrency;
mod config_pipeline;
mod csrf_flow;
mod directory_login;
mod ip_allow_list;
mod profile_persistence;
