mod app_flow;
mod persistence;
