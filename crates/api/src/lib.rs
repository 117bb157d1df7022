//! HTTP surface: server-rendered catalog pages, page loaders, and a JSON API.

pub mod app;
