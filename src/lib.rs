//! AsanaSense: a small HTTP service that relays an uploaded yoga pose
//! image to a multimodal generative model and returns the model's
//! spoken-style feedback.

pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod services;
pub mod startup;
