//! HTTP surface of the skill gateway: router, handlers, and the Kakao
//! wire types.

pub mod handlers;
pub mod kakao;
pub mod request;
pub mod server;

pub use server::{AppState, HttpServer};
