//! Transport layer contract
//!
//! The message core consumes transports through the [`Transport`] trait
//! only; concrete implementations (stdio, HTTP streams, WebSockets) live in
//! separate crates.

pub mod traits;

pub use traits::{
    CloseHandler, ErrorHandler, HandlerFuture, MessageHandler, ResumptionTokenHandler, Transport,
    TransportHandlers, TransportSendOptions,
};
