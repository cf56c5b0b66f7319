//! Transport layer contract
//!
//! Module defines the narrow interface the message core consumes from a
//! transport: start, send, close, and observer registration for inbound
//! messages, close, and errors. The core holds no transport state beyond the
//! callback chain; concrete transports (stdio pipes, HTTP streams,
//! WebSockets) live outside this crate and only need to deliver complete
//! JSON-RPC messages in order.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::error::{McpError, McpResult};
use crate::protocol::jsonrpc::{JsonRpcMessage, RequestId};

/// Boxed future produced by async message handlers
pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Async handler invoked for each inbound message
pub type MessageHandler = Arc<dyn Fn(JsonRpcMessage) -> HandlerFuture + Send + Sync>;

/// Observer invoked when the transport closes
pub type CloseHandler = Arc<dyn Fn() + Send + Sync>;

/// Observer invoked when the transport reports an error
pub type ErrorHandler = Arc<dyn Fn(McpError) + Send + Sync>;

/// Callback invoked whenever the transport updates its resumption token
pub type ResumptionTokenHandler = Arc<dyn Fn(String) + Send + Sync>;

/// Per-send options a caller may attach to an outbound message
#[derive(Clone, Default)]
pub struct TransportSendOptions {
    /// Request this message relates to (responses, progress streams)
    pub related_request_id: Option<RequestId>,
    /// Token to resume an interrupted delivery stream from
    pub resumption_token: Option<String>,
    /// Invoked whenever the transport updates its resumption token
    pub on_resumption_token: Option<ResumptionTokenHandler>,
}

impl std::fmt::Debug for TransportSendOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportSendOptions")
            .field("related_request_id", &self.related_request_id)
            .field("resumption_token", &self.resumption_token)
            .field(
                "on_resumption_token",
                &self.on_resumption_token.as_ref().map(|_| "<handler>"),
            )
            .finish()
    }
}

impl TransportSendOptions {
    pub fn related_to(request_id: RequestId) -> Self {
        Self {
            related_request_id: Some(request_id),
            ..Default::default()
        }
    }
}

/// The interface the message core consumes from a transport.
///
/// Implementations must preserve per-connection message order and deliver
/// each frame as one complete JSON-RPC message.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Initiate the underlying connection; may suspend on I/O
    async fn start(&mut self) -> McpResult<()>;

    /// Transmit one encoded JSON-RPC message
    async fn send(
        &mut self,
        message: JsonRpcMessage,
        options: TransportSendOptions,
    ) -> McpResult<()>;

    /// Gracefully terminate; triggers the close observers exactly once
    async fn close(&mut self) -> McpResult<()>;

    /// Register an async handler for inbound messages.
    ///
    /// Handlers registered before the transport produces any message must not
    /// miss messages; handlers registered later chain after existing ones.
    fn on_message(&self, handler: MessageHandler);

    /// Register a close observer; fires at most once
    fn on_close(&self, handler: CloseHandler);

    /// Register an error observer; errors do not implicitly close
    fn on_error(&self, handler: ErrorHandler);
}

/// The callback chain backing a [`Transport`] implementation.
///
/// Transports embed one of these and forward their trait registration
/// methods to it; the emit methods drive the registered observers with the
/// contract's ordering and at-most-once close semantics.
#[derive(Default)]
pub struct TransportHandlers {
    message_handlers: Mutex<Vec<MessageHandler>>,
    close_handlers: Mutex<Vec<CloseHandler>>,
    error_handlers: Mutex<Vec<ErrorHandler>>,
    closed: AtomicBool,
}

impl TransportHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message handler to the chain
    pub fn on_message(&self, handler: MessageHandler) {
        self.message_handlers
            .lock()
            .expect("message handler lock poisoned")
            .push(handler);
    }

    /// Append a close observer
    pub fn on_close(&self, handler: CloseHandler) {
        self.close_handlers
            .lock()
            .expect("close handler lock poisoned")
            .push(handler);
    }

    /// Append an error observer
    pub fn on_error(&self, handler: ErrorHandler) {
        self.error_handlers
            .lock()
            .expect("error handler lock poisoned")
            .push(handler);
    }

    /// Drive every message handler, in registration order, awaiting each
    pub async fn emit_message(&self, message: JsonRpcMessage) {
        let handlers: Vec<MessageHandler> = self
            .message_handlers
            .lock()
            .expect("message handler lock poisoned")
            .clone();
        for handler in handlers {
            handler(message.clone()).await;
        }
    }

    /// Notify error observers; the transport stays open
    pub fn emit_error(&self, error: McpError) {
        let handlers: Vec<ErrorHandler> = self
            .error_handlers
            .lock()
            .expect("error handler lock poisoned")
            .clone();
        for handler in handlers {
            handler(error.clone());
        }
    }

    /// Notify close observers.
    ///
    /// Returns true the first time; concurrent or repeated close attempts
    /// return false and fire nothing.
    pub fn emit_close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        let handlers: Vec<CloseHandler> = self
            .close_handlers
            .lock()
            .expect("close handler lock poisoned")
            .clone();
        for handler in handlers {
            handler();
        }
        true
    }

    /// Whether the close observers have fired
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for TransportHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportHandlers")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::jsonrpc::JsonRpcNotification;
    use crate::protocol::methods::Method;
    use std::sync::atomic::AtomicUsize;

    fn ping_message() -> JsonRpcMessage {
        JsonRpcMessage::Notification(JsonRpcNotification::new(Method::Initialized, None))
    }

    #[tokio::test]
    async fn test_message_handlers_chain_in_registration_order() {
        let handlers = TransportHandlers::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            handlers.on_message(Arc::new(move |_message| {
                let order = Arc::clone(&order);
                Box::pin(async move {
                    order.lock().unwrap().push(tag);
                })
            }));
        }

        handlers.emit_message(ping_message()).await;
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_close_fires_at_most_once() {
        let handlers = TransportHandlers::new();
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            handlers.on_close(Arc::new(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert!(handlers.emit_close());
        assert!(!handlers.emit_close());
        assert!(!handlers.emit_close());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(handlers.is_closed());
    }

    #[test]
    fn test_concurrent_close_fires_once() {
        let handlers = Arc::new(TransportHandlers::new());
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            handlers.on_close(Arc::new(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }));
        }

        let threads: Vec<_> = (0..8)
            .map(|_| {
                let handlers = Arc::clone(&handlers);
                std::thread::spawn(move || handlers.emit_close())
            })
            .collect();
        let wins: usize = threads
            .into_iter()
            .map(|t| usize::from(t.join().unwrap()))
            .sum();

        assert_eq!(wins, 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_errors_do_not_close() {
        let handlers = TransportHandlers::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            handlers.on_error(Arc::new(move |error| {
                seen.lock().unwrap().push(error.to_string());
            }));
        }

        handlers.emit_error(McpError::protocol("bad frame"));
        assert!(!handlers.is_closed());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
