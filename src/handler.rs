//! Handler trait and type erasure.
//!
//! A handler is any `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
//! That covers plain `async fn`s as well as closures that capture shared
//! state and forward to an `async fn`:
//!
//! ```rust
//! use std::sync::Arc;
//! use catalog::{Method, Request, Router};
//! use catalog::item::Item;
//! use catalog::store::{KeyedStore, Store};
//!
//! async fn count(store: Arc<KeyedStore<Item>>, _req: Request) -> String {
//!     store.len().to_string()
//! }
//!
//! let store = Arc::new(KeyedStore::new());
//! let app = Router::new()
//!     .on(Method::GET, "/count", move |req| count(Arc::clone(&store), req));
//! ```
//!
//! The router keeps handlers of different concrete types in one table, so each
//! is boxed behind [`ErasedHandler`] once at registration. Per request the
//! cost is one `Arc` clone and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A boxed future resolving to a [`Response`]. `Send + 'static` so tokio can
/// run it on any worker thread.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` because it appears in the signature of
/// [`Handler::into_boxed_handler`].
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler. Sealed: the blanket impl below
/// is the only one.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
