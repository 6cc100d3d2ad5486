use crate::error::SendResult;
use std::future::Future;
use tokio::task::JoinHandle;

/// Runs `future` on the Tokio runtime and hands its result to `callback` once.
pub fn spawn_with_callback<T, Fut, F>(future: Fut, callback: F) -> JoinHandle<()>
where
    T: Send + 'static,
    Fut: Future<Output = SendResult<T>> + Send + 'static,
    F: FnOnce(SendResult<T>) + Send + 'static,
{
    tokio::spawn(async move {
        let result = future.await;
        callback(result);
    })
}
