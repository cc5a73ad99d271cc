//! Small platform seams so the shared views stay target-agnostic.

/// Fire-and-forget future. Used for the deferred export pipelines; they
/// always target the latest render, so there is nothing to cancel.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// On desktop the export pipelines are cheap enough to run to completion on
/// the UI thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    futures::executor::block_on(future)
}
