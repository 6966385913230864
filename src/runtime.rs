//! Runtime abstraction layer for async operations
//!
//! Background work (the autoplay ticker) is spawned through an
//! [`AsyncSpawner`] so callers only hold an object-safe [`AsyncHandle`].

use std::future::Future;
use std::pin::Pin;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;

    /// Whether a task can be spawned from the calling thread
    fn is_available(&self) -> bool;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Spawns `future` on the global runtime
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::debug!("runtime::spawn() - spawning new async task");
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    pub mod tokio_impl {
        use super::*;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                let handle = ::tokio::spawn(future);
                Box::new(TokioHandle(handle))
            }

            fn is_available(&self) -> bool {
                ::tokio::runtime::Handle::try_current().is_ok()
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }

        impl Drop for TokioHandle {
            fn drop(&mut self) {
                self.0.abort();
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| Box::new(spawners::tokio_impl::TokioSpawner))
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[::tokio::test]
    async fn test_spawn_runs_task() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let handle = spawn(async move {
            flag.store(true, Ordering::SeqCst);
        });

        for _ in 0..50 {
            if handle.is_finished() {
                break;
            }
            ::tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(handle.is_finished());
        assert!(ran.load(Ordering::SeqCst));
    }

    #[::tokio::test]
    async fn test_cancel_stops_task() {
        let handle = spawn(async {
            ::tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        });

        handle.cancel();
        ::tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(handle.is_finished());
    }

    #[test]
    fn test_unavailable_outside_runtime() {
        assert!(!runtime().is_available());
    }
}
