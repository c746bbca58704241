//! Extension point for backends that run jobs inside container images.

pub mod localhost;

pub use localhost::LocalhostExecutor;

/// A backend able to start, poll and stop jobs.
pub trait JobExecutor: Send + Sync {
    /// Run `commands` inside `image`. Returns an instance id when the job was
    /// started, or `None` when the backend did not start anything.
    fn start(&self, image: &str, commands: &[String]) -> Option<String>;

    fn is_running(&self, instance: &str) -> bool;

    fn stop(&self, instance: &str);
}
