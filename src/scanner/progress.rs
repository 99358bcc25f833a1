//! 进度观察者：编排器每完成一个URL回调一次，不依赖任何UI

/// 进度观察者
pub trait ProgressObserver: Send + Sync {
    /// `completed` 严格递增，最终等于 `total`
    fn on_progress(&self, completed: usize, total: usize);
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// 忽略进度
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _completed: usize, _total: usize) {}
}
