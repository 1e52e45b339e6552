use leptos::prelude::*;
use uniportal::error::{PortalError, PortalResult};
use uniportal::selection::{SelectionCell, SelectionState};

/// 以响应式信号承载选课状态；页面卸载后访问返回存储错误
#[derive(Clone, Copy)]
pub struct SignalCell(pub RwSignal<SelectionState>);

fn disposed() -> PortalError {
    PortalError::storage("course selection view is no longer mounted")
}

impl SelectionCell for SignalCell {
    fn read<R>(&self, f: impl FnOnce(&SelectionState) -> R) -> PortalResult<R> {
        self.0.try_with_untracked(f).ok_or_else(disposed)
    }

    fn write<R>(&self, f: impl FnOnce(&mut SelectionState) -> R) -> PortalResult<R> {
        self.0.try_update(f).ok_or_else(disposed)
    }
}
