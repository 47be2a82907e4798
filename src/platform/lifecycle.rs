//! Page visibility lifecycle
//!
//! `pagehide` fires both when the page is discarded and when it is frozen
//! into the back/forward cache. Only the first may release the frame loop
//! and listeners; a frozen page comes back through `pageshow` and must keep
//! running.

/// What the host should do after a page transition event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Nothing to do
    None,
    /// Page is frozen; keep every resource
    Suspend,
    /// Page restored from the cache; restart frame pacing
    Resume,
    /// Page is going away; release the frame loop and listeners
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLifecycle {
    #[default]
    Running,
    Suspended,
    Released,
}

impl PageLifecycle {
    pub fn on_page_hide(&mut self, persisted: bool) -> PageAction {
        match (*self, persisted) {
            (PageLifecycle::Released, _) => PageAction::None,
            (_, true) => {
                *self = PageLifecycle::Suspended;
                PageAction::Suspend
            }
            (_, false) => {
                *self = PageLifecycle::Released;
                PageAction::Release
            }
        }
    }

    pub fn on_page_show(&mut self, persisted: bool) -> PageAction {
        match (*self, persisted) {
            (PageLifecycle::Suspended, true) => {
                *self = PageLifecycle::Running;
                PageAction::Resume
            }
            _ => PageAction::None,
        }
    }

    pub fn is_running(self) -> bool {
        self == PageLifecycle::Running
    }
}
