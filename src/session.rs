/// ┌──────────── Click Handling ─────────────────────────────────────────┐
/// │  Phase     running   frame pending  │  click ->                     │
/// ├─────────────────────────────────────┼───────────────────────────────┤
/// │  Unloaded  false     -              │  StartLoading (running=true)  │
/// │  Loading   any       -              │  None (flag flips only)       │
/// │  Loaded    false     false          │  StartLoop    (running=true)  │
/// │  Loaded    false     true           │  None  (pending frame resumes)│
/// │  any       true      any            │  Stop         (running=false) │
/// └─────────────────────────────────────┴───────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Unloaded,
    Loading,
    Loaded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickAction {
    StartLoading,
    StartLoop,
    Stop,
    None,
}

#[derive(Debug)]
pub struct Session {
    running: bool,
    phase: Phase,
    frame_pending: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            running: false,
            phase: Phase::Unloaded,
            frame_pending: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// An animation callback is queued and has not yet seen the run flag
    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn on_click(&mut self) -> ClickAction {
        if self.running {
            self.running = false;
            return ClickAction::Stop;
        }

        self.running = true;
        match self.phase {
            Phase::Unloaded => {
                self.phase = Phase::Loading;
                ClickAction::StartLoading
            }
            Phase::Loading => ClickAction::None,
            // a frame that has not yet seen the cleared flag just keeps going
            Phase::Loaded if self.frame_pending => ClickAction::None,
            Phase::Loaded => ClickAction::StartLoop,
        }
    }

    /// Returns whether the loop should start right away
    pub fn loaded(&mut self) -> bool {
        self.phase = Phase::Loaded;
        self.running && !self.frame_pending
    }

    /// Load failed : back to the title screen, next click retries
    pub fn load_failed(&mut self) {
        self.phase = Phase::Unloaded;
        self.running = false;
    }

    pub fn frame_scheduled(&mut self) {
        self.frame_pending = true;
    }

    pub fn frame_ended(&mut self) {
        self.frame_pending = false;
    }

    /// Loop died on its own (module trapped, no window ...)
    pub fn halt(&mut self) {
        self.running = false;
        self.frame_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_starts_loading_and_running() {
        let mut session = Session::new();
        assert_eq!(session.on_click(), ClickAction::StartLoading);
        assert!(session.is_running());
        assert_eq!(session.phase(), Phase::Loading);
    }

    #[test]
    fn clicking_toggles_running_state() {
        let mut session = Session::new();
        session.on_click();
        assert!(session.loaded());
        session.frame_scheduled();

        assert_eq!(session.on_click(), ClickAction::Stop);
        assert!(!session.is_running());
        session.frame_ended();

        assert_eq!(session.on_click(), ClickAction::StartLoop);
        assert!(session.is_running());
    }

    #[test]
    fn module_is_loaded_only_once() {
        let mut session = Session::new();
        session.on_click();
        assert_eq!(session.on_click(), ClickAction::Stop);
        // resumed while the fetch is still in flight
        assert_eq!(session.on_click(), ClickAction::None);
        assert!(session.is_running());
        assert!(session.loaded());
    }

    #[test]
    fn paused_while_loading_does_not_start_loop() {
        let mut session = Session::new();
        session.on_click();
        session.on_click();
        assert!(!session.loaded());
        assert_eq!(session.on_click(), ClickAction::StartLoop);
    }

    #[test]
    fn quick_pause_resume_reuses_pending_frame() {
        let mut session = Session::new();
        session.on_click();
        session.loaded();
        session.frame_scheduled();
        session.on_click();
        // pending frame has not run yet, it will see running=true again
        assert_eq!(session.on_click(), ClickAction::None);
        assert!(session.is_running());
    }

    #[test]
    fn failed_load_allows_retry() {
        let mut session = Session::new();
        session.on_click();
        session.load_failed();
        assert!(!session.is_running());
        assert_eq!(session.on_click(), ClickAction::StartLoading);
    }

    #[test]
    fn halted_loop_restarts_on_next_click() {
        let mut session = Session::new();
        session.on_click();
        session.loaded();
        session.frame_scheduled();
        session.halt();
        assert_eq!(session.on_click(), ClickAction::StartLoop);
    }
}
