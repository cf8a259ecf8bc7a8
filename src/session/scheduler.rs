use std::fmt;

/// Why a layout pass was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutReason {
    DocumentChanged,
    LevelChanged,
    NodeToggled,
    DirectionChanged,
    SizeModeChanged,
}

/// A layout pass waiting to run against whatever the state is when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRequest {
    pub generation: u64,
    pub reason: LayoutReason,
    pub fit_view: bool,
}

/// Coalesces layout requests so that only the newest one ever runs.
#[derive(Debug, Default)]
pub struct LayoutScheduler {
    generation: u64,
    pending: Option<LayoutRequest>,
}

impl LayoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a pass, superseding any pass still waiting. A superseded pass
    /// that asked for a viewport fit passes that on to its successor.
    pub fn request(&mut self, reason: LayoutReason, fit_view: bool) -> u64 {
        self.generation += 1;
        let fit_view = fit_view || self.pending.is_some_and(|p| p.fit_view);
        self.pending = Some(LayoutRequest {
            generation: self.generation,
            reason,
            fit_view,
        });
        self.generation
    }

    pub fn take(&mut self) -> Option<LayoutRequest> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl fmt::Display for LayoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LayoutReason::DocumentChanged => "document changed",
            LayoutReason::LevelChanged => "level changed",
            LayoutReason::NodeToggled => "node toggled",
            LayoutReason::DirectionChanged => "direction changed",
            LayoutReason::SizeModeChanged => "size mode changed",
        };
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut scheduler = LayoutScheduler::new();
        let first = scheduler.request(LayoutReason::NodeToggled, false);
        let second = scheduler.request(LayoutReason::DirectionChanged, false);
        assert!(second > first);

        let request = scheduler.take().unwrap();
        assert_eq!(request.generation, second);
        assert_eq!(request.reason, LayoutReason::DirectionChanged);
        assert!(scheduler.take().is_none());
    }

    #[test]
    fn test_fit_request_survives_coalescing() {
        let mut scheduler = LayoutScheduler::new();
        scheduler.request(LayoutReason::DocumentChanged, true);
        scheduler.request(LayoutReason::NodeToggled, false);
        assert!(scheduler.take().unwrap().fit_view);
    }
}
