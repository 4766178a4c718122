/// Work to run on the next animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
pub enum FrameJob {
    /// Recompute block settings for every prepared container.
    Update,
    /// Unmake, revalidate and remake every container, then update.
    Reinit,
}

/// What happened to a frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// No frame was pending; the caller must ask the host for one.
    Scheduled,
    /// A pending update was promoted to a reinit; no new frame needed.
    Upgraded,
    /// A frame with equal or stronger work is already pending.
    Coalesced,
}

/// The tick flag: at most one animation frame is outstanding at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameGate {
    pending: Option<FrameJob>,
}

impl FrameGate {
    pub fn is_ticking(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameJob> {
        self.pending
    }

    pub fn request(&mut self, job: FrameJob) -> GateOutcome {
        match self.pending {
            None => {
                self.pending = Some(job);
                GateOutcome::Scheduled
            }
            Some(current) if job > current => {
                self.pending = Some(job);
                GateOutcome::Upgraded
            }
            Some(_) => GateOutcome::Coalesced,
        }
    }

    /// Take the pending job, releasing the tick.
    pub fn take(&mut self) -> Option<FrameJob> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
