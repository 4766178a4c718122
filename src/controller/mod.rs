//! The sticky parallax controller: lifecycle, event coalescing and the
//! per-frame compute/apply loop.

pub mod lifecycle;
pub mod schedule;

use crate::{
    config::options::ParallaxOptions,
    effect::{plan::plan_frame, settings::compute_block_settings},
    foundation::core::{NodeId, Viewport},
    foundation::error::{ParallaxError, ParallaxResult},
    host::{DomHost, HostEvent, ListenerId, apply_ops},
};

use lifecycle::{Assessment, PreparedContainer, Rejection};
use schedule::{FrameGate, FrameJob, GateOutcome};

/// Containers accepted and rejected by the latest (re)initialization.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct InitReport {
    pub accepted: Vec<NodeId>,
    pub rejected: Vec<Rejection>,
}

/// Serializable view of one prepared container after its latest frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ContainerSnapshot {
    pub container: NodeId,
    pub block_count: usize,
    /// Signed active index: `-1` before the first block, `block_count` after the last.
    pub active: Option<i64>,
    pub next: Option<usize>,
    pub offset: Option<f64>,
    pub opacity: Option<f64>,
    pub in_viewport: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
}

/// Drives the effect for every container matching one selector.
///
/// Each instance owns its state, so several controllers can run side by
/// side on the same host. `start` registers `scroll`/`resize` listeners;
/// `stop` removes them and restores the document.
#[derive(Debug)]
pub struct StickyParallax {
    options: ParallaxOptions,
    phase: Phase,
    viewport: Option<Viewport>,
    containers: Vec<NodeId>,
    prepared: Vec<PreparedContainer>,
    rejected: Vec<Rejection>,
    gate: FrameGate,
    listeners: Vec<ListenerId>,
}

impl StickyParallax {
    pub fn new(options: ParallaxOptions) -> ParallaxResult<Self> {
        if let Err(err) = options.validate() {
            tracing::error!(error = %err, "sticky parallax called with invalid arguments");
            return Err(err);
        }
        Ok(Self {
            options,
            phase: Phase::Idle,
            viewport: None,
            containers: Vec::new(),
            prepared: Vec::new(),
            rejected: Vec::new(),
            gate: FrameGate::default(),
            listeners: Vec::new(),
        })
    }

    pub fn options(&self) -> &ParallaxOptions {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Viewport used by the latest reinit.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Containers currently carrying the effect, in document order.
    pub fn valid_containers(&self) -> Vec<NodeId> {
        self.prepared.iter().map(|p| p.node).collect()
    }

    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    pub fn report(&self) -> InitReport {
        InitReport {
            accepted: self.valid_containers(),
            rejected: self.rejected.clone(),
        }
    }

    /// Pending animation-frame work, if a frame has been requested.
    pub fn pending_frame(&self) -> Option<FrameJob> {
        self.gate.pending()
    }

    pub fn snapshot(&self) -> Vec<ContainerSnapshot> {
        self.prepared
            .iter()
            .map(|p| ContainerSnapshot {
                container: p.node,
                block_count: p.blocks.len(),
                active: p.state.active,
                next: p.state.next,
                offset: p.last.map(|s| s.offset),
                opacity: p.last.and_then(|s| s.opacity),
                in_viewport: p.state.in_viewport,
            })
            .collect()
    }

    /// Resolve containers, take over the valid ones and start listening.
    ///
    /// Fails without touching the document when the selector is malformed
    /// or matches nothing. Containers that do not fit are skipped and
    /// reported, not treated as errors.
    #[tracing::instrument(skip(self, host), fields(selector = %self.options.container_selector))]
    pub fn start<H: DomHost + ?Sized>(&mut self, host: &mut H) -> ParallaxResult<InitReport> {
        if self.is_running() {
            return Err(ParallaxError::validation("controller already started"));
        }

        let selector = self.options.container_selector.as_str();
        let containers = host.query_selector_all(selector).inspect_err(|err| {
            tracing::error!(error = %err, "invalid containerSelector");
        })?;
        if containers.is_empty() {
            tracing::error!("no elements found for containerSelector");
            return Err(ParallaxError::selector(format!(
                "no elements found for containerSelector '{selector}'"
            )));
        }

        self.containers = containers;
        if let Err(err) = self.reinit(host) {
            tracing::error!(error = %err, "initialization failed; restoring containers");
            self.abandon(host);
            return Err(err);
        }
        self.listeners = vec![
            host.add_listener(HostEvent::Resize),
            host.add_listener(HostEvent::Scroll),
        ];
        self.phase = Phase::Running;

        let report = self.report();
        tracing::info!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "sticky parallax started"
        );
        Ok(report)
    }

    /// Remove listeners and give every container back in its original form.
    /// Stopping an idle controller does nothing.
    #[tracing::instrument(skip(self, host))]
    pub fn stop<H: DomHost + ?Sized>(&mut self, host: &mut H) -> ParallaxResult<()> {
        if !self.is_running() {
            return Ok(());
        }
        for id in self.listeners.drain(..) {
            if !host.remove_listener(id) {
                tracing::warn!(?id, "listener was already removed");
            }
        }
        self.phase = Phase::Idle;
        self.gate.clear();

        let prepared = std::mem::take(&mut self.prepared);
        self.containers.clear();
        self.rejected.clear();
        for p in &prepared {
            lifecycle::unmake(host, p)?;
        }
        Ok(())
    }

    /// Feed a window event. Returns true when a new animation frame was
    /// requested from the host; events arriving while a frame is pending
    /// are folded into it.
    pub fn handle_event<H: DomHost + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> bool {
        if !self.is_running() {
            return false;
        }
        let job = match event {
            HostEvent::Scroll => FrameJob::Update,
            HostEvent::Resize => FrameJob::Reinit,
        };
        match self.gate.request(job) {
            GateOutcome::Scheduled => {
                host.request_animation_frame();
                true
            }
            GateOutcome::Upgraded => {
                tracing::debug!(?event, "pending frame upgraded to reinit");
                false
            }
            GateOutcome::Coalesced => {
                tracing::debug!(?event, "event coalesced into pending frame");
                false
            }
        }
    }

    /// Run the work scheduled by [`Self::handle_event`]. The tick is released
    /// before the work runs, so a failing frame never wedges the gate.
    pub fn on_animation_frame<H: DomHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> ParallaxResult<Option<FrameJob>> {
        let job = self.gate.take();
        if !self.is_running() {
            return Ok(None);
        }
        match job {
            Some(FrameJob::Update) => self.update_all(host)?,
            Some(FrameJob::Reinit) => self.reinit(host)?,
            None => {}
        }
        Ok(job)
    }

    /// Unmake every container, re-read the viewport, revalidate and remake.
    /// The only path on which a rejected container can qualify again.
    #[tracing::instrument(skip(self, host), fields(containers = self.containers.len()))]
    pub fn reinit<H: DomHost + ?Sized>(&mut self, host: &mut H) -> ParallaxResult<()> {
        let mut failed = None;
        for p in std::mem::take(&mut self.prepared) {
            if let Err(err) = lifecycle::unmake(host, &p) {
                tracing::warn!(container = %p.node, error = %err, "failed to restore container");
                failed.get_or_insert(err);
            }
        }
        if let Some(err) = failed {
            return Err(err);
        }
        self.rejected.clear();

        let viewport = host.viewport();
        self.viewport = Some(viewport);

        for &container in &self.containers {
            match lifecycle::assess(host, container, &self.options, viewport)? {
                Assessment::Rejected(reason) => {
                    tracing::warn!(%container, %reason, "container rejected");
                    self.rejected.push(Rejection { container, reason });
                }
                Assessment::Eligible { blocks, lockup } => {
                    let p = lifecycle::make(host, container, blocks, lockup, &self.options)?;
                    self.prepared.push(p);
                }
            }
        }

        self.update_all(host)
    }

    /// Give back everything a failed start managed to take over.
    fn abandon<H: DomHost + ?Sized>(&mut self, host: &mut H) {
        for p in std::mem::take(&mut self.prepared) {
            if let Err(err) = lifecycle::unmake(host, &p) {
                tracing::warn!(container = %p.node, error = %err, "failed to restore container");
            }
        }
        self.containers.clear();
        self.rejected.clear();
        self.viewport = None;
        self.gate.clear();
    }

    fn update_all<H: DomHost + ?Sized>(&mut self, host: &mut H) -> ParallaxResult<()> {
        let viewport = match self.viewport {
            Some(v) => v,
            None => host.viewport(),
        };
        for p in &mut self.prepared {
            update_blocks(host, p, &self.options, viewport)?;
        }
        Ok(())
    }
}

/// Compute one frame for `p` and write only what changed.
fn update_blocks<H: DomHost + ?Sized>(
    host: &mut H,
    p: &mut PreparedContainer,
    opts: &ParallaxOptions,
    viewport: Viewport,
) -> ParallaxResult<()> {
    let count = p.blocks.len();
    let rect = host.bounding_rect(p.node)?;
    if !rect.is_finite() {
        return Err(ParallaxError::host(format!(
            "container {} reported a non-finite bounding box",
            p.node
        )));
    }
    let settings = compute_block_settings(rect, viewport.height, count, opts);
    let plan = plan_frame(p.state, &settings, viewport.intersects(rect), count);

    if plan.state.active != p.state.active {
        tracing::debug!(
            container = %p.node,
            active = settings.active.raw(count),
            next = settings.next,
            "active block changed"
        );
    }
    apply_ops(host, &p.blocks, &plan.ops)?;
    p.state = plan.state;
    p.last = Some(settings);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/controller/controller.rs"]
mod tests;
