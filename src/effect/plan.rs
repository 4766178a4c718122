use crate::effect::{classes::BlockClass, settings::BlockSettings};

/// Per-container memory carried from one frame to the next.
///
/// `None` means "not yet observed", so the first frame after a (re)init
/// always writes classes and visibility styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContainerState {
    /// Raw active index (`-1` / `block_count` sentinels allowed).
    pub active: Option<i64>,
    pub next: Option<usize>,
    pub in_viewport: Option<bool>,
}

/// One DOM write against a block, addressed by its index in the container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum EffectOp {
    Class {
        block: usize,
        class: BlockClass,
        on: bool,
    },
    Opacity {
        block: usize,
        value: f64,
    },
    Translate {
        block: usize,
        offset: f64,
    },
}

/// DOM writes for one container and the state to remember afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FramePlan {
    pub state: ContainerState,
    pub ops: Vec<EffectOp>,
}

fn block_at(raw: Option<i64>, block_count: usize) -> Option<usize> {
    let raw = raw?;
    if raw < 0 || raw as u64 >= block_count as u64 {
        return None;
    }
    Some(raw as usize)
}

/// Diff `prev` against freshly computed `settings` and emit only the writes
/// that changed: class toggles on index change, visibility resets on
/// viewport enter/leave, then the active block's transform and opacity.
pub fn plan_frame(
    prev: ContainerState,
    settings: &BlockSettings,
    in_viewport: bool,
    block_count: usize,
) -> FramePlan {
    let mut ops = Vec::new();
    let raw_active = settings.active.raw(block_count);
    let active = settings.active.block();
    let next = (settings.next < block_count).then_some(settings.next);

    match (prev.in_viewport, in_viewport) {
        (Some(false), false) | (Some(true), true) => {}
        (_, false) => {
            ops.extend((0..block_count).map(|block| EffectOp::Opacity { block, value: 1.0 }));
        }
        (_, true) => {
            ops.extend((0..block_count).map(|block| EffectOp::Opacity { block, value: 0.0 }));
        }
    }

    let active_changed = prev.active != Some(raw_active);
    let next_changed = prev.next != next;

    if active_changed {
        if let Some(prev_block) = block_at(prev.active, block_count) {
            ops.push(EffectOp::Class {
                block: prev_block,
                class: BlockClass::Active,
                on: false,
            });
            ops.push(EffectOp::Opacity {
                block: prev_block,
                value: 0.0,
            });
        }
        if let Some(block) = active {
            ops.push(EffectOp::Class {
                block,
                class: BlockClass::Active,
                on: true,
            });
        }
    }

    if next_changed {
        if let Some(block) = prev.next.filter(|&b| b < block_count) {
            ops.push(EffectOp::Class {
                block,
                class: BlockClass::Next,
                on: false,
            });
        }
        if let Some(block) = next {
            ops.push(EffectOp::Class {
                block,
                class: BlockClass::Next,
                on: true,
            });
        }
    }

    if active_changed || next_changed {
        let prev_active = block_at(prev.active, block_count);
        let prev_next = prev.next.filter(|&b| b < block_count);
        for stale in [prev_next, prev_active].into_iter().flatten() {
            if Some(stale) != active && Some(stale) != next {
                ops.push(EffectOp::Class {
                    block: stale,
                    class: BlockClass::WillChange,
                    on: false,
                });
            }
        }
        for live in [active, next].into_iter().flatten() {
            ops.push(EffectOp::Class {
                block: live,
                class: BlockClass::WillChange,
                on: true,
            });
        }
    }

    if let Some(block) = active {
        ops.push(EffectOp::Translate {
            block,
            offset: settings.offset,
        });
        if let Some(value) = settings.opacity {
            ops.push(EffectOp::Opacity { block, value });
        }
    }

    FramePlan {
        state: ContainerState {
            active: Some(raw_active),
            next,
            in_viewport: Some(in_viewport),
        },
        ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/plan.rs"]
mod tests;
