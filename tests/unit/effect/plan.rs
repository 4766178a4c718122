use super::*;
use crate::effect::settings::ActiveSlot;

fn settings(active: ActiveSlot, next: usize, offset: f64, opacity: Option<f64>) -> BlockSettings {
    BlockSettings {
        active,
        next,
        offset,
        opacity,
    }
}

fn class_ops(plan: &FramePlan) -> Vec<(usize, BlockClass, bool)> {
    plan.ops
        .iter()
        .filter_map(|op| match *op {
            EffectOp::Class { block, class, on } => Some((block, class, on)),
            _ => None,
        })
        .collect()
}

#[test]
fn first_frame_off_screen_resets_opacity_and_marks_next() {
    let s = settings(ActiveSlot::Before, 0, 40.0, None);
    let plan = plan_frame(ContainerState::default(), &s, false, 3);

    let opacities: Vec<_> = plan
        .ops
        .iter()
        .filter(|op| matches!(op, EffectOp::Opacity { value, .. } if *value == 1.0))
        .collect();
    assert_eq!(opacities.len(), 3);
    assert_eq!(
        class_ops(&plan),
        vec![
            (0, BlockClass::Next, true),
            (0, BlockClass::WillChange, true),
        ]
    );
    assert!(
        !plan
            .ops
            .iter()
            .any(|op| matches!(op, EffectOp::Translate { .. }))
    );
    assert_eq!(
        plan.state,
        ContainerState {
            active: Some(-1),
            next: Some(0),
            in_viewport: Some(false),
        }
    );
}

#[test]
fn unchanged_indices_only_rewrite_the_active_style() {
    let prev = ContainerState {
        active: Some(1),
        next: Some(2),
        in_viewport: Some(true),
    };
    let s = settings(ActiveSlot::Block(1), 2, -5.0, Some(1.0));
    let plan = plan_frame(prev, &s, true, 3);
    assert_eq!(
        plan.ops,
        vec![
            EffectOp::Translate {
                block: 1,
                offset: -5.0
            },
            EffectOp::Opacity {
                block: 1,
                value: 1.0
            },
        ]
    );
    assert_eq!(plan.state, prev);
}

#[test]
fn entering_viewport_hides_every_block_first() {
    let prev = ContainerState {
        active: Some(-1),
        next: Some(0),
        in_viewport: Some(false),
    };
    let s = settings(ActiveSlot::Before, 0, 40.0, None);
    let plan = plan_frame(prev, &s, true, 2);
    assert_eq!(
        plan.ops,
        vec![
            EffectOp::Opacity {
                block: 0,
                value: 0.0
            },
            EffectOp::Opacity {
                block: 1,
                value: 0.0
            },
        ]
    );
}

#[test]
fn advancing_moves_classes_and_hides_previous_block() {
    let prev = ContainerState {
        active: Some(0),
        next: Some(1),
        in_viewport: Some(true),
    };
    let s = settings(ActiveSlot::Block(1), 2, -10.0, Some(1.0));
    let plan = plan_frame(prev, &s, true, 3);

    assert_eq!(
        class_ops(&plan),
        vec![
            (0, BlockClass::Active, false),
            (1, BlockClass::Active, true),
            (1, BlockClass::Next, false),
            (2, BlockClass::Next, true),
            (0, BlockClass::WillChange, false),
            (1, BlockClass::WillChange, true),
            (2, BlockClass::WillChange, true),
        ]
    );
    assert!(plan.ops.contains(&EffectOp::Opacity {
        block: 0,
        value: 0.0
    }));
    assert_eq!(
        plan.ops.last(),
        Some(&EffectOp::Opacity {
            block: 1,
            value: 1.0
        })
    );
}

#[test]
fn leaving_through_the_top_restores_opacity() {
    let prev = ContainerState {
        active: Some(2),
        next: Some(1),
        in_viewport: Some(true),
    };
    let s = settings(ActiveSlot::After, 2, -40.0, None);
    let plan = plan_frame(prev, &s, false, 3);

    assert!(plan.ops.starts_with(&[
        EffectOp::Opacity {
            block: 0,
            value: 1.0
        },
        EffectOp::Opacity {
            block: 1,
            value: 1.0
        },
        EffectOp::Opacity {
            block: 2,
            value: 1.0
        },
    ]));
    let classes = class_ops(&plan);
    assert!(classes.contains(&(2, BlockClass::Active, false)));
    assert!(classes.contains(&(2, BlockClass::Next, true)));
    assert!(classes.contains(&(1, BlockClass::Next, false)));
    assert!(classes.contains(&(1, BlockClass::WillChange, false)));
    assert!(classes.contains(&(2, BlockClass::WillChange, true)));
    assert_eq!(plan.state.active, Some(3));
}

#[test]
fn every_op_addresses_a_real_block() {
    let states = [
        ContainerState::default(),
        ContainerState {
            active: Some(-1),
            next: Some(0),
            in_viewport: Some(false),
        },
        ContainerState {
            active: Some(4),
            next: Some(3),
            in_viewport: Some(false),
        },
    ];
    let all = [
        settings(ActiveSlot::Before, 0, 40.0, None),
        settings(ActiveSlot::Block(0), 1, 20.0, Some(1.0)),
        settings(ActiveSlot::Block(3), 2, -20.0, Some(1.0)),
        settings(ActiveSlot::After, 3, -40.0, None),
    ];
    for prev in states {
        for s in &all {
            for in_viewport in [true, false] {
                for op in plan_frame(prev, s, in_viewport, 4).ops {
                    let block = match op {
                        EffectOp::Class { block, .. }
                        | EffectOp::Opacity { block, .. }
                        | EffectOp::Translate { block, .. } => block,
                    };
                    assert!(block < 4);
                }
            }
        }
    }
}
