use crate::{
    config::options::ParallaxOptions,
    effect::{
        classes::{
            BLOCK_CLASS, BlockClass, CONTAINER_CLASS, LOCKUP_CLASS, StyleProp, container_height,
            translate_y,
        },
        plan::ContainerState,
        settings::BlockSettings,
    },
    foundation::core::{NodeId, Viewport},
    foundation::error::ParallaxResult,
    host::DomHost,
};

/// Why a matched container was left inert.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// The handle no longer addresses an element.
    NotAnElement,
    NoChildren,
    /// A block plus the animation and padding budget is taller than the viewport.
    ChildTooTall {
        child: NodeId,
        height: f64,
        limit: f64,
    },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnElement => write!(f, "element is not a valid element"),
            Self::NoChildren => write!(f, "element has no children for the effect"),
            Self::ChildTooTall {
                child,
                height,
                limit,
            } => write!(f, "child {child} too high ({height}px > {limit}px)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Rejection {
    pub container: NodeId,
    #[serde(flatten)]
    pub reason: RejectReason,
}

pub(crate) enum Assessment {
    Eligible {
        blocks: Vec<NodeId>,
        lockup: Option<NodeId>,
    },
    Rejected(RejectReason),
}

/// Lockup already present in the markup, if any.
fn existing_lockup<H: DomHost + ?Sized>(
    host: &H,
    container: NodeId,
) -> ParallaxResult<Option<NodeId>> {
    match host.first_element_child(container)? {
        Some(first) if host.has_class(first, LOCKUP_CLASS)? => Ok(Some(first)),
        _ => Ok(None),
    }
}

/// Check that every block fits in the viewport with room to slide and pad.
pub(crate) fn assess<H: DomHost + ?Sized>(
    host: &H,
    container: NodeId,
    opts: &ParallaxOptions,
    viewport: Viewport,
) -> ParallaxResult<Assessment> {
    if !host.is_element(container) {
        return Ok(Assessment::Rejected(RejectReason::NotAnElement));
    }
    let lockup = existing_lockup(host, container)?;
    let blocks = host.children(lockup.unwrap_or(container))?;
    if blocks.is_empty() {
        return Ok(Assessment::Rejected(RejectReason::NoChildren));
    }

    let budget = opts.animation_space() + opts.total_padding();
    for &child in &blocks {
        let height = host.content_height(child)?;
        if height + budget > viewport.height {
            return Ok(Assessment::Rejected(RejectReason::ChildTooTall {
                child,
                height,
                limit: viewport.height - budget,
            }));
        }
    }
    Ok(Assessment::Eligible { blocks, lockup })
}

/// Inline style values captured before the effect overwrote them.
#[derive(Clone, Debug)]
struct StyleBackup {
    node: NodeId,
    saved: Vec<(StyleProp, Option<String>)>,
}

impl StyleBackup {
    fn capture<H: DomHost + ?Sized>(
        host: &H,
        node: NodeId,
        props: &[StyleProp],
    ) -> ParallaxResult<Self> {
        let saved = props
            .iter()
            .map(|&p| Ok((p, host.style(node, p.as_str())?)))
            .collect::<ParallaxResult<Vec<_>>>()?;
        Ok(Self { node, saved })
    }

    fn restore<H: DomHost + ?Sized>(&self, host: &mut H) -> ParallaxResult<()> {
        for (prop, value) in &self.saved {
            match value {
                Some(v) => host.set_style(self.node, prop.as_str(), v)?,
                None => host.remove_style(self.node, prop.as_str())?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Lockup {
    node: NodeId,
    created: bool,
}

/// A container the effect has taken over, plus what is needed to give it back.
#[derive(Clone, Debug)]
pub(crate) struct PreparedContainer {
    pub node: NodeId,
    pub blocks: Vec<NodeId>,
    pub state: ContainerState,
    pub last: Option<BlockSettings>,
    lockup: Option<Lockup>,
    backups: Vec<StyleBackup>,
}

/// Take `container` over. A failure part way through is rolled back before
/// the error is returned, so the container is never left half made.
pub(crate) fn make<H: DomHost + ?Sized>(
    host: &mut H,
    container: NodeId,
    blocks: Vec<NodeId>,
    lockup: Option<NodeId>,
    opts: &ParallaxOptions,
) -> ParallaxResult<PreparedContainer> {
    let mut backups = Vec::with_capacity(blocks.len() + 1);
    backups.push(StyleBackup::capture(host, container, &StyleProp::CONTAINER)?);
    for &block in &blocks {
        backups.push(StyleBackup::capture(host, block, &StyleProp::BLOCK)?);
    }

    let mut prepared = PreparedContainer {
        node: container,
        blocks,
        state: ContainerState::default(),
        last: None,
        lockup: lockup.map(|node| Lockup {
            node,
            created: false,
        }),
        backups,
    };
    if let Err(err) = take_over(host, &mut prepared, opts) {
        if let Err(rollback) = unmake(host, &prepared) {
            tracing::warn!(%container, error = %rollback, "rollback of failed make incomplete");
        }
        return Err(err);
    }
    Ok(prepared)
}

fn take_over<H: DomHost + ?Sized>(
    host: &mut H,
    p: &mut PreparedContainer,
    opts: &ParallaxOptions,
) -> ParallaxResult<()> {
    let container = p.node;
    host.add_class(container, CONTAINER_CLASS)?;
    host.set_style(
        container,
        StyleProp::Height.as_str(),
        &container_height(p.blocks.len()),
    )?;
    for prop in StyleProp::VERTICAL_BOX {
        host.set_style(container, prop.as_str(), "0")?;
    }

    for &block in &p.blocks {
        host.add_class(block, BLOCK_CLASS)?;
        host.set_style(
            block,
            StyleProp::Transform.as_str(),
            &translate_y(opts.max_offset),
        )?;
        for prop in StyleProp::VERTICAL_BOX {
            host.set_style(block, prop.as_str(), "0")?;
        }
    }

    if p.lockup.is_none() {
        let node = host.create_element("div")?;
        p.lockup = Some(Lockup {
            node,
            created: true,
        });
        host.add_class(node, LOCKUP_CLASS)?;
        for &block in &p.blocks {
            host.append_child(node, block)?;
        }
        host.append_child(container, node)?;
    }
    Ok(())
}

/// Undo [`make`]: unwrap a lockup we created, drop effect classes and put
/// every inline style back the way it was.
pub(crate) fn unmake<H: DomHost + ?Sized>(
    host: &mut H,
    prepared: &PreparedContainer,
) -> ParallaxResult<()> {
    let container = prepared.node;
    if !host.is_element(container) {
        tracing::debug!(%container, "container vanished; nothing to restore");
        return Ok(());
    }

    host.remove_class(container, CONTAINER_CLASS)?;

    if let Some(lockup) = prepared.lockup.filter(|l| l.created && host.is_element(l.node)) {
        // blocks go back in their original order, wherever a partial make left them
        let wrapped = host.children(lockup.node)?;
        let direct = host.children(container)?;
        for &block in &prepared.blocks {
            if wrapped.contains(&block) || direct.contains(&block) {
                host.append_child(container, block)?;
            }
        }
        for child in host.children(lockup.node)? {
            host.append_child(container, child)?;
        }
        if host.children(container)?.contains(&lockup.node) {
            host.remove_child(container, lockup.node)?;
        }
    }

    for &block in &prepared.blocks {
        if !host.is_element(block) {
            continue;
        }
        host.remove_class(block, BLOCK_CLASS)?;
        for class in BlockClass::ALL {
            host.remove_class(block, class.as_str())?;
        }
    }

    for backup in &prepared.backups {
        if host.is_element(backup.node) {
            backup.restore(host)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/controller/lifecycle.rs"]
mod tests;
