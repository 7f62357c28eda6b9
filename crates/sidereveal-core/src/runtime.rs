use crate::scope::Scope;
use crate::{NodeRect, Scene, View, dispatch};

/// Output of one tick: the painted scene and where every node landed.
pub struct Frame {
    pub scene: Scene,
    pub nodes: Vec<NodeRect>,
    /// Values delivered from other threads before this frame was built.
    pub delivered: usize,
}

impl Frame {
    pub fn node(&self, tag: &str) -> Option<&NodeRect> {
        self.nodes.iter().find(|n| n.tag.as_deref() == Some(tag))
    }
}

pub struct Scheduler {
    pub size: (u32, u32),
    pub frame_no: u64,
    scope: Scope,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            size: (1280, 800),
            frame_no: 0,
            scope: Scope::new(),
        }
    }

    pub fn with_size(size: (u32, u32)) -> Self {
        Self {
            size,
            ..Self::new()
        }
    }

    /// Scope that lives as long as the scheduler; components mounted into it
    /// are torn down by `shutdown`.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Drain cross-thread deliveries, build the root and hand it to the layout engine.
    pub fn frame<E>(
        &mut self,
        build_root: impl FnOnce(&mut Scheduler) -> View,
        layout_paint: impl FnOnce(&View, (u32, u32)) -> Result<(Scene, Vec<NodeRect>), E>,
    ) -> Result<Frame, E> {
        let delivered = dispatch::drain();
        let scope = self.scope.clone();
        let root = scope.run(|| build_root(self));
        let (scene, nodes) = layout_paint(&root, self.size)?;
        self.frame_no += 1;
        Ok(Frame {
            scene,
            nodes,
            delivered,
        })
    }

    pub fn shutdown(&self) {
        log::debug!("scheduler: shutting down after {} frame(s)", self.frame_no);
        self.scope.dispose();
    }
}
