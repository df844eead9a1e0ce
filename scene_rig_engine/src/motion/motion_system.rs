/// Motion system: runs every registered controller once per frame.
///
/// Controllers run in registration order. A controller that returns an error
/// or panics is isolated: its targets are restored to the values they had
/// before it ran, the fault is counted, and the frame continues with the next
/// controller. Each controller's first fault is logged as an error; repeats
/// are logged at debug level.
///
/// A panicking controller is reported through the engine log only. The first
/// update wraps the process panic hook so that panics raised while a
/// controller runs skip it; every other panic still reaches the previous hook.
/// A host that installs its own hook after that point takes over reporting.

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use crate::error::Result;
use crate::frame::FrameInput;
use crate::scene::{Material, Scene, Transform};
use crate::{engine_bail, engine_debug, engine_error};
use super::controller::{MotionContext, MotionController};
use super::motion_state::{MotionKind, MotionParams, MotionStates, MotionTarget};

/// Pre-update values of one target, restored if its controller faults
enum Snapshot {
    Node(crate::scene::NodeKey, Transform),
    Material(crate::scene::MaterialKey, Material),
}

struct Registered {
    controller: Box<dyn MotionController>,
    faults: u32,
}

static CONTROLLER_PANIC_HOOK: Once = Once::new();

thread_local! {
    /// Set while a controller runs on this thread
    static IN_CONTROLLER: Cell<bool> = const { Cell::new(false) };
    /// Where the last controller panic on this thread was raised
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[derive(Default)]
pub struct MotionSystem {
    states: MotionStates,
    controllers: Vec<Registered>,
}

impl MotionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== STATES =====

    /// Insert or replace the state of `target` for `kind`
    pub fn add_state(&mut self, target: MotionTarget, kind: MotionKind, params: MotionParams) {
        self.states.insert(target, kind, params);
    }

    pub fn states(&self) -> &MotionStates {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut MotionStates {
        &mut self.states
    }

    // ===== CONTROLLERS =====

    /// Register a controller after the next one in line.
    ///
    /// Returns its index.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidNode` if a target is not part of `scene`
    /// - `Error::MissingState` if a target has no state of the controller's kind
    pub fn add_controller(&mut self, scene: &Scene, controller: Box<dyn MotionController>) -> Result<usize> {
        for target in controller.targets() {
            let exists = match target {
                MotionTarget::Node(key) => scene.contains_node(key),
                MotionTarget::Material(key) => scene.material(key).is_some(),
            };
            if !exists {
                engine_bail!("scene_rig::MotionSystem", InvalidNode,
                    "Controller '{}' targets {:?}, which is not in the scene", controller.name(), target);
            }
            if !self.states.contains(target, controller.kind()) {
                engine_bail!("scene_rig::MotionSystem", MissingState,
                    "Controller '{}' targets {:?} without a {:?} state",
                    controller.name(), target, controller.kind());
            }
        }

        engine_debug!("scene_rig::MotionSystem", "Registered {:?} controller '{}'",
            controller.kind(), controller.name());
        self.controllers.push(Registered { controller, faults: 0 });
        Ok(self.controllers.len() - 1)
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    /// Controller names in execution order
    pub fn controller_names(&self) -> Vec<&str> {
        self.controllers.iter().map(|r| r.controller.name()).collect()
    }

    /// Number of frames in which the controller at `index` faulted
    pub fn fault_count(&self, index: usize) -> Option<u32> {
        self.controllers.get(index).map(|r| r.faults)
    }

    /// Faults across all controllers since registration
    pub fn total_faults(&self) -> u32 {
        self.controllers.iter().map(|r| r.faults).sum()
    }

    // ===== UPDATE =====

    /// Run every controller for `elapsed` seconds.
    ///
    /// Returns the names of the controllers that faulted during this call.
    pub fn update(&mut self, scene: &mut Scene, elapsed: f32, input: &FrameInput) -> Vec<String> {
        let mut faulted = Vec::new();

        for registered in &mut self.controllers {
            let snapshot = take_snapshot(scene, &registered.controller.targets());

            let outcome = {
                let mut ctx = MotionContext {
                    elapsed,
                    scene: &mut *scene,
                    states: &self.states,
                    input,
                };
                let controller = &mut registered.controller;
                run_contained(|| controller.update(&mut ctx))
            };

            let reason = match outcome {
                Ok(()) => continue,
                Err(reason) => reason,
            };

            restore_snapshot(scene, snapshot);
            registered.faults += 1;
            let name = registered.controller.name().to_string();
            if registered.faults == 1 {
                engine_error!("scene_rig::MotionSystem",
                    "Controller '{}' faulted at {:.3}s: {} (targets kept their previous state)",
                    name, elapsed, reason);
            } else {
                engine_debug!("scene_rig::MotionSystem",
                    "Controller '{}' faulted again ({} frames): {}", name, registered.faults, reason);
            }
            faulted.push(name);
        }

        faulted
    }
}

fn take_snapshot(scene: &Scene, targets: &[MotionTarget]) -> Vec<Snapshot> {
    targets.iter()
        .filter_map(|target| match *target {
            MotionTarget::Node(key) => scene.node(key)
                .map(|node| Snapshot::Node(key, node.transform)),
            MotionTarget::Material(key) => scene.material(key)
                .map(|material| Snapshot::Material(key, material.clone())),
        })
        .collect()
}

fn restore_snapshot(scene: &mut Scene, snapshot: Vec<Snapshot>) {
    for entry in snapshot {
        match entry {
            Snapshot::Node(key, transform) => {
                if let Some(node) = scene.node_mut(key) {
                    node.transform = transform;
                }
            }
            Snapshot::Material(key, material) => {
                if let Some(slot) = scene.material_mut(key) {
                    *slot = material;
                }
            }
        }
    }
}

/// Route panics raised inside a controller away from the process hook
fn install_controller_panic_hook() {
    CONTROLLER_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if IN_CONTROLLER.with(Cell::get) {
                let location = info.location().map(|l| format!("{}:{}", l.file(), l.line()));
                PANIC_LOCATION.with(|slot| *slot.borrow_mut() = location);
            } else {
                previous(info);
            }
        }));
    });
}

/// Run one controller update, turning an error or a panic into a fault reason
fn run_contained<F>(update: F) -> std::result::Result<(), String>
where
    F: FnOnce() -> Result<()>,
{
    install_controller_panic_hook();
    IN_CONTROLLER.with(|flag| flag.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(update));
    IN_CONTROLLER.with(|flag| flag.set(false));

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => {
            let location = PANIC_LOCATION.with(|slot| slot.borrow_mut().take());
            Err(panic_message(payload.as_ref(), location.as_deref()))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send), location: Option<&str>) -> String {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        Some(message.to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    };
    match (message, location) {
        (Some(message), Some(location)) => format!("panicked at {}: {}", location, message),
        (Some(message), None) => format!("panicked: {}", message),
        (None, Some(location)) => format!("panicked at {}", location),
        (None, None) => "panicked".to_string(),
    }
}

#[cfg(test)]
#[path = "motion_system_tests.rs"]
mod tests;
