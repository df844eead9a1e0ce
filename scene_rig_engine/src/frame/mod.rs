//! Frame module: the per-frame tick and the host interfaces it drives.

mod backend;
mod clock;
mod input;
mod scheduler;
mod stage;

pub use backend::{FrameRequester, OutputSurface, SceneRenderer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{FrameInput, SchedulerHandle};
pub use scheduler::{FrameScheduler, SchedulerState, TickReport};
pub use stage::Stage;
