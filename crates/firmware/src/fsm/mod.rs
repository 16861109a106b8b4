//! Hardware-integration glue: the System/Audio/UI FSM trio, the
//! process-wide `ServiceLocator`, and the console command dispatcher.
//!
//! Unlike `audio`/`display`/`input` (which wrap concrete peripherals),
//! this module is the portable core that those peripherals are driven
//! through — it has no hardware dependency of its own and runs identically
//! under `--features hardware` or `--features emulator`.

pub mod audio;
pub mod console;
pub mod events;
pub mod reactor;
pub mod service_locator;
pub mod system;
pub mod ui;

pub use audio::{AudioFsm, AudioState};
pub use events::{SystemEvent, UiEvent};
pub use reactor::{CoreEventBus, CoreReactor, UiReactor};
pub use service_locator::ServiceLocator;
pub use system::{SystemFsm, SystemState};
pub use ui::{UiFsm, UiState};
