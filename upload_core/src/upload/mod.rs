//! Simulated upload pipeline: scheduling, transfer clock and lifecycle sequencing

pub mod events;
pub mod registry;
pub mod scheduler;
pub mod sequencer;
pub mod stage;
pub mod timings;
pub mod transfer;

pub use events::UploadEvent;
pub use registry::{FileRegistry, UploadStats};
pub use scheduler::{InstantScheduler, RecordingScheduler, Scheduler, TokioScheduler};
pub use sequencer::{SimulatorConfig, UploadSimulator};
pub use stage::PipelineStage;
pub use timings::SimulationTimings;
pub use transfer::{ProgressTick, TransferSchedule};
