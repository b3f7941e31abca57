mod custom_op;
mod error;
mod renderer_event;
mod wire;

pub use custom_op::{ColorMap, CustomOp};
pub use error::ProtocolError;
pub use renderer_event::RendererEvent;
pub use wire::{AddObjectAnnouncement, HostMessage, RecordSync, RendererMessage};
