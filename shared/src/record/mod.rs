mod attr_value;
mod managed_record;
mod source;

pub use attr_value::{AttrValue, Attributes};
pub use managed_record::ManagedRecord;
pub use source::{ObjectSource, SourceKind};
