pub mod chat;
pub mod record;
pub mod sleep;
pub mod vitals;

pub use chat::{ChatMessage, ChatRole};
pub use record::Record;
pub use sleep::{SleepSegment, SleepSession};
pub use vitals::{VitalPoint, VitalSeries};
