pub mod loader;
pub mod model;

pub use loader::{load_course, parse_course};
pub use model::{
    Course, GroupMode, Moment, Module, PedagogicalType, Place, RawDuration, Step, TimeMode,
    TrainerPresence,
};
