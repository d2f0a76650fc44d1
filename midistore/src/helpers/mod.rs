pub mod file_id;
pub mod json;
pub mod midi;
pub mod multipart;
pub mod percent;
pub mod tags;

pub use json::JsonBody;
pub use multipart::Form;
