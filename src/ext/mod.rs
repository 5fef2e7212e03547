mod best_effort_path_ext;
mod read_text;

pub use best_effort_path_ext::BestEffortPathExt;
pub use read_text::read_text;
