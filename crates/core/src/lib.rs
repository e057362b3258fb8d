mod exif_reader;
mod matcher;
mod organize;
mod report;
mod scanner;

pub use exif_reader::{read_capture_date, CaptureDateError};
pub use matcher::find_twin_files;
pub use organize::{organize, OrganizeError, OrganizeOptions, OrganizeStats};
pub use report::{Action, Reporter};
pub use scanner::{collect_image_files, IMAGE_EXTENSIONS};
