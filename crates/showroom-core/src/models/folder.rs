use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Folder shown in the media library sidebar.
///
/// Purely organizational: assets carry no folder reference, so `file_count`
/// is a static figure from the sample data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub file_count: u32,
    pub path: String,
}

impl Folder {
    pub fn new(name: impl Into<String>, file_count: u32, path: impl Into<String>) -> Self {
        Folder {
            id: Uuid::new_v4(),
            name: name.into(),
            file_count,
            path: path.into(),
        }
    }
}
