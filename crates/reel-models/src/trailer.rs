use serde::{Deserialize, Serialize};

/// Where a trailer key was found
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrailerSite {
    Catalog,       // catalog videos endpoint
    VideoPlatform, // video platform text search
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trailer {
    pub key: String,
    pub title: String,
    pub site: TrailerSite,
}

impl Trailer {
    /// Both paths resolve to video-platform keys
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.key)
    }
}

/// One entry of the catalog videos endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    pub name: String,
    pub site: String,
    pub video_type: String, // "Trailer", "Teaser", "Clip", ...
}

impl Video {
    pub fn is_trailer(&self) -> bool {
        self.video_type == "Trailer"
    }
}
