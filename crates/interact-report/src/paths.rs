use std::path::{Path, PathBuf};

use interact_model::WindowBucket;

pub const SAME_DAY_FILE: &str = "combinations_same_day.txt";
pub const PLUS_48H_FILE: &str = "combinations_48h.txt";
pub const WITHIN_6H_FILE: &str = "combinations_6h.txt";
pub const INTERACTIONS_FILE: &str = "interactions.txt";
pub const TIMELINE_FILE: &str = "timeline.xml";

/// Artifact locations inside one output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub same_day: PathBuf,
    pub plus_48h: PathBuf,
    pub within_6h: PathBuf,
    pub interactions: PathBuf,
    pub timeline: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            same_day: dir.join(SAME_DAY_FILE),
            plus_48h: dir.join(PLUS_48H_FILE),
            within_6h: dir.join(WITHIN_6H_FILE),
            interactions: dir.join(INTERACTIONS_FILE),
            timeline: dir.join(TIMELINE_FILE),
        }
    }

    pub fn window(&self, bucket: WindowBucket) -> &Path {
        match bucket {
            WindowBucket::SameDay => &self.same_day,
            WindowBucket::Plus48h => &self.plus_48h,
            WindowBucket::Within6h => &self.within_6h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_paths_are_distinct() {
        let paths = OutputPaths::in_dir(Path::new("out"));
        assert_eq!(paths.window(WindowBucket::Plus48h), Path::new("out/combinations_48h.txt"));
        assert_ne!(
            paths.window(WindowBucket::SameDay),
            paths.window(WindowBucket::Within6h)
        );
    }
}
