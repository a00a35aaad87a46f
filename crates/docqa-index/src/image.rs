//! Image associations and the keywords derived from them.

use docqa_core::tokenize::tokenize;
use docqa_core::types::{Chunk, ChunkId, ImageRef};
use std::collections::{BTreeSet, HashMap};
use std::ffi::OsStr;
use std::path::Path;

/// Images carried by one chunk plus keywords drawn from labels and file
/// stems.
#[derive(Debug)]
pub struct ImageEntry {
    pub images: Vec<ImageRef>,
    pub keywords: BTreeSet<String>,
}

#[derive(Debug)]
pub struct ImageIndex {
    entries: HashMap<ChunkId, ImageEntry>,
}

impl ImageIndex {
    pub fn build(chunks: &[Chunk]) -> Self {
        let mut entries = HashMap::new();
        for chunk in chunks {
            if !chunk.metadata.has_images {
                continue;
            }
            let mut keywords = BTreeSet::new();
            for image in &chunk.images {
                keywords.extend(tokenize(&image.label));
                keywords.extend(tokenize(stem(&image.filename)));
            }
            entries.insert(
                chunk.id,
                ImageEntry {
                    images: chunk.images.clone(),
                    keywords,
                },
            );
        }
        Self { entries }
    }

    pub fn entry(&self, id: ChunkId) -> Option<&ImageEntry> {
        self.entries.get(&id)
    }

    /// Fraction of the chunk's image keywords that literally appear as a
    /// substring of the lower-cased query. 0 for chunks without images or
    /// without derivable keywords.
    pub fn score(&self, id: ChunkId, lowered_query: &str) -> f32 {
        let Some(entry) = self.entries.get(&id) else {
            return 0.0;
        };
        if entry.keywords.is_empty() {
            return 0.0;
        }
        let hits = entry
            .keywords
            .iter()
            .filter(|keyword| lowered_query.contains(keyword.as_str()))
            .count();
        hits as f32 / entry.keywords.len() as f32
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(filename)
}
