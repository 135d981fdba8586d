//! Content-addressed object storage
//!
//! The library maps canonical chunk content to object identifiers so that a
//! chunk seen in several places, or in several mirror images, is stored once.

use crate::algorithm::placement::ObjectId;
use crate::spatial::raster::PixelBuffer;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Dedup key: dimensions plus row-major RGBA bytes
///
/// Dimensions are part of the key so that, for example, a 16x8 and an 8x16
/// chunk of one solid color stay distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentKey {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl ContentKey {
    /// Key for a canonical buffer
    pub fn of(content: &PixelBuffer) -> Self {
        Self {
            width: content.width(),
            height: content.height(),
            bytes: content.to_bytes(),
        }
    }
}

/// A deduplicated object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Identifier within the owning library
    pub id: ObjectId,
    /// Canonical pixel content
    pub content: PixelBuffer,
}

/// Lookup counters for dedup effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Lookups that resolved to an existing object
    pub hits: usize,
    /// Lookups that created a new object
    pub misses: usize,
}

/// Ordered set of objects with an O(1) content index
#[derive(Default, Debug, Clone)]
pub struct ObjectLibrary {
    objects: Vec<ObjectRecord>,
    index: HashMap<ContentKey, ObjectId>,

    /// Dedup performance statistics
    pub stats: LookupStats,
}

impl ObjectLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a library from stored objects, assigning ids by position
    ///
    /// Every buffer keeps its own id. If two buffers share content the index
    /// resolves that content to the first of them.
    pub fn from_objects(objects: Vec<PixelBuffer>) -> Self {
        let mut library = Self::new();
        for content in objects {
            let id = ObjectId(library.objects.len());
            library.index.entry(ContentKey::of(&content)).or_insert(id);
            library.objects.push(ObjectRecord { id, content });
        }
        library
    }

    /// Resolve canonical content to an object, inserting it on first sight
    pub fn lookup_or_insert(&mut self, canonical: PixelBuffer) -> ObjectId {
        self.lookup_or_insert_with_status(canonical).0
    }

    /// As `lookup_or_insert`, also reporting whether a new object was created
    pub fn lookup_or_insert_with_status(&mut self, canonical: PixelBuffer) -> (ObjectId, bool) {
        match self.index.entry(ContentKey::of(&canonical)) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                (*entry.get(), false)
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                let id = ObjectId(self.objects.len());
                entry.insert(id);
                self.objects.push(ObjectRecord {
                    id,
                    content: canonical,
                });
                (id, true)
            }
        }
    }

    /// Append an object without consulting the index
    ///
    /// Used when deduplication is disabled; the index still learns the
    /// content if it has not been seen.
    pub fn insert_unshared(&mut self, canonical: PixelBuffer) -> ObjectId {
        self.stats.misses += 1;
        let id = ObjectId(self.objects.len());
        self.index.entry(ContentKey::of(&canonical)).or_insert(id);
        self.objects.push(ObjectRecord {
            id,
            content: canonical,
        });
        id
    }

    /// Find the object holding this canonical content, if any
    pub fn find(&self, canonical: &PixelBuffer) -> Option<ObjectId> {
        self.index.get(&ContentKey::of(canonical)).copied()
    }

    /// Combine two libraries built from independent scans
    ///
    /// Objects of `self` keep their ids. Objects of `other` are appended in
    /// their original order unless their content is already present, in which
    /// case the first-seen id wins. The returned table maps each id of `other`
    /// (by index) to its id in the merged library.
    ///
    /// The merged `stats` are the sum of both libraries' counters; the merge
    /// itself does not count as lookups.
    pub fn merge(mut self, other: &Self) -> (Self, Vec<ObjectId>) {
        let remap: Vec<ObjectId> = other
            .objects
            .iter()
            .map(|record| {
                let key = ContentKey::of(&record.content);
                match self.index.entry(key) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let id = ObjectId(self.objects.len());
                        entry.insert(id);
                        self.objects.push(ObjectRecord {
                            id,
                            content: record.content.clone(),
                        });
                        id
                    }
                }
            })
            .collect();
        self.stats.hits += other.stats.hits;
        self.stats.misses += other.stats.misses;
        (self, remap)
    }

    /// Object with the given id
    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.objects.get(id.index())
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the library holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in id order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.iter()
    }
}
