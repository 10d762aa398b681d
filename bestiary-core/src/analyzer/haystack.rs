//! Per-record search text for free-text filtering.
//!
//! Each record's searchable fields are normalized and packed into a single
//! contiguous buffer, referenced by `(offset, len)` spans:
//!
//! ```text
//! Buffer: [ancient red dragon\nbreath weapon\n...][goblin\n...]...
//!          ^                                      ^
//! Spans:  (0, 41)                                (41, 17) ...
//! ```
//!
//! Fields are joined with `\n`. A normalized query never contains a newline,
//! so a match can never straddle two fields.
//!
//! Search is a linear scan over whatever candidate set it is handed; nothing
//! here is an inverted index.

use memchr::memmem::Finder;

use crate::analyzer::normalizer::KeyNormalizer;
use bestiary_types::{Creature, EngineConfig, RecordId};

const FIELD_SEPARATOR: char = '\n';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    offset: u32,
    len: u32,
}

/// Packed, normalized search text for every record.
#[derive(Debug, Clone, Default)]
pub struct Haystacks {
    buffer: String,
    spans: Vec<Span>,
}

impl Haystacks {
    /// Builds haystacks for `records`, in record order.
    ///
    /// The name and type are always searchable; descriptions and special
    /// ability names are included according to `config`.
    pub fn build(records: &[Creature], normalizer: &KeyNormalizer, config: &EngineConfig) -> Self {
        let mut buffer = String::with_capacity(records.len() * 64);
        let mut spans = Vec::with_capacity(records.len());
        let mut scratch = String::with_capacity(256);

        for creature in records {
            let start = buffer.len();
            let mut push_field = |text: &str, buffer: &mut String| {
                normalizer.normalize_into(text, &mut scratch);
                if scratch.is_empty() {
                    return;
                }
                if buffer.len() > start {
                    buffer.push(FIELD_SEPARATOR);
                }
                buffer.push_str(&scratch);
            };

            push_field(&creature.name, &mut buffer);
            if let Some(kind) = creature.creature_type.as_deref() {
                push_field(kind, &mut buffer);
            }
            if config.search_descriptions {
                if let Some(text) = creature.description_short.as_deref() {
                    push_field(text, &mut buffer);
                }
                if let Some(text) = creature.description_long.as_deref() {
                    push_field(text, &mut buffer);
                }
            }
            if config.search_abilities {
                for ability in &creature.special_abilities {
                    push_field(&ability.name, &mut buffer);
                }
            }

            spans.push(Span {
                offset: start as u32,
                len: (buffer.len() - start) as u32,
            });
        }

        buffer.shrink_to_fit();
        Self { buffer, spans }
    }

    /// Number of records covered.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if no records are covered.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total bytes of packed search text.
    #[inline(always)]
    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// The normalized search text of one record.
    #[inline]
    pub fn get(&self, id: RecordId) -> Option<&str> {
        let span = self.spans.get(id as usize)?;
        let start = span.offset as usize;
        self.buffer.get(start..start + span.len as usize)
    }

    /// Keeps only the ids in `candidates` whose text contains `query`.
    ///
    /// The query is normalized with the same normalizer used at build time. A
    /// blank query leaves `candidates` untouched.
    pub fn retain_matching(
        &self,
        normalizer: &KeyNormalizer,
        query: &str,
        candidates: &mut Vec<RecordId>,
    ) {
        let needle = normalizer.normalize(query);
        if needle.is_empty() {
            return;
        }
        let finder = Finder::new(needle.as_bytes());
        candidates.retain(|&id| {
            self.get(id)
                .is_some_and(|text| finder.find(text.as_bytes()).is_some())
        });
    }
}
