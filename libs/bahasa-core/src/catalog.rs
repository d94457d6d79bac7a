//! In-memory vocabulary catalog built from imported entries.

use std::collections::HashMap;

use crate::corpus::TextAnalysis;
use crate::error::{CoreError, Result};
use crate::morphology::MorphologyContext;
use crate::parser::{VocabEntry, DEFAULT_DIFFICULTY};
use crate::types::{DifficultyTier, ItemId, ItemKind, LexicalItem};

/// Vocabulary catalog with stable sequential ids.
///
/// Roots are computed once on insertion and never recomputed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<LexicalItem>,
    index: HashMap<ItemId, usize>,
    surfaces: HashMap<String, ItemId>,
    next_id: ItemId,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Add entries, skipping surfaces already present. Returns the new items.
    ///
    /// When a corpus analysis is supplied, an entry without an explicit
    /// frequency takes the corpus frequency of its root.
    pub fn import(
        &mut self,
        ctx: &MorphologyContext,
        entries: Vec<VocabEntry>,
        corpus: Option<&TextAnalysis>,
    ) -> Result<Vec<LexicalItem>> {
        let mut added = Vec::new();

        for entry in entries {
            let key = entry.surface_form.to_lowercase();
            if self.surfaces.contains_key(&key) {
                tracing::debug!("Skipping existing entry '{}'", entry.surface_form);
                continue;
            }

            let root = ctx.root_of(&entry.surface_form)?;
            let frequency = entry
                .frequency
                .or_else(|| {
                    corpus.map(|c| match entry.kind {
                        ItemKind::Phrase => c.phrase_count(&entry.surface_form) as u32,
                        ItemKind::Word => c.stem_count(&root) as u32,
                    })
                })
                .unwrap_or(0);

            let item = LexicalItem {
                id: self.next_id.max(1),
                surface_form: entry.surface_form,
                kind: entry.kind,
                translation: entry.translation,
                root,
                frequency,
                difficulty: entry.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
            };
            self.next_id = item.id + 1;

            self.surfaces.insert(key, item.id);
            self.index.insert(item.id, self.items.len());
            self.items.push(item.clone());
            added.push(item);
        }

        tracing::debug!("Imported {} items, catalog size {}", added.len(), self.items.len());
        Ok(added)
    }

    pub fn items(&self) -> &[LexicalItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&LexicalItem> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    /// Lookup that treats a missing id as a contract violation.
    pub fn require(&self, id: ItemId) -> Result<&LexicalItem> {
        self.get(id).ok_or(CoreError::UnknownItem(id))
    }

    pub fn find_surface(&self, surface: &str) -> Option<&LexicalItem> {
        self.surfaces
            .get(&surface.trim().to_lowercase())
            .and_then(|id| self.get(*id))
    }

    pub fn in_tier(&self, tier: DifficultyTier) -> impl Iterator<Item = &LexicalItem> {
        self.items.iter().filter(move |item| item.tier() == tier)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::analyze_text;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn ctx() -> MorphologyContext {
        MorphologyContext::indonesian()
    }

    #[test]
    fn import_assigns_sequential_ids_and_roots() {
        let entries = parse("memasak | to cook | 2\nselamat pagi | good morning").unwrap();
        let mut catalog = Catalog::new();
        let added = catalog.import(&ctx(), entries, None).unwrap();

        assert_eq!(added.len(), 2);
        assert_eq!(added[0].id, 1);
        assert_eq!(added[0].root, "masak");
        assert_eq!(added[0].difficulty, 2);
        assert_eq!(added[1].id, 2);
        assert_eq!(added[1].kind, ItemKind::Phrase);
        assert_eq!(added[1].difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(catalog.get(2).unwrap().surface_form, "selamat pagi");
    }

    #[test]
    fn reimport_skips_known_surfaces() {
        let mut catalog = Catalog::new();
        catalog
            .import(&ctx(), parse("makan | to eat").unwrap(), None)
            .unwrap();
        let added = catalog
            .import(&ctx(), parse("Makan | to eat\nminum | to drink").unwrap(), None)
            .unwrap();

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].id, 2);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find_surface(" MAKAN ").is_some());
    }

    #[test]
    fn corpus_supplies_missing_frequencies() {
        let analysis = analyze_text(&ctx(), "Ibu memasak. Kami masak nasi. Makan nasi.").unwrap();
        let entries = parse("masakan | dish\nnasi | rice | 1 | 99").unwrap();
        let mut catalog = Catalog::new();
        let added = catalog.import(&ctx(), entries, Some(&analysis)).unwrap();

        assert_eq!(added[0].frequency, 2);
        assert_eq!(added[1].frequency, 99);
    }

    #[test]
    fn phrases_take_their_corpus_phrase_count() {
        let analysis = analyze_text(
            &ctx(),
            "selamat pagi semua. selamat pagi guru. selamat pagi ibu.",
        )
        .unwrap();
        let entries = parse("selamat pagi | good morning\nguru | teacher").unwrap();
        let mut catalog = Catalog::new();
        let added = catalog.import(&ctx(), entries, Some(&analysis)).unwrap();

        assert_eq!(added[0].kind, ItemKind::Phrase);
        assert_eq!(added[0].frequency, 3);
        assert_eq!(added[1].frequency, 1);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let catalog = Catalog::new();
        assert_eq!(catalog.require(42).unwrap_err(), CoreError::UnknownItem(42));
    }

    #[test]
    fn tiers_group_items() {
        let entries = parse("a1a | x | 1\nb2b | y | 3\nc3c | z | 5\nd4d | w | 4").unwrap();
        let mut catalog = Catalog::new();
        catalog.import(&ctx(), entries, None).unwrap();
        assert_eq!(catalog.in_tier(DifficultyTier::Hard).count(), 2);
        assert_eq!(catalog.in_tier(DifficultyTier::Medium).count(), 1);
    }
}
