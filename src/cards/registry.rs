//! Card catalog for template lookup and deck construction.
//!
//! The `CardCatalog` stores every template the engine may instantiate.
//! Lookup is by string id through an `FxHashMap`; iteration follows
//! registration order so anything derived from the catalog (default decks,
//! random legendaries) is reproducible.

use rustc_hash::{FxHashMap, FxHashSet};

use super::definition::{CardTemplate, Rarity};
use super::instance::CardInstance;
use crate::core::InstanceId;
use crate::error::DeckError;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardCatalog, CardTemplate};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(CardTemplate::unit("whelp", "Whelp", 1, 2, 1));
///
/// assert_eq!(catalog.get("whelp").map(|t| t.cost), Some(1));
/// assert!(catalog.get("dragon").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<String, CardTemplate>,
    order: Vec<String>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any previous one with the same id.
    pub fn register(&mut self, template: CardTemplate) {
        if !self.cards.contains_key(&template.id) {
            self.order.push(template.id.clone());
        }
        self.cards.insert(template.id.clone(), template);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CardTemplate> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.order.iter().filter_map(|id| self.cards.get(id))
    }

    /// Templates that may appear in decks.
    pub fn collectible(&self) -> impl Iterator<Item = &CardTemplate> {
        self.iter().filter(|t| t.collectible)
    }

    /// Collectible legendary templates.
    pub fn legendaries(&self) -> impl Iterator<Item = &CardTemplate> {
        self.collectible().filter(|t| t.rarity == Rarity::Legendary)
    }

    /// Turn a deck list into fresh card instances.
    ///
    /// `None` means one copy of every collectible card. A custom list must
    /// be non-empty, free of duplicates, and name only collectible cards.
    /// The list is validated in full before any instance id is allocated.
    pub fn build_deck(
        &self,
        list: Option<&[String]>,
        mut alloc: impl FnMut() -> InstanceId,
    ) -> Result<Vec<CardInstance>, DeckError> {
        let templates: Vec<&CardTemplate> = match list {
            None => self.collectible().collect(),
            Some([]) => return Err(DeckError::Empty),
            Some(ids) => {
                let mut seen = FxHashSet::default();
                let mut templates = Vec::with_capacity(ids.len());
                for id in ids {
                    let template = self
                        .get(id)
                        .ok_or_else(|| DeckError::UnknownCard(id.clone()))?;
                    if !template.collectible {
                        return Err(DeckError::NotCollectible(id.clone()));
                    }
                    if !seen.insert(id.as_str()) {
                        return Err(DeckError::DuplicateCard(id.clone()));
                    }
                    templates.push(template);
                }
                templates
            }
        };

        if templates.is_empty() {
            return Err(DeckError::Empty);
        }

        Ok(templates
            .into_iter()
            .map(|t| CardInstance::new(alloc(), t.clone()))
            .collect())
    }
}
