use crate::models::{BlogModuleEntry, BlogSection, ProsConsCard};
use crate::util::{IdSource, SequentialIds};

/// A card that carries a 1-based display position.
pub(crate) trait Numbered {
    fn number(&self) -> u32;
    fn set_number(&mut self, n: u32);
}

impl Numbered for BlogSection {
    fn number(&self) -> u32 {
        self.section_number
    }
    fn set_number(&mut self, n: u32) {
        self.section_number = n;
    }
}

impl Numbered for BlogModuleEntry {
    fn number(&self) -> u32 {
        self.module_number
    }
    fn set_number(&mut self, n: u32) {
        self.module_number = n;
    }
}

impl Numbered for ProsConsCard {
    fn number(&self) -> u32 {
        self.card_number
    }
    fn set_number(&mut self, n: u32) {
        self.card_number = n;
    }
}

/// A card plus the local key the editor renders it under.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CardRow<T> {
    pub key: u64,
    pub value: T,
}

/// Ordered card list. Keys are local-only and never sent to the backend.
#[derive(Clone, Debug)]
pub(crate) struct NumberedCards<T, I = SequentialIds> {
    rows: Vec<CardRow<T>>,
    ids: I,
}

impl<T: Numbered + Clone> NumberedCards<T, SequentialIds> {
    pub fn new() -> Self {
        Self::with_ids(SequentialIds::default())
    }
}

impl<T: Numbered + Clone> Default for NumberedCards<T, SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numbered + Clone, I: IdSource> NumberedCards<T, I> {
    pub fn with_ids(ids: I) -> Self {
        Self { rows: vec![], ids }
    }

    /// Replace every row with loaded values. Stored numbers are kept; a missing (zero)
    /// number falls back to its 1-based position.
    pub fn reseed(&mut self, values: Vec<T>) {
        self.rows = values
            .into_iter()
            .enumerate()
            .map(|(idx, mut value)| {
                if value.number() == 0 {
                    value.set_number(idx as u32 + 1);
                }
                CardRow {
                    key: self.ids.next_id(),
                    value,
                }
            })
            .collect();
    }

    fn renumber(&mut self) {
        for (idx, row) in self.rows.iter_mut().enumerate() {
            row.value.set_number(idx as u32 + 1);
        }
    }

    /// Append a card numbered `len + 1`. Returns its key.
    pub fn add(&mut self, mut value: T) -> u64 {
        value.set_number(self.rows.len() as u32 + 1);
        let key = self.ids.next_id();
        self.rows.push(CardRow { key, value });
        key
    }

    /// Remove a card and close the gap in numbering.
    pub fn delete(&mut self, key: u64) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.key != key);
        let removed = self.rows.len() != before;
        if removed {
            self.renumber();
        }
        removed
    }

    /// Edit one card in place. Its number is not editable through here.
    pub fn update(&mut self, key: u64, edit: impl FnOnce(&mut T)) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.key == key) else {
            return false;
        };
        let number = row.value.number();
        edit(&mut row.value);
        row.value.set_number(number);
        true
    }

    pub fn get(&self, key: u64) -> Option<&T> {
        self.rows.iter().find(|r| r.key == key).map(|r| &r.value)
    }

    pub fn rows(&self) -> &[CardRow<T>] {
        &self.rows
    }

    pub fn values(&self) -> Vec<T> {
        self.rows.iter().map(|r| r.value.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
