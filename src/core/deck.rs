use crate::domain::model::CardMeaning;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TarotError};
use std::collections::HashMap;

/// Column names the deck source must provide (after normalization).
pub const REQUIRED_COLUMNS: [&str; 4] = ["card", "upright", "reversed", "symbolism"];

/// The deck source is a `;`-delimited CSV.
pub const DECK_DELIMITER: u8 = b';';

/// The full fixed catalog of cards, loaded once at startup and read-only
/// thereafter. Preserves source row order; names are unique.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<CardMeaning>,
    index: HashMap<String, usize>,
}

impl Deck {
    /// Load the deck through a storage port.
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let bytes = storage.read_file(path).await.map_err(|e| {
            TarotError::DataLoadError {
                message: format!("CSV file not readable: {}: {}", path, e),
            }
        })?;
        let deck = Self::from_bytes(&bytes)?;
        tracing::info!(
            "CSV dataset loaded successfully: {}. Number of cards: {}",
            path,
            deck.len()
        );
        Ok(deck)
    }

    /// Decode raw bytes and parse. Lossy UTF-8 so a latin1 file degrades to
    /// replacement characters instead of failing the load.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let content = String::from_utf8_lossy(bytes);
        Self::from_csv_str(&content)
    }

    /// Parse a deck from CSV text.
    ///
    /// Header names are trimmed and lowercased before validation; all four
    /// required columns must be present. Zero card rows is a load error,
    /// never a valid empty deck.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DECK_DELIMITER)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut column_index: HashMap<&str, usize> = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            column_index.entry(header.as_str()).or_insert(i);
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !column_index.contains_key(*c))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(TarotError::DataLoadError {
                message: format!(
                    "Missing columns in CSV file: {}. Available columns: {}",
                    missing.join(", "),
                    headers.join(", ")
                ),
            });
        }

        let card_col = column_index["card"];
        let upright_col = column_index["upright"];
        let reversed_col = column_index["reversed"];
        let symbolism_col = column_index["symbolism"];

        let mut cards: Vec<CardMeaning> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in reader.records() {
            let record = record?;
            let name = record.get(card_col).unwrap_or("").trim().to_string();
            if name.is_empty() {
                continue;
            }

            let field = |col: usize| record.get(col).unwrap_or("").trim().to_string();
            let meaning = CardMeaning {
                name: name.clone(),
                upright: field(upright_col),
                reversed: field(reversed_col),
                symbolism: field(symbolism_col),
            };

            // Names must stay unique; the source's last row wins.
            if let Some(&existing) = index.get(&name) {
                tracing::warn!("Duplicate card '{}' in deck source, keeping the last row", name);
                cards[existing] = meaning;
            } else {
                index.insert(name, cards.len());
                cards.push(meaning);
            }
        }

        if cards.is_empty() {
            return Err(TarotError::DataLoadError {
                message: "Deck source contains no card rows".to_string(),
            });
        }

        Ok(Self { cards, index })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CardMeaning> {
        self.index.get(name).map(|&i| &self.cards[i])
    }

    /// Card name at a given source-order position (used by the draw engine).
    pub fn name_at(&self, position: usize) -> &str {
        &self.cards[position].name
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|c| c.name.as_str())
    }
}
