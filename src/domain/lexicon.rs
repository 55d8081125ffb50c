use crate::utils::error::{Result, ScrabbleError};
use std::collections::BTreeMap;
use std::path::Path;

/// One node of the letter tree.
#[derive(Debug, Clone, Default)]
pub struct LetterNode {
    children: BTreeMap<char, LetterNode>,
    is_word: bool,
}

impl LetterNode {
    pub fn is_word(&self) -> bool {
        self.is_word
    }

    pub fn child(&self, letter: char) -> Option<&LetterNode> {
        self.children.get(&letter)
    }

    pub fn children(&self) -> impl Iterator<Item = (char, &LetterNode)> {
        self.children.iter().map(|(c, n)| (*c, n))
    }
}

/// Prefix tree over the legal word list. Words are lowercase `a-z` only;
/// anything else in the source list is skipped.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    root: LetterNode,
    len: usize,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::new();
        for word in words {
            lexicon.insert(word.as_ref());
        }
        lexicon
    }

    /// Load a word list file, one word per line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let lexicon = Self::from_words(content.lines());
        if lexicon.is_empty() {
            return Err(ScrabbleError::LexiconError {
                message: format!(
                    "no usable words in '{}'",
                    path.as_ref().display()
                ),
            });
        }
        Ok(lexicon)
    }

    /// Download a word list (one word per line) and build the tree from it.
    pub async fn fetch(url: &str) -> Result<Self> {
        tracing::debug!("Downloading word list from: {}", url);
        let response = reqwest::get(url).await?.error_for_status()?;
        let body = response.text().await?;
        let lexicon = Self::from_words(body.lines());
        if lexicon.is_empty() {
            return Err(ScrabbleError::LexiconError {
                message: format!("no usable words at '{}'", url),
            });
        }
        tracing::debug!("Loaded {} words", lexicon.len());
        Ok(lexicon)
    }

    pub fn insert(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if word.len() < 2 || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return;
        }
        let mut node = &mut self.root;
        for letter in word.chars() {
            node = node.children.entry(letter).or_default();
        }
        if !node.is_word {
            node.is_word = true;
            self.len += 1;
        }
    }

    pub fn is_word(&self, word: &str) -> bool {
        self.lookup(word).map(|n| n.is_word).unwrap_or(false)
    }

    /// Walk the tree along `prefix`, returning the node it ends at.
    pub fn lookup(&self, prefix: &str) -> Option<&LetterNode> {
        let mut node = &self.root;
        for letter in prefix.chars() {
            node = node.child(letter)?;
        }
        Some(node)
    }

    pub fn root(&self) -> &LetterNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
